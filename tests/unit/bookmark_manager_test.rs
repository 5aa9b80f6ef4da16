use kestrel::app::App;
use kestrel::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use kestrel::types::errors::BookmarkError;

fn manager() -> (BookmarkManager, App) {
    let app = App::open_in_memory().unwrap();
    (BookmarkManager::load(app.store()).unwrap(), app)
}

#[test]
fn test_add_with_empty_url_is_rejected() {
    let (mut mgr, _app) = manager();
    assert!(matches!(mgr.add("Nothing", ""), Err(BookmarkError::InvalidUrl(_))));
    assert!(mgr.is_empty());
}

#[test]
fn test_add_then_remove_restores_length() {
    let (mut mgr, _app) = manager();
    mgr.add("Rust", "https://www.rust-lang.org").unwrap();
    let before = mgr.len();
    mgr.add("Crates", "https://crates.io").unwrap();
    mgr.remove("https://crates.io").unwrap();
    assert_eq!(mgr.len(), before);
}

#[test]
fn test_remove_missing_url_reports_not_found() {
    let (mut mgr, _app) = manager();
    mgr.add("Rust", "https://www.rust-lang.org").unwrap();
    let err = mgr.remove("https://nowhere.example").unwrap_err();
    assert!(matches!(err, BookmarkError::NotFound(url) if url == "https://nowhere.example"));
    assert_eq!(mgr.len(), 1);
}

#[test]
fn test_duplicates_are_kept_and_removed_one_at_a_time() {
    let (mut mgr, _app) = manager();
    mgr.add("First", "https://a.org").unwrap();
    mgr.add("Second", "https://a.org").unwrap();
    assert_eq!(mgr.len(), 2);

    let removed = mgr.remove("https://a.org").unwrap();
    assert_eq!(removed.title, "First");
    assert!(mgr.contains("https://a.org"));
}

#[test]
fn test_remove_at_checks_bounds() {
    let (mut mgr, _app) = manager();
    mgr.add("A", "https://a.org").unwrap();
    assert!(matches!(mgr.remove_at(1), Err(BookmarkError::InvalidIndex(1))));
    assert_eq!(mgr.remove_at(0).unwrap().url, "https://a.org");
    assert!(mgr.is_empty());
}

#[test]
fn test_bookmarks_survive_reload_in_order() {
    let app = App::open_in_memory().unwrap();
    {
        let mut mgr = BookmarkManager::load(app.store()).unwrap();
        mgr.add("One", "https://one.org").unwrap();
        mgr.add("", "https://two.org/page").unwrap();
        mgr.add("Three", "about:config").unwrap();
    }
    let mgr = BookmarkManager::load(app.store()).unwrap();
    let titles: Vec<&str> = mgr.bookmarks().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "two.org", "Three"]);
}

#[test]
fn test_clear_empties_menu() {
    let (mut mgr, app) = manager();
    mgr.add("A", "https://a.org").unwrap();
    mgr.clear().unwrap();
    assert!(mgr.menu_items().is_empty());
    assert_eq!(app.store().value("bookmarks.size").unwrap().as_deref(), Some("0"));
}

#[test]
fn test_get_returns_bookmark_by_position() {
    let (mut mgr, _app) = manager();
    mgr.add("A", "https://a.org").unwrap();
    mgr.add("B", "https://b.org").unwrap();
    assert_eq!(mgr.get(1).unwrap().title, "B");
    assert!(mgr.get(2).is_none());
}
