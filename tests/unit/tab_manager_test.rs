#[path = "../common/mod.rs"]
mod common;

use common::{calls_for, MockFactory};
use kestrel::managers::tab_manager::TabManager;
use kestrel::types::errors::TabError;

fn manager_with(n: usize) -> TabManager<MockFactory> {
    let mut mgr = TabManager::new(MockFactory::new());
    for i in 0..n {
        mgr.open_tab(&format!("https://tab{}.org", i)).unwrap();
    }
    mgr
}

#[test]
fn test_open_tab_makes_it_current_and_navigates() {
    let factory = MockFactory::new();
    let log = factory.log.clone();
    let mut mgr = TabManager::new(factory);

    let id = mgr.open_tab("https://example.com").unwrap();
    assert_eq!(mgr.len(), 1);
    assert_eq!(mgr.current().unwrap().id(), &id);
    assert_eq!(mgr.current().unwrap().state.url, "https://example.com");
    assert_eq!(calls_for(&log, &id), vec!["navigate https://example.com"]);
}

#[test]
fn test_open_tab_with_empty_url_does_not_navigate() {
    let factory = MockFactory::new();
    let log = factory.log.clone();
    let mut mgr = TabManager::new(factory);
    let id = mgr.on_external_open_request().unwrap();
    assert!(calls_for(&log, &id).is_empty());
    assert_eq!(mgr.current_index(), 0);
}

#[test]
fn test_open_tab_hides_previous_surface() {
    let mut mgr = manager_with(2);
    assert!(!mgr.tabs()[0].surface.visible);
    assert!(mgr.tabs()[1].surface.visible);
}

#[test]
fn test_surface_failure_leaves_tabs_unchanged() {
    let factory = MockFactory::new();
    let fail = factory.fail.clone();
    let mut mgr = TabManager::new(factory);
    mgr.open_tab("https://a.org").unwrap();

    *fail.borrow_mut() = true;
    assert!(matches!(mgr.open_tab("https://b.org"), Err(TabError::Surface(_))));
    assert_eq!(mgr.len(), 1);
    assert!(mgr.current().unwrap().surface.visible);
}

#[test]
fn test_closing_sole_tab_is_rejected() {
    let mut mgr = manager_with(1);
    assert!(matches!(mgr.close_tab(0), Err(TabError::LastTab)));
    assert_eq!(mgr.len(), 1);
}

#[test]
fn test_close_out_of_range_is_rejected() {
    let mut mgr = manager_with(2);
    assert!(matches!(mgr.close_tab(5), Err(TabError::InvalidIndex(5))));
}

#[test]
fn test_closing_tab_left_of_current_keeps_current() {
    let mut mgr = manager_with(3);
    mgr.switch_to(2).unwrap();
    let current = mgr.current().unwrap().id().clone();

    mgr.close_tab(0).unwrap();
    assert_eq!(mgr.current_index(), 1);
    assert_eq!(mgr.current().unwrap().id(), &current);
}

#[test]
fn test_closing_tab_right_of_current_keeps_current() {
    let mut mgr = manager_with(3);
    mgr.switch_to(0).unwrap();
    let current = mgr.current().unwrap().id().clone();

    mgr.close_tab(2).unwrap();
    assert_eq!(mgr.current_index(), 0);
    assert_eq!(mgr.current().unwrap().id(), &current);
}

#[test]
fn test_closing_current_tab_selects_the_tab_that_slides_in() {
    let mut mgr = manager_with(3);
    mgr.switch_to(1).unwrap();
    let next = mgr.tabs()[2].id().clone();

    mgr.close_tab(1).unwrap();
    assert_eq!(mgr.current_index(), 1);
    assert_eq!(mgr.current().unwrap().id(), &next);
    assert!(mgr.current().unwrap().surface.visible);
}

#[test]
fn test_closing_last_current_tab_selects_new_last() {
    let mut mgr = manager_with(3);
    let previous = mgr.tabs()[1].id().clone();

    mgr.close_tab(2).unwrap();
    assert_eq!(mgr.current_index(), 1);
    assert_eq!(mgr.current().unwrap().id(), &previous);
}

#[test]
fn test_switch_toggles_visibility() {
    let mut mgr = manager_with(3);
    mgr.switch_to(0).unwrap();
    let visible: Vec<bool> = mgr.tabs().iter().map(|t| t.surface.visible).collect();
    assert_eq!(visible, vec![true, false, false]);
    assert!(matches!(mgr.switch_to(3), Err(TabError::InvalidIndex(3))));
    assert_eq!(mgr.current_index(), 0);
}

#[test]
fn test_lookup_by_id_survives_reordering_by_close() {
    let mut mgr = manager_with(3);
    let last = mgr.tabs()[2].id().clone();
    mgr.close_tab(0).unwrap();
    assert_eq!(mgr.index_of(&last), Some(1));
    assert_eq!(mgr.get(&last).unwrap().state.url, "https://tab2.org");
    mgr.get_mut(&last).unwrap().state.title = "Two".into();
    assert_eq!(mgr.get(&last).unwrap().state.label(), "Two");
}
