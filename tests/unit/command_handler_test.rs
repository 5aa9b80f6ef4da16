#[path = "../common/mod.rs"]
mod common;

use common::{calls_for, controller};
use kestrel::command_handler::{dispatch, parse_message, BrowserCommand, CommandGate, CommandOutcome};
use kestrel::managers::history_manager::HistoryManagerTrait;
use kestrel::surface::SurfaceEvent;
use kestrel::types::errors::CommandError;
use kestrel::types::settings::ThemeMode;
use kestrel::types::tab::TabId;

fn send(
    c: &mut kestrel::window_controller::WindowController<common::MockFactory>,
    json: &str,
) -> CommandOutcome {
    let source = c.tabs().current().unwrap().id().clone();
    dispatch(c, &source, parse_message(json).unwrap().command)
}

#[test]
fn test_navigate_command_classifies_input() {
    let (mut c, log, _app) = controller(None);
    let id = c.tabs().current().unwrap().id().clone();

    assert_eq!(send(&mut c, r#"{"cmd":"navigate","input":"rust-lang.org"}"#), CommandOutcome::Render);
    assert_eq!(calls_for(&log, &id).last().unwrap(), "navigate https://rust-lang.org");
}

#[test]
fn test_tab_commands() {
    let (mut c, _log, _app) = controller(None);
    send(&mut c, r#"{"cmd":"new_tab"}"#);
    send(&mut c, r#"{"cmd":"new_tab"}"#);
    assert_eq!(c.tabs().len(), 3);

    send(&mut c, r#"{"cmd":"switch_tab","index":0}"#);
    assert_eq!(c.tabs().current_index(), 0);

    send(&mut c, r#"{"cmd":"close_tab","index":2}"#);
    send(&mut c, r#"{"cmd":"close_current_tab"}"#);
    send(&mut c, r#"{"cmd":"close_current_tab"}"#);
    assert_eq!(c.tabs().len(), 1);
}

#[test]
fn test_show_history_returns_entries() {
    let (mut c, _log, _app) = controller(None);
    let id = c.tabs().current().unwrap().id().clone();
    c.handle_surface_event(&id, SurfaceEvent::UrlChanged("https://a.org/".into()));
    c.handle_surface_event(&id, SurfaceEvent::LoadFinished { success: true });

    match send(&mut c, r#"{"cmd":"show_history"}"#) {
        CommandOutcome::ShowHistory(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].url, "https://a.org/");
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    send(&mut c, r#"{"cmd":"clear_history"}"#);
    assert!(c.history().is_empty());
}

#[test]
fn test_url_changed_reports_in_page_navigation() {
    let (mut c, _log, _app) = controller(Some("https://a.org/"));
    send(
        &mut c,
        r#"{"cmd":"url_changed","url":"https://a.org/#section","title":"Section"}"#,
    );
    assert_eq!(c.address_bar(), "https://a.org/#section");
    assert_eq!(c.tabs().current().unwrap().state.title, "Section");
}

#[test]
fn test_cross_origin_url_changed_is_ignored() {
    let (mut c, _log, _app) = controller(Some("https://a.org/"));
    let id = c.tabs().current().unwrap().id().clone();
    c.handle_surface_event(&id, SurfaceEvent::UrlChanged("https://a.org/".into()));
    c.handle_surface_event(&id, SurfaceEvent::TitleChanged("A".into()));

    send(
        &mut c,
        r#"{"cmd":"url_changed","url":"https://bank.example/login","title":"Bank"}"#,
    );
    assert_eq!(c.address_bar(), "https://a.org/");
    assert_eq!(c.tabs().current().unwrap().state.title, "A");
}

#[test]
fn test_new_window_command_leaves_this_window_alone() {
    let (mut c, log, _app) = controller(None);
    let before = log.borrow().len();
    assert_eq!(send(&mut c, r#"{"cmd":"new_window"}"#), CommandOutcome::OpenWindow);
    assert_eq!(c.tabs().len(), 1);
    assert_eq!(log.borrow().len(), before);
}

#[test]
fn test_clear_cache_command() {
    let (mut c, log, _app) = controller(None);
    let id = c.tabs().current().unwrap().id().clone();
    send(&mut c, r#"{"cmd":"clear_cache"}"#);
    assert_eq!(calls_for(&log, &id).last().unwrap(), "clear_cache");
    assert_eq!(c.status().unwrap().text, "Cache cleared");
}

#[test]
fn test_gate_admits_tokened_messages_from_the_tab_document() {
    let (mut c, _log, _app) = controller(Some("https://a.org/"));
    let id = c.tabs().current().unwrap().id().clone();
    c.handle_surface_event(&id, SurfaceEvent::UrlChanged("https://a.org/".into()));
    let gate = CommandGate::new();
    let message = format!(r#"{{"cmd":"reload","token":"{}"}}"#, gate.token());

    let admitted = gate.admit(&c, &id, "https://a.org/page", &message).unwrap();
    assert_eq!(admitted, BrowserCommand::Reload);

    assert!(matches!(
        gate.admit(&c, &id, "https://a.org/", r#"{"cmd":"reload"}"#),
        Err(CommandError::BadToken)
    ));
    assert!(matches!(
        gate.admit(&c, &id, "https://a.org/", r#"{"cmd":"reload","token":"guess"}"#),
        Err(CommandError::BadToken)
    ));
    assert!(matches!(
        gate.admit(&c, &id, "https://evil.example/", &message),
        Err(CommandError::ForeignSender(url)) if url == "https://evil.example/"
    ));
    assert!(matches!(
        gate.admit(&c, &TabId::from("closed-tab"), "https://a.org/", &message),
        Err(CommandError::ForeignSender(_))
    ));
    assert!(matches!(
        gate.admit(&c, &id, "https://a.org/", "{"),
        Err(CommandError::Malformed(_))
    ));
}

#[test]
fn test_gate_follows_the_blank_page() {
    let (c, _log, _app) = controller(None);
    let id = c.tabs().current().unwrap().id().clone();
    let gate = CommandGate::default();
    let message = format!(r#"{{"cmd":"ui_ready","token":"{}"}}"#, gate.token());
    assert_eq!(
        gate.admit(&c, &id, "about:blank", &message).unwrap(),
        BrowserCommand::UiReady
    );
}

#[test]
fn test_settings_commands() {
    let (mut c, _log, app) = controller(None);
    send(&mut c, r#"{"cmd":"set_theme","theme":"Light"}"#);
    assert_eq!(c.theme(), ThemeMode::Light);
    assert_eq!(app.preferences().theme().unwrap(), ThemeMode::Light);

    send(&mut c, r#"{"cmd":"zoom_in"}"#);
    assert!((c.chrome_state().zoom - 1.2).abs() < 1e-9);
    send(&mut c, r#"{"cmd":"zoom_reset"}"#);
    assert_eq!(c.chrome_state().zoom, 1.0);
}

#[test]
fn test_find_commands() {
    let (mut c, log, _app) = controller(None);
    let id = c.tabs().current().unwrap().id().clone();
    send(&mut c, r#"{"cmd":"find_show"}"#);
    send(&mut c, r#"{"cmd":"find_query","text":"kestrel"}"#);
    send(&mut c, r#"{"cmd":"find_case_sensitive","enabled":true}"#);
    send(&mut c, r#"{"cmd":"find_close"}"#);

    assert!(c.find_bar().case_sensitive());
    assert_eq!(
        calls_for(&log, &id).last().unwrap(),
        r#"find "" backward=false case=true"#
    );
}

#[test]
fn test_bookmark_commands() {
    let (mut c, _log, _app) = controller(Some("https://a.org"));
    send(&mut c, r#"{"cmd":"add_bookmark"}"#);
    send(&mut c, r#"{"cmd":"add_bookmark"}"#);
    assert_eq!(c.bookmarks().len(), 2);

    send(&mut c, r#"{"cmd":"remove_bookmark_at","index":1}"#);
    assert_eq!(c.bookmarks().len(), 1);
    send(&mut c, r#"{"cmd":"clear_bookmarks"}"#);
    assert!(c.bookmarks().is_empty());
}

#[test]
fn test_ui_ready_changes_nothing() {
    let (mut c, log, _app) = controller(None);
    let before = log.borrow().len();
    assert_eq!(send(&mut c, r#"{"cmd":"ui_ready"}"#), CommandOutcome::Render);
    assert_eq!(log.borrow().len(), before);
}

#[test]
fn test_parse_reports_malformed_messages() {
    assert!(parse_message("{").is_err());
    assert!(parse_message(r#"{"input":"no command"}"#).is_err());
    assert_eq!(
        parse_message(r#"{"cmd":"open_bookmark","index":3}"#).unwrap().command,
        BrowserCommand::OpenBookmark { index: 3 }
    );
}
