use std::path::Path;

use keyfind_core::contract::{SessionRequest, SessionResponse, StyleEntry};
use keyfind_core::discovery::{DiscoveryProvider, RecordProvider};
use keyfind_core::model::AppRecord;
use keyfind_core::query_state::Command;
use keyfind_core::session::LauncherSession;
use keyfind_core::style::StyleAttribute;
use keyfind_core::transport::{handle_json, handle_request, ErrorCode, TransportResponse};
use keyfind_core::usage_store::{load, MemoryStore, Preferences};

fn session() -> LauncherSession {
    let records = RecordProvider::deterministic_fixture().discover().unwrap();
    LauncherSession::from_records(records, Preferences::default())
}

#[test]
fn json_insert_returns_snapshot() {
    let mut session = session();
    let mut store = MemoryStore::default();

    let raw = handle_json(
        &mut session,
        &mut store,
        Path::new("/home/user"),
        r#"{"kind":"set_query","payload":"fil"}"#,
    );
    let response: TransportResponse = serde_json::from_str(&raw).unwrap();

    match response {
        TransportResponse::Ok {
            response: SessionResponse::Snapshot(snapshot),
        } => {
            assert_eq!(snapshot.query, "fil");
            assert_eq!(snapshot.results[0].name, "Files");
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn json_command_is_adjacently_tagged() {
    let mut session = session();
    let mut store = MemoryStore::default();

    let raw = handle_json(
        &mut session,
        &mut store,
        Path::new("/"),
        r#"{"kind":"command","payload":{"command":"insert","text":"t"}}"#,
    );
    assert!(raw.contains(r#""status":"ok""#));
    assert_eq!(session.query().text(), "t");
}

#[test]
fn invalid_json_maps_to_error_code() {
    let mut session = session();
    let mut store = MemoryStore::default();

    let raw = handle_json(&mut session, &mut store, Path::new("/"), "{not json");
    let response: TransportResponse = serde_json::from_str(&raw).unwrap();
    match response {
        TransportResponse::Err { error } => assert_eq!(error.code, ErrorCode::InvalidJson),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn confirm_returns_launch_plan_and_records_usage() {
    let mut session = session();
    let mut store = MemoryStore::default();
    let home = Path::new("/home/user");

    handle_request(&mut session, &mut store, home, SessionRequest::SetQuery("files".into()));
    let response = handle_request(
        &mut session,
        &mut store,
        home,
        SessionRequest::Command(Command::Confirm),
    );
    assert!(response.ends_session());

    match response {
        TransportResponse::Ok {
            response: SessionResponse::Launch(plan),
        } => {
            assert_eq!(plan.program, "nautilus");
            assert_eq!(plan.args, vec!["--new-window"]);
            assert_eq!(plan.working_dir, home);
        }
        other => panic!("unexpected response: {other:?}"),
    }

    let prefs = load(&store).unwrap();
    assert_eq!(
        prefs.count_for("/usr/share/applications/org.gnome.Nautilus.desktop"),
        1
    );
}

#[test]
fn confirm_with_empty_command_reports_launch_error() {
    let records = vec![AppRecord::new("/apps/broken.desktop", "Broken", "", "", "")];
    let mut session = LauncherSession::from_records(records, Preferences::default());
    let mut store = MemoryStore::default();

    handle_request(
        &mut session,
        &mut store,
        Path::new("/"),
        SessionRequest::SetQuery("bro".into()),
    );
    let response = handle_request(
        &mut session,
        &mut store,
        Path::new("/"),
        SessionRequest::Command(Command::Confirm),
    );

    match response {
        TransportResponse::Err { error } => assert_eq!(error.code, ErrorCode::Launch),
        other => panic!("unexpected response: {other:?}"),
    }
    assert!(store.entries().is_none());
}

#[test]
fn set_style_persists_override() {
    let mut session = session();
    let mut store = MemoryStore::default();

    let response = handle_request(
        &mut session,
        &mut store,
        Path::new("/"),
        SessionRequest::SetStyle(StyleEntry {
            attribute: StyleAttribute::SmallBold,
            value: "Sans-9:bold".into(),
        }),
    );
    assert!(matches!(
        response,
        TransportResponse::Ok {
            response: SessionResponse::Style(_)
        }
    ));
    assert_eq!(
        store.entries().unwrap(),
        &[("smallbold".to_string(), "Sans-9:bold".to_string())]
    );
}

#[test]
fn cancel_ends_session() {
    let mut session = session();
    let mut store = MemoryStore::default();
    let raw = handle_json(
        &mut session,
        &mut store,
        Path::new("/"),
        r#"{"kind":"command","payload":{"command":"cancel"}}"#,
    );
    let response: TransportResponse = serde_json::from_str(&raw).unwrap();
    assert!(response.ends_session());
}
