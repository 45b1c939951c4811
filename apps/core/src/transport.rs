use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::contract::{SessionRequest, SessionResponse, StyleEntry};
use crate::session::{LauncherSession, SessionError, SessionEvent};
use crate::style::StyleAttribute;
use crate::usage_store::KeyValueStore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    UnknownApplication,
    Launch,
    Store,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: SessionResponse },
    Err { error: ErrorResponse },
}

impl TransportResponse {
    /// A launch or exit closes the launcher session.
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            Self::Ok {
                response: SessionResponse::Launch(_) | SessionResponse::Exit
            }
        )
    }
}

pub fn handle_request(
    session: &mut LauncherSession,
    store: &mut dyn KeyValueStore,
    working_dir: &Path,
    request: SessionRequest,
) -> TransportResponse {
    match dispatch(session, store, working_dir, request) {
        Ok(response) => TransportResponse::Ok { response },
        Err(error) => {
            warn!(%error, "session request failed");
            TransportResponse::Err {
                error: map_session_error(error),
            }
        }
    }
}

/// Parses one JSON request and handles it; malformed input becomes an
/// `invalid_json` error response.
pub fn handle_payload(
    session: &mut LauncherSession,
    store: &mut dyn KeyValueStore,
    working_dir: &Path,
    payload: &str,
) -> TransportResponse {
    match serde_json::from_str::<SessionRequest>(payload) {
        Ok(request) => handle_request(session, store, working_dir, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    }
}

pub fn handle_json(
    session: &mut LauncherSession,
    store: &mut dyn KeyValueStore,
    working_dir: &Path,
    payload: &str,
) -> String {
    let response = handle_payload(session, store, working_dir, payload);
    serde_json::to_string(&response).expect("transport response should serialize")
}

fn dispatch(
    session: &mut LauncherSession,
    store: &mut dyn KeyValueStore,
    working_dir: &Path,
    request: SessionRequest,
) -> Result<SessionResponse, SessionError> {
    match request {
        SessionRequest::Command(command) => match session.handle(command) {
            SessionEvent::Updated => Ok(SessionResponse::Snapshot(session.snapshot())),
            SessionEvent::Exit => Ok(SessionResponse::Exit),
            SessionEvent::Launch(index) => {
                let plan = session.prepare_launch(index, working_dir)?;
                session.record_launch(index, store)?;
                Ok(SessionResponse::Launch(plan))
            }
        },
        SessionRequest::SetQuery(text) => {
            session.set_query(&text);
            Ok(SessionResponse::Snapshot(session.snapshot()))
        }
        SessionRequest::Snapshot => Ok(SessionResponse::Snapshot(session.snapshot())),
        SessionRequest::Style => Ok(SessionResponse::Style(style_entries(session))),
        SessionRequest::SetStyle(entry) => {
            session.set_style(entry.attribute, &entry.value);
            session.save(store)?;
            Ok(SessionResponse::Style(style_entries(session)))
        }
    }
}

fn style_entries(session: &LauncherSession) -> Vec<StyleEntry> {
    StyleAttribute::ALL
        .into_iter()
        .map(|attribute| StyleEntry {
            attribute,
            value: session.style().get(attribute).to_string(),
        })
        .collect()
}

fn map_session_error(error: SessionError) -> ErrorResponse {
    let message = error.to_string();
    let code = match error {
        SessionError::Store(_) => ErrorCode::Store,
        SessionError::Launch(_) => ErrorCode::Launch,
        SessionError::UnknownApplication(_) => ErrorCode::UnknownApplication,
    };
    ErrorResponse { code, message }
}
