//! Messages exchanged between scan clients and the scan server.

use serde::{Deserialize, Serialize};

use crate::game::GameSummary;
use crate::scan::Route;

/// Current protocol version. Increment when message layout changes.
pub const PROTOCOL_VERSION: u16 = 1;

/// Longest accepted session key.
pub const MAX_SESSION_KEY_LEN: usize = 64;

/// Requests sent by a client. Every request names the session it acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    /// Version check, answered with [`Reply::Hello`].
    Hello { version: u16 },
    /// Start a new game, replacing the session's current one.
    NewGame { session: String },
    /// A tag was scanned.
    Scan { session: String, hid: String },
    /// Counters for the session's current game.
    Status { session: String },
    /// Drop the session's game.
    Clear { session: String },
}

impl Request {
    /// Session the request acts on, if any.
    pub fn session(&self) -> Option<&str> {
        match self {
            Request::Hello { .. } => None,
            Request::NewGame { session }
            | Request::Scan { session, .. }
            | Request::Status { session }
            | Request::Clear { session } => Some(session),
        }
    }
}

/// Server replies, one per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    Hello { version: u16 },
    /// A new game was started with this many ships.
    Started { ships: usize },
    /// Result view for a scan.
    Routed(Route),
    Status(GameSummary),
    /// The session has no game in progress.
    NoGame,
    Cleared,
    Error(String),
}

/// Session keys double as blob names, so they are limited to a safe charset.
pub fn valid_session_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_SESSION_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}
