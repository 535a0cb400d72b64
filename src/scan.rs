//! Tag-scan entry point: from the scanned page's query string to the result
//! view the front end should show.

use alloc::string::String;
use core::fmt;

use crate::common::{GameError, ShotOutcome};
use crate::session::GameSession;
use crate::store::GameStore;

/// Query parameter carrying the tag identifier.
pub const HID_PARAM: &str = "hid";

/// Result view to show after a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Route {
    /// Start/setup screen: no tag, bad tag, no game, or a failing store.
    Start,
    Hit,
    Miss,
    Victory,
}

impl Route {
    /// Victory wins over hit; anything else that landed is a miss.
    pub fn from_outcome(outcome: &ShotOutcome) -> Self {
        if outcome.victory {
            Route::Victory
        } else if outcome.hit {
            Route::Hit
        } else {
            Route::Miss
        }
    }

    /// Page the web front end redirects to.
    pub fn path(self) -> &'static str {
        match self {
            Route::Start => "/",
            Route::Hit => "/hit.html",
            Route::Miss => "/miss.html",
            Route::Victory => "/victory.html",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Start => "start",
            Route::Hit => "hit",
            Route::Miss => "miss",
            Route::Victory => "victory",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extract the `hid` parameter from a query string or a whole URL.
///
/// The first `hid` pair decides; an empty value counts as absent. Keys and
/// values are form-decoded, so `%xx` escapes apply and `+` reads as a space.
pub fn hid_from_query(query: &str) -> Option<String> {
    let query = query.split_once('?').map_or(query, |(_, q)| q);
    let query = query.split_once('#').map_or(query, |(q, _)| q);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == HID_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Fire at the cell named by `hid` and pick the result view.
///
/// Every failure (missing or malformed tag, no game, store error) degrades to
/// [`Route::Start`].
pub fn resolve_scan<S: GameStore>(session: &mut GameSession<S>, hid: Option<&str>) -> Route {
    let Some(hid) = hid else {
        log::warn!("scan without a tag identifier");
        return Route::Start;
    };
    match session.shoot_tag(hid) {
        Ok(outcome) => {
            let route = Route::from_outcome(&outcome);
            log::info!("tag {} -> {}", hid, route);
            route
        }
        Err(GameError::UninitializedGame) => {
            log::warn!("tag {} scanned with no game in progress", hid);
            Route::Start
        }
        Err(GameError::InvalidTagFormat(e)) => {
            log::warn!("invalid tag {:?}: {}", hid, e);
            Route::Start
        }
        Err(e) => {
            log::error!("error processing scan of {}: {}", hid, e);
            Route::Start
        }
    }
}

/// Read `hid` from the scanned page's query string, apply the shot and pick
/// the result view.
pub fn process_scan<S: GameStore>(session: &mut GameSession<S>, query: &str) -> Route {
    let hid = hid_from_query(query);
    resolve_scan(session, hid.as_deref())
}
