//! Many concurrent game sessions behind one registry.
//!
//! Each session key maps to its own [`GameSession`] guarded by an async mutex:
//! a scan holds the lock for the whole read-modify-write of that session's
//! blob, while scans on other sessions run in parallel. Store I/O runs on the
//! blocking pool. Only sessions with a game are held; clearing one drops it.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

use crate::common::{Coordinate, GameError, ShotOutcome, StoreError};
use crate::config::GameConfig;
use crate::game::{GameState, GameSummary};
use crate::placement::generate_fleet;
use crate::scan::{resolve_scan, Route};
use crate::session::GameSession;
use crate::store::GameStore;

type StoreFactory<S> = Box<dyn Fn(&str) -> S + Send + Sync>;
type SharedSession<S> = Arc<Mutex<GameSession<S>>>;

pub struct SessionHub<S: GameStore> {
    sessions: Mutex<HashMap<String, SharedSession<S>>>,
    make_store: StoreFactory<S>,
    config: GameConfig,
    rng: Mutex<SmallRng>,
}

impl<S> SessionHub<S>
where
    S: GameStore + Send + 'static,
{
    /// Registry creating each session's store with `make_store(key)`.
    ///
    /// A `seed` makes fleet generation reproducible across runs.
    pub fn new(
        config: GameConfig,
        seed: Option<u64>,
        make_store: impl Fn(&str) -> S + Send + Sync + 'static,
    ) -> Self {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Self {
            sessions: Mutex::new(HashMap::new()),
            make_store: Box::new(make_store),
            config,
            rng: Mutex::new(rng),
        }
    }

    fn fresh(&self, key: &str) -> GameSession<S> {
        GameSession::with_config((self.make_store)(key), self.config)
    }

    /// Session for `key`, opened if the registry does not hold it yet.
    async fn open(&self, key: &str) -> SharedSession<S> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.entry(key.to_string()).or_insert_with(|| {
            log::debug!("opening session {}", key);
            Arc::new(Mutex::new(self.fresh(key)))
        });
        Arc::clone(session)
    }

    async fn lookup(&self, key: &str) -> Option<SharedSession<S>> {
        self.sessions.lock().await.get(key).map(Arc::clone)
    }

    /// Session for `key` if it has a game, either held already or found in
    /// its store. Keys without a game are never registered.
    async fn existing(&self, key: &str) -> Result<Option<SharedSession<S>>, GameError> {
        if let Some(session) = self.lookup(key).await {
            return Ok(Some(session));
        }
        let session = self.fresh(key);
        let (session, stored) = blocking(move || {
            let stored = session.state();
            (session, stored)
        })
        .await?;
        if stored?.is_none() {
            return Ok(None);
        }
        let mut sessions = self.sessions.lock().await;
        let session = sessions.entry(key.to_string()).or_insert_with(|| {
            log::debug!("resuming session {}", key);
            Arc::new(Mutex::new(session))
        });
        Ok(Some(Arc::clone(session)))
    }

    /// Number of sessions currently held.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn new_game(&self, key: &str) -> Result<GameState, GameError> {
        let fleet = {
            let mut rng = self.rng.lock().await;
            generate_fleet(&mut *rng, &self.config)
        };
        let session = self.open(key).await;
        with_session(session, move |s| s.start_with(fleet)).await?
    }

    /// Apply a tag scan to `key`'s game and pick the result view.
    pub async fn scan(&self, key: &str, hid: &str) -> Route {
        let session = match self.existing(key).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                log::warn!("tag {} scanned in session {} with no game", hid, key);
                return Route::Start;
            }
            Err(e) => {
                log::error!("error opening session {}: {}", key, e);
                return Route::Start;
            }
        };
        let hid = hid.to_string();
        match with_session(session, move |s| resolve_scan(s, Some(hid.as_str()))).await {
            Ok(route) => route,
            Err(e) => {
                log::error!("scan in session {} failed: {}", key, e);
                Route::Start
            }
        }
    }

    pub async fn shoot(&self, key: &str, target: Coordinate) -> Result<ShotOutcome, GameError> {
        let session = self
            .existing(key)
            .await?
            .ok_or(GameError::UninitializedGame)?;
        with_session(session, move |s| s.process_shot(target)).await?
    }

    /// Current game of `key`; an unknown key is answered from its store
    /// without registering it.
    pub async fn state(&self, key: &str) -> Result<Option<GameState>, GameError> {
        let session = match self.lookup(key).await {
            Some(session) => session,
            None => {
                let session = self.fresh(key);
                return blocking(move || session.state()).await?;
            }
        };
        with_session(session, |s| s.state()).await?
    }

    pub async fn summary(&self, key: &str) -> Result<Option<GameSummary>, GameError> {
        Ok(self.state(key).await?.map(|s| s.summary()))
    }

    /// Remove `key`'s game and drop the session from the registry.
    pub async fn clear(&self, key: &str) -> Result<(), GameError> {
        let session = self.open(key).await;
        let guard = Arc::clone(&session).lock_owned().await;
        let (guard, cleared) = blocking(move || {
            let mut guard = guard;
            let cleared = guard.clear();
            (guard, cleared)
        })
        .await?;
        {
            let mut sessions = self.sessions.lock().await;
            if sessions.get(key).is_some_and(|held| Arc::ptr_eq(held, &session)) {
                sessions.remove(key);
                log::debug!("closed session {}", key);
            }
        }
        drop(guard);
        cleared
    }
}

/// Run store I/O off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, GameError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(out) => Ok(out),
        Err(e) => match e.try_into_panic() {
            Ok(panic) => std::panic::resume_unwind(panic),
            Err(e) => Err(StoreError::Io(format!("store task cancelled: {}", e)).into()),
        },
    }
}

/// Lock `session` and run `f` on it off the async workers.
async fn with_session<S, T, F>(session: SharedSession<S>, f: F) -> Result<T, GameError>
where
    S: GameStore + Send + 'static,
    F: FnOnce(&mut GameSession<S>) -> T + Send + 'static,
    T: Send + 'static,
{
    let mut guard = session.lock_owned().await;
    blocking(move || f(&mut *guard)).await
}
