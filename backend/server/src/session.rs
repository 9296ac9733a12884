//! # Sessions
//!
//! In-memory only. A session is keyed by a random UUID in the `session` cookie and dropped
//! once it has been idle longer than the configured TTL. Nothing survives a restart, and a
//! browser without the cookie simply starts over at the address step.
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::container::SessionScope;

pub const SESSION_COOKIE_NAME: &str = "session";

struct Entry {
    scope: SessionScope,
    last_seen: Instant,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the scope for the cookie's session, starting a new one when missing or expired.
    /// The returned jar carries the cookie to send back.
    pub fn open(&self, jar: CookieJar) -> (CookieJar, SessionScope) {
        let existing = jar
            .get(SESSION_COOKIE_NAME)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

        if let Some(id) = existing {
            if let Some(scope) = self.touch(id) {
                return (jar, scope);
            }
        }

        let (id, scope) = self.create();
        (jar.add(session_cookie(id)), scope)
    }

    pub fn get(&self, id: Uuid) -> Option<SessionScope> {
        self.touch(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn prune(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();

        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.ttl);

        let removed = before - sessions.len();
        if removed > 0 {
            debug!("Pruned {removed} idle sessions");
        }

        removed
    }

    fn touch(&self, id: Uuid) -> Option<SessionScope> {
        let now = Instant::now();
        let mut sessions = self.sessions.write();
        let expired = now.duration_since(sessions.get(&id)?.last_seen) >= self.ttl;

        if expired {
            sessions.remove(&id);
            return None;
        }

        let entry = sessions.get_mut(&id)?;
        entry.last_seen = now;
        Some(entry.scope.clone())
    }

    fn create(&self) -> (Uuid, SessionScope) {
        self.prune();

        let id = Uuid::new_v4();
        let scope = SessionScope::new();

        self.sessions.write().insert(
            id,
            Entry {
                scope: scope.clone(),
                last_seen: Instant::now(),
            },
        );
        debug!("Started session {id}");

        (id, scope)
    }
}

pub fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
