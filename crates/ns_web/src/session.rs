//! Server-side sessions keyed by a random id in the `ns_session` cookie.
//!
//! A session carries the logged-in user id and pending flash messages. The
//! cookie is only sent once the session actually holds something. Idle
//! sessions expire and the table is capped.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use ns_core::User;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::AppState;

pub const SESSION_COOKIE: &str = "ns_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Info,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Danger => "danger",
        }
    }
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Info, message: message.into() }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Danger, message: message.into() }
    }
}

/// Idle time after which a session is forgotten.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Upper bound on live sessions; the least recently used one is evicted first.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone)]
struct SessionData {
    user_id: Option<i64>,
    flashes: Vec<Flash>,
    last_seen: Instant,
    tick: u64,
}

impl SessionData {
    fn new(now: Instant) -> Self {
        Self {
            user_id: None,
            flashes: Vec::new(),
            last_seen: now,
            tick: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.flashes.is_empty()
    }
}

#[derive(Debug, Default)]
struct SessionTable {
    entries: HashMap<String, SessionData>,
    tick: u64,
}

#[derive(Debug)]
pub struct SessionStore {
    table: RwLock<SessionTable>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            table: RwLock::new(SessionTable::default()),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    fn is_live(&self, data: &SessionData, now: Instant) -> bool {
        now.duration_since(data.last_seen) < self.ttl
    }

    async fn contains(&self, id: &str) -> bool {
        let now = Instant::now();
        self.table
            .read()
            .await
            .entries
            .get(id)
            .is_some_and(|data| self.is_live(data, now))
    }

    async fn update<F: FnOnce(&mut SessionData)>(&self, id: &str, f: F) {
        let now = Instant::now();
        let mut table = self.table.write().await;
        table.tick += 1;
        let tick = table.tick;

        let existing = table.entries.remove(id);
        let known = existing.is_some();
        let mut data = existing.unwrap_or_else(|| SessionData::new(now));
        data.last_seen = now;
        data.tick = tick;
        f(&mut data);
        if data.is_empty() {
            return;
        }

        // only new entries can push the table over its limits
        if !known {
            self.make_room(&mut table, now);
        }
        table.entries.insert(id.to_string(), data);
    }

    /// Drop expired sessions, then evict the least recently touched ones
    /// until one more fits under the cap.
    fn make_room(&self, table: &mut SessionTable, now: Instant) {
        let before = table.entries.len();
        table.entries.retain(|_, data| self.is_live(data, now));

        while table.entries.len() >= self.max_sessions {
            let oldest = table
                .entries
                .iter()
                .min_by_key(|(_, data)| data.tick)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    table.entries.remove(&id);
                }
                None => break,
            }
        }

        let dropped = before - table.entries.len();
        if dropped > 0 {
            debug!(dropped, remaining = table.entries.len(), "Pruned sessions");
        }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.entries.is_empty()
    }
}

/// Request-scoped handle on the caller's session.
#[derive(Debug)]
pub struct Session {
    id: String,
    fresh: bool,
    store: Arc<SessionStore>,
}

impl Session {
    fn new(store: Arc<SessionStore>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            fresh: true,
            store,
        }
    }

    pub async fn user_id(&self) -> Option<i64> {
        self.store
            .table
            .read()
            .await
            .entries
            .get(&self.id)
            .and_then(|data| data.user_id)
    }

    /// Attach `user` to a new session id, carrying pending flashes over.
    pub async fn login(&mut self, user: &User) {
        let previous = self.store.table.write().await.entries.remove(&self.id);
        self.id = Uuid::new_v4().to_string();
        self.fresh = true;

        let flashes = previous.map(|data| data.flashes).unwrap_or_default();
        let user_id = user.id;
        self.store
            .update(&self.id, move |data| {
                data.user_id = Some(user_id);
                data.flashes = flashes;
            })
            .await;
    }

    pub async fn logout(&self) {
        self.store.update(&self.id, |data| data.user_id = None).await;
    }

    pub async fn flash(&self, flash: Flash) {
        self.store.update(&self.id, move |data| data.flashes.push(flash)).await;
    }

    pub async fn take_flashes(&self) -> Vec<Flash> {
        let mut flashes = Vec::new();
        self.store
            .update(&self.id, |data| flashes = std::mem::take(&mut data.flashes))
            .await;
        flashes
    }

    /// Finish the response, issuing the cookie if this session is new and
    /// has something stored.
    pub async fn finish(self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.fresh && self.store.contains(&self.id).await {
            let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }
}

fn session_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let store = state.sessions.clone();
        if let Some(id) = session_id_from(&parts.headers) {
            if store.contains(&id).await {
                return Ok(Session { id, fresh: false, store });
            }
        }
        Ok(Session::new(store))
    }
}
