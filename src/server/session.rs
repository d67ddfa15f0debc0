use super::state::ServerState;
use crate::user::SessionToken;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

pub const COOKIE_SESSION_KEY: &str = "compass4vets_session";

struct SessionEntry {
    username: String,
    created: Instant,
    last_used: Instant,
}

/// Server-side record of authenticated sessions, keyed by the token carried in the cookie.
pub struct SessionStore {
    ttl: Duration,
    entries: Mutex<HashMap<SessionToken, SessionEntry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionToken, SessionEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(&self, username: &str) -> SessionToken {
        self.evict_expired();
        let token = SessionToken::generate();
        let now = Instant::now();
        self.lock().insert(
            token.clone(),
            SessionEntry {
                username: username.to_owned(),
                created: now,
                last_used: now,
            },
        );
        token
    }

    /// Returns the username bound to `token` and marks the session as used.
    /// An idle session past its TTL is dropped and reported as absent.
    pub fn resolve(&self, token: &str) -> Option<String> {
        let key = SessionToken(token.to_owned());
        let mut entries = self.lock();
        let now = Instant::now();
        let entry = entries.get_mut(&key)?;
        if now.duration_since(entry.last_used) > self.ttl {
            debug!("Session of {} expired", entry.username);
            entries.remove(&key);
            return None;
        }
        entry.last_used = now;
        Some(entry.username.clone())
    }

    pub fn remove(&self, token: &str) -> Option<String> {
        let entry = self.lock().remove(&SessionToken(token.to_owned()))?;
        debug!(
            "Removed session of {} after {}s",
            entry.username,
            entry.created.elapsed().as_secs()
        );
        Some(entry.username)
    }

    pub fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.last_used) <= self.ttl);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

pub fn session_cookie(token: &SessionToken, ttl: Duration) -> Cookie<'static> {
    let max_age = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    Cookie::build((COOKIE_SESSION_KEY, token.0.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(COOKIE_SESSION_KEY).path("/").build()
}

/// An authenticated page request. Anonymous visitors are sent to the login form.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub token: String,
}

/// Same as [`Session`] for JSON endpoints, which answer 403 instead of redirecting.
#[derive(Debug, Clone)]
pub struct ApiSession(pub Session);

pub enum SessionExtractionError {
    LoginRequired,
    AccessDenied,
}

impl IntoResponse for SessionExtractionError {
    fn into_response(self) -> axum::response::Response {
        match self {
            SessionExtractionError::LoginRequired => Redirect::to("/login").into_response(),
            SessionExtractionError::AccessDenied => StatusCode::FORBIDDEN.into_response(),
        }
    }
}

fn extract_session_from_request_parts(parts: &Parts, ctx: &ServerState) -> Option<Session> {
    let jar = SignedCookieJar::from_headers(&parts.headers, ctx.cookie_key.clone());
    let token = match jar.get(COOKIE_SESSION_KEY) {
        Some(cookie) => cookie.value().to_owned(),
        None => {
            debug!("No valid session cookie.");
            return None;
        }
    };

    let username = match ctx.sessions.resolve(&token) {
        Some(username) => username,
        None => {
            debug!("Session token not found or expired");
            return None;
        }
    };

    Some(Session { username, token })
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = SessionExtractionError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        extract_session_from_request_parts(parts, ctx).ok_or(SessionExtractionError::LoginRequired)
    }
}

impl FromRequestParts<ServerState> for ApiSession {
    type Rejection = SessionExtractionError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        extract_session_from_request_parts(parts, ctx)
            .map(ApiSession)
            .ok_or(SessionExtractionError::AccessDenied)
    }
}
