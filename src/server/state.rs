use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::catalog::Catalog;
use crate::presenter::HtmlRenderer;
use crate::user::SessionGate;
use std::sync::Arc;
use std::time::Instant;

use super::session::SessionStore;
use super::ServerConfig;

pub type GuardedCatalog = Arc<Catalog>;
pub type GuardedSessionGate = Arc<SessionGate>;
pub type GuardedSessionStore = Arc<SessionStore>;
pub type GuardedHtmlRenderer = Arc<HtmlRenderer>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: GuardedCatalog,
    pub gate: GuardedSessionGate,
    pub sessions: GuardedSessionStore,
    pub html: GuardedHtmlRenderer,
    pub cookie_key: Key,
    pub hash: String,
}

impl FromRef<ServerState> for GuardedCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for GuardedSessionGate {
    fn from_ref(input: &ServerState) -> Self {
        input.gate.clone()
    }
}

impl FromRef<ServerState> for GuardedSessionStore {
    fn from_ref(input: &ServerState) -> Self {
        input.sessions.clone()
    }
}

impl FromRef<ServerState> for GuardedHtmlRenderer {
    fn from_ref(input: &ServerState) -> Self {
        input.html.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

// Lets handlers take a `SignedCookieJar` directly.
impl FromRef<ServerState> for Key {
    fn from_ref(input: &ServerState) -> Self {
        input.cookie_key.clone()
    }
}
