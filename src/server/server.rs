use anyhow::{Context, Result};
use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::{error, info, warn};

use crate::catalog::Catalog;
use crate::config::SessionSecret;
use crate::presenter::HtmlRenderer;
use crate::user::{CredentialStore, SessionGate};
use axum_extra::extract::cookie::SignedCookieJar;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};

use super::session::{
    removal_cookie, session_cookie, ApiSession, Session, SessionStore, COOKIE_SESSION_KEY,
};
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

// No Debug: the password must not end up in logs.
#[derive(Deserialize)]
struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
struct CategoriesQuery {
    /// Substring of a name or description, ignoring case.
    pub q: Option<String>,
}

#[derive(Serialize)]
struct CategoryBody<'a> {
    name: &'a str,
    description: &'a str,
    links: &'a [String],
}

fn render_login(html: &HtmlRenderer, error: Option<&str>, status: StatusCode) -> Response {
    match html.render_login_page(error) {
        Ok(page) => (status, Html(page)).into_response(),
        Err(err) => {
            error!("Failed to render login page: {:#}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn statics(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    };
    Json(stats)
}

async fn index(session: Session, State(state): State<ServerState>) -> Response {
    match state
        .html
        .render_index_page(&state.catalog, &session.username)
    {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            error!("Failed to render index page: {:#}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn get_login(State(html): State<GuardedHtmlRenderer>) -> Response {
    render_login(&html, None, StatusCode::OK)
}

async fn post_login(
    State(state): State<ServerState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.gate.authenticate(&form.username, &form.password) {
        Ok(username) => {
            if let Some(previous) = jar.get(COOKIE_SESSION_KEY) {
                state.sessions.remove(previous.value());
            }
            let token = state.sessions.create(&username);
            info!("User {} logged in", username);
            let jar = jar.add(session_cookie(&token, state.sessions.ttl()));
            (jar, Redirect::to("/")).into_response()
        }
        Err(err) => {
            warn!("Failed login attempt for user {:?}", form.username);
            render_login(&state.html, Some(&err.to_string()), StatusCode::OK)
        }
    }
}

async fn logout(State(sessions): State<GuardedSessionStore>, jar: SignedCookieJar) -> Response {
    if let Some(cookie) = jar.get(COOKIE_SESSION_KEY) {
        if let Some(username) = sessions.remove(cookie.value()) {
            info!("User {} logged out", username);
        }
    }
    let jar = jar.remove(removal_cookie());
    (jar, Redirect::to("/login")).into_response()
}

async fn get_categories(
    _session: ApiSession,
    State(catalog): State<GuardedCatalog>,
    Query(query): Query<CategoriesQuery>,
) -> Response {
    // No query matches every category, same as an empty one
    let body: Vec<CategoryBody> = catalog
        .search(query.q.as_deref().unwrap_or(""))
        .map(|(name, category)| CategoryBody {
            name,
            description: &category.description,
            links: &category.links,
        })
        .collect();
    Json(body).into_response()
}

async fn get_category(
    _session: ApiSession,
    State(catalog): State<GuardedCatalog>,
    Path(name): Path<String>,
) -> Response {
    match catalog.find(&name) {
        Ok((name, category)) => Json(CategoryBody {
            name,
            description: &category.description,
            links: &category.links,
        })
        .into_response(),
        Err(err) => (StatusCode::NOT_FOUND, err.to_string()).into_response(),
    }
}

impl ServerState {
    fn new(
        config: ServerConfig,
        catalog: Arc<Catalog>,
        credentials: Arc<dyn CredentialStore>,
        secret: &SessionSecret,
    ) -> Result<ServerState> {
        let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_sec));
        Ok(ServerState {
            config,
            start_time: Instant::now(),
            catalog,
            gate: Arc::new(SessionGate::new(credentials)),
            sessions: Arc::new(sessions),
            html: Arc::new(HtmlRenderer::new()?),
            cookie_key: secret.cookie_key(),
            hash: env!("GIT_HASH").to_owned(),
        })
    }
}

pub fn make_app(
    config: ServerConfig,
    catalog: Arc<Catalog>,
    credentials: Arc<dyn CredentialStore>,
    secret: &SessionSecret,
) -> Result<Router> {
    let state = ServerState::new(config, catalog, credentials, secret)?;

    let page_routes: Router = Router::new()
        .route("/", get(index))
        .route("/login", get(get_login).post(post_login))
        .route("/logout", get(logout))
        .with_state(state.clone());

    let api_routes: Router = Router::new()
        .route("/statics", get(statics))
        .route("/categories", get(get_categories))
        .route("/categories/{name}", get(get_category))
        .with_state(state.clone());

    let app: Router = page_routes
        .nest("/v1", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(err) => {
            error!("Could not listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await
        }
    }
}

pub async fn run_server(
    config: ServerConfig,
    catalog: Catalog,
    credentials: Arc<dyn CredentialStore>,
    secret: &SessionSecret,
) -> Result<()> {
    let address = SocketAddr::new(config.bind_address, config.port);
    let app = make_app(config, Arc::new(catalog), credentials, secret)?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}
