//! Session middleware: resolves the session cookie, hands the handler a live
//! [`Session`], and writes the session back to the store afterwards.

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, Request, StatusCode,
    },
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::AppState;
use crate::config::ServerConfig;
use crate::session::Session;

/// Load (or start) the caller's session, run the handler, then persist.
pub async fn session_middleware(
    State(app): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let session = match session_id_from_headers(request.headers(), &app.config.cookie_name) {
        Some(id) => match app.store.load(id) {
            Ok(Some(data)) => Session::restore(id, data),
            Ok(None) => {
                tracing::debug!(session_id = %id, "Unknown or expired session, starting a new one");
                if let Err(e) = app.store.destroy(id) {
                    tracing::warn!(session_id = %id, "Failed to drop stale session: {:#}", e);
                }
                Session::fresh()
            }
            Err(e) => {
                tracing::error!("Failed to load session: {:#}", e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        },
        None => Session::fresh(),
    };

    request.extensions_mut().insert(session.clone());
    let mut response = next.run(request).await;

    let ttl = chrono::Duration::from_std(app.config.session_ttl)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    if let Err(e) = app.store.save(session.id(), &session.to_data(), ttl) {
        tracing::error!(session_id = %session.id(), "Failed to save session: {:#}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    if session.is_new() {
        tracing::debug!(session_id = %session.id(), "Started session");
    }

    // Re-sent on every response so the browser's expiry follows the store's.
    let cookie = session_cookie(&app.config, session.id());
    let value = HeaderValue::from_str(&cookie).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    response.headers_mut().append(SET_COOKIE, value);

    Ok(response)
}

/// Find the session id in the request's `Cookie` headers.
///
/// Malformed values are ignored, which starts a fresh session.
fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim_matches('"')).ok())
}

/// `Set-Cookie` value carrying the session id and its full lifetime.
fn session_cookie(config: &ServerConfig, id: Uuid) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.cookie_name,
        id,
        config.session_ttl.as_secs()
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}
