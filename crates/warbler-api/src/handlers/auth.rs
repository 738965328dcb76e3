//! Authentication handlers
//!
//! Signup and login set the session cookie and redirect home; logout clears it.

use axum::extract::State;
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use warbler_service::{
    dto::{LoginRequest, SessionGrant, SignupRequest},
    AuthService,
};

use crate::extractors::{CurrentSession, ValidatedForm};
use crate::response::{ApiResult, Found, LOGIN_PATH};
use crate::state::AppState;

const HOME_PATH: &str = "/";

/// Create an account and sign in
///
/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(request): ValidatedForm<SignupRequest>,
) -> ApiResult<(CookieJar, Found)> {
    let grant = AuthService::new(state.service_context())
        .signup(request)
        .await?;
    Ok((jar.add(session_cookie(&state, grant)), Found::to(HOME_PATH)))
}

/// Sign in with username and password
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(request): ValidatedForm<LoginRequest>,
) -> ApiResult<(CookieJar, Found)> {
    let grant = AuthService::new(state.service_context())
        .login(request)
        .await?;
    Ok((jar.add(session_cookie(&state, grant)), Found::to(HOME_PATH)))
}

/// Revoke the current session
///
/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    session: CurrentSession,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Found)> {
    session.require_auth()?;

    if let Some(token) = session.token.as_deref() {
        AuthService::new(state.service_context())
            .logout(token)
            .await?;
    }

    let removal = Cookie::build(state.cookie_name().to_owned()).path("/");
    Ok((jar.remove(removal), Found::to(LOGIN_PATH)))
}

fn session_cookie(state: &AppState, grant: SessionGrant) -> Cookie<'static> {
    Cookie::build((state.cookie_name().to_owned(), grant.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config().session.cookie_secure)
        .build()
}
