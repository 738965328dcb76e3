//! Session extractor
//!
//! Resolves the inbound session token to a `SessionContext` once per request.
//! The token is read from the session cookie, falling back to an
//! `Authorization: Bearer` header for non-browser clients.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use warbler_core::{DomainError, SessionContext, Snowflake};
use warbler_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Identity of the caller, `Anonymous` when no usable session was presented
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub context: SessionContext,
    /// Raw token as presented, kept so logout can revoke it
    pub token: Option<String>,
}

impl CurrentSession {
    pub fn anonymous() -> Self {
        Self {
            context: SessionContext::Anonymous,
            token: None,
        }
    }

    /// The signed-in user, or `Unauthenticated`
    pub fn require_auth(&self) -> Result<Snowflake, DomainError> {
        self.context.require_auth()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let from_cookie = CookieJar::from_headers(&parts.headers)
            .get(app_state.cookie_name())
            .map(|cookie| cookie.value().to_owned());

        let token = match from_cookie {
            Some(token) => Some(token),
            None => TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .ok()
                .map(|TypedHeader(Authorization(bearer))| bearer.token().to_owned()),
        };

        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(Self::anonymous());
        };

        let context = AuthService::new(app_state.service_context())
            .resolve_session(&token)
            .await?;

        Ok(Self {
            context,
            token: Some(token),
        })
    }
}
