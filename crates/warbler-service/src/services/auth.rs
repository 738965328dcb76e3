//! Authentication service
//!
//! Account creation, login, logout, and per-request session resolution.
//! A session token is only honoured while its server-side session exists.

use chrono::Duration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;
use warbler_common::AppError;
use warbler_core::{DomainError, Session, SessionContext, User};

use crate::dto::{CurrentUserResponse, LoginRequest, SessionGrant, SignupRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an account and sign it in
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<SessionGrant> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(DomainError::UsernameTaken.into());
        }
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let user = User::new(self.ctx.generate_id(), request.username, request.email)
            .with_image_url(request.image_url);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");
        self.open_session(&user).await
    }

    /// Verify credentials and sign in
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<SessionGrant> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown username");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if let Err(e) = self
            .ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User logged in");
        self.open_session(&user).await
    }

    /// Revoke the session behind `token`. Unknown or invalid tokens are ignored.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> ServiceResult<()> {
        let Ok(claims) = self.ctx.session_tokens().decode(token) else {
            debug!("Logout with an unusable token");
            return Ok(());
        };

        if self.ctx.session_store().revoke(claims.session_id()).await? {
            info!(user_id = %claims.sub, "User logged out");
        }
        Ok(())
    }

    /// Resolve a session token to the identity making the request.
    ///
    /// Malformed, expired, or revoked tokens resolve to `Anonymous`.
    /// Storage failures are errors.
    #[instrument(skip(self, token))]
    pub async fn resolve_session(&self, token: &str) -> ServiceResult<SessionContext> {
        let claims = match self.ctx.session_tokens().decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Rejected session token");
                return Ok(SessionContext::Anonymous);
            }
        };
        let Ok(user_id) = claims.user_id() else {
            return Ok(SessionContext::Anonymous);
        };

        let session = self.ctx.session_store().find(claims.session_id()).await?;
        match session {
            Some(session) if session.user_id == user_id && !session.is_expired() => {
                Ok(SessionContext::Authenticated(user_id))
            }
            _ => Ok(SessionContext::Anonymous),
        }
    }

    async fn open_session(&self, user: &User) -> ServiceResult<SessionGrant> {
        let tokens = self.ctx.session_tokens();
        let session = Session::new(
            Uuid::new_v4().to_string(),
            user.id,
            Duration::seconds(tokens.ttl_seconds()),
        );

        self.ctx.session_store().create(&session).await?;
        let token = tokens.issue(&session)?;

        Ok(SessionGrant {
            token,
            expires_at: session.expires_at,
            user: CurrentUserResponse::from(user),
        })
    }
}
