//! Service context - dependency container for services

use std::sync::Arc;

use warbler_common::{PasswordService, SessionTokenService};
use warbler_core::{
    FollowRepository, MessageRepository, SessionStore, Snowflake, SnowflakeGenerator,
    UserRepository, DEFAULT_MAX_MESSAGE_LENGTH,
};

use super::error::{ServiceError, ServiceResult};

/// Everything a service needs, passed explicitly to each service.
///
/// Storage backends are trait objects so PostgreSQL, Redis, and in-memory
/// implementations can be mixed.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    message_repo: Arc<dyn MessageRepository>,

    session_store: Arc<dyn SessionStore>,

    password_service: PasswordService,
    session_tokens: Arc<SessionTokenService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    /// Maximum message length in characters
    message_max_length: usize,
}

impl ServiceContext {
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    pub fn session_store(&self) -> &dyn SessionStore {
        self.session_store.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    pub fn session_tokens(&self) -> &SessionTokenService {
        self.session_tokens.as_ref()
    }

    pub fn message_max_length(&self) -> usize {
        self.message_max_length
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("session_tokens", &self.session_tokens)
            .field("message_max_length", &self.message_max_length)
            .finish_non_exhaustive()
    }
}

/// Builder for ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    session_store: Option<Arc<dyn SessionStore>>,
    session_tokens: Option<Arc<SessionTokenService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    message_max_length: Option<usize>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn session_tokens(mut self, service: Arc<SessionTokenService>) -> Self {
        self.session_tokens = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn message_max_length(mut self, max: usize) -> Self {
        self.message_max_length = Some(max);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` naming the first absent part
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: self
                .user_repo
                .ok_or(ServiceError::MissingDependency("user_repo"))?,
            follow_repo: self
                .follow_repo
                .ok_or(ServiceError::MissingDependency("follow_repo"))?,
            message_repo: self
                .message_repo
                .ok_or(ServiceError::MissingDependency("message_repo"))?,
            session_store: self
                .session_store
                .ok_or(ServiceError::MissingDependency("session_store"))?,
            password_service: PasswordService::new(),
            session_tokens: self
                .session_tokens
                .ok_or(ServiceError::MissingDependency("session_tokens"))?,
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
            message_max_length: self
                .message_max_length
                .unwrap_or(DEFAULT_MAX_MESSAGE_LENGTH),
        })
    }
}
