//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! (PostgreSQL, Redis, or in-memory) provides the implementation.
//! Every mutating method is a single atomic unit in its implementation.

use async_trait::async_trait;

use crate::entities::{FollowEdge, Message, Session, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user. Fails with `UsernameTaken` or `EmailAlreadyExists`
    /// if a concurrent signup won the race.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Insert the edge if absent.
    ///
    /// Returns `true` when a new edge was written and `false` when it already
    /// existed. Fails with `UserNotFound` if either endpoint does not exist.
    async fn follow(&self, edge: &FollowEdge) -> RepoResult<bool>;

    /// Remove the edge if present. Returns `true` when an edge was removed.
    async fn unfollow(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool>;

    /// True iff the edge (follower_id, followed_id) exists
    async fn is_following(&self, follower_id: Snowflake, followed_id: Snowflake)
        -> RepoResult<bool>;

    /// Users following `user_id`, ordered by edge creation time
    async fn find_followers(&self, user_id: Snowflake) -> RepoResult<Vec<User>>;

    /// Users `user_id` follows, ordered by edge creation time
    async fn find_following(&self, user_id: Snowflake) -> RepoResult<Vec<User>>;

    /// Number of users following `user_id`
    async fn count_followers(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Number of users `user_id` follows
    async fn count_following(&self, user_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// Persist a new message. Fails with `UserNotFound` if the author is gone.
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Messages written by `author_id`, newest first
    async fn find_by_author(&self, author_id: Snowflake, limit: i64) -> RepoResult<Vec<Message>>;

    /// Messages written by `user_id` or anyone they follow, newest first
    async fn find_timeline(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Message>>;

    /// Delete a message on behalf of `requester_id`.
    ///
    /// The authorship check and the delete happen atomically. Fails with
    /// `MessageNotFound` if the message does not exist and `NotMessageAuthor`
    /// if the requester did not write it; in both cases nothing is removed.
    async fn delete_authored(&self, id: Snowflake, requester_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Session Store
// ============================================================================

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session until its expiry
    async fn create(&self, session: &Session) -> RepoResult<()>;

    /// Find a live session; expired sessions are reported as absent
    async fn find(&self, session_id: &str) -> RepoResult<Option<Session>>;

    /// Revoke a session. Returns `true` if it existed.
    async fn revoke(&self, session_id: &str) -> RepoResult<bool>;
}
