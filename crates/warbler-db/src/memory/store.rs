//! Single-lock in-memory implementation of the user, follow, and message repositories
//!
//! All three repositories share one `MemoryState` behind a `parking_lot::RwLock`,
//! so every check-then-write (existence of both follow endpoints, message
//! authorship) happens under one write guard. The guard is never held across
//! an `.await`.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use warbler_core::{
    DomainError, FollowEdge, FollowRepository, Message, MessageRepository, RepoResult, Snowflake,
    User, UserRepository,
};

#[derive(Debug, Default)]
struct MemoryState {
    /// User rows with their password hash
    users: HashMap<Snowflake, (User, String)>,
    usernames: HashMap<String, Snowflake>,
    emails: HashMap<String, Snowflake>,
    /// follower -> followed
    following: HashMap<Snowflake, HashSet<Snowflake>>,
    /// Edges in insertion order
    edges: Vec<FollowEdge>,
    /// Keyed by Snowflake, so iteration order is creation order
    messages: BTreeMap<Snowflake, Message>,
}

impl MemoryState {
    fn require_user(&self, id: Snowflake) -> RepoResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::UserNotFound(id))
        }
    }

    fn edge_exists(&self, follower_id: Snowflake, followed_id: Snowflake) -> bool {
        self.following
            .get(&follower_id)
            .is_some_and(|set| set.contains(&followed_id))
    }

    fn users_where(&self, pick: impl Fn(&FollowEdge) -> Option<Snowflake>) -> Vec<User> {
        self.edges
            .iter()
            .filter_map(pick)
            .filter_map(|id| self.users.get(&id).map(|(user, _)| user.clone()))
            .collect()
    }

    fn newest_messages(&self, limit: i64, keep: impl Fn(&Message) -> bool) -> Vec<Message> {
        let limit = usize::try_from(limit).unwrap_or(0);
        self.messages
            .values()
            .rev()
            .filter(|m| keep(m))
            .take(limit)
            .cloned()
            .collect()
    }
}

/// In-memory store implementing `UserRepository`, `FollowRepository`, and
/// `MessageRepository`. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.state.read().users.get(&id).map(|(user, _)| user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let state = self.state.read();
        Ok(state
            .usernames
            .get(username)
            .and_then(|id| state.users.get(id))
            .map(|(user, _)| user.clone()))
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self.state.read().usernames.contains_key(username))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.state.read().emails.contains_key(email))
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.write();

        if state.usernames.contains_key(&user.username) {
            return Err(DomainError::UsernameTaken);
        }
        if state.emails.contains_key(&user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }

        state.usernames.insert(user.username.clone(), user.id);
        state.emails.insert(user.email.clone(), user.id);
        state
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.state.read().users.get(&id).map(|(_, hash)| hash.clone()))
    }
}

#[async_trait]
impl FollowRepository for MemoryStore {
    #[instrument(skip(self, edge), fields(follower_id = %edge.follower_id, followed_id = %edge.followed_id))]
    async fn follow(&self, edge: &FollowEdge) -> RepoResult<bool> {
        if edge.follower_id == edge.followed_id {
            return Err(DomainError::SelfFollow);
        }

        let mut state = self.state.write();
        state.require_user(edge.follower_id)?;
        state.require_user(edge.followed_id)?;

        let inserted = state
            .following
            .entry(edge.follower_id)
            .or_default()
            .insert(edge.followed_id);
        if inserted {
            state.edges.push(edge.clone());
            debug!("Follow edge stored");
        }
        Ok(inserted)
    }

    async fn unfollow(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.write();

        let removed = state
            .following
            .get_mut(&follower_id)
            .is_some_and(|set| set.remove(&followed_id));
        if removed {
            state.edges.retain(|e| !e.connects(follower_id, followed_id));
        }
        Ok(removed)
    }

    async fn is_following(
        &self,
        follower_id: Snowflake,
        followed_id: Snowflake,
    ) -> RepoResult<bool> {
        Ok(self.state.read().edge_exists(follower_id, followed_id))
    }

    async fn find_followers(&self, user_id: Snowflake) -> RepoResult<Vec<User>> {
        Ok(self
            .state
            .read()
            .users_where(|e| (e.followed_id == user_id).then_some(e.follower_id)))
    }

    async fn find_following(&self, user_id: Snowflake) -> RepoResult<Vec<User>> {
        Ok(self
            .state
            .read()
            .users_where(|e| (e.follower_id == user_id).then_some(e.followed_id)))
    }

    async fn count_followers(&self, user_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.read();
        Ok(state.edges.iter().filter(|e| e.followed_id == user_id).count() as i64)
    }

    async fn count_following(&self, user_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.read();
        Ok(state.following.get(&user_id).map_or(0, HashSet::len) as i64)
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        Ok(self.state.read().messages.get(&id).cloned())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        let mut state = self.state.write();
        state.require_user(message.author_id)?;
        state.messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn find_by_author(&self, author_id: Snowflake, limit: i64) -> RepoResult<Vec<Message>> {
        Ok(self
            .state
            .read()
            .newest_messages(limit, |m| m.author_id == author_id))
    }

    async fn find_timeline(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Message>> {
        let state = self.state.read();
        let followed = state.following.get(&user_id);
        Ok(state.newest_messages(limit, |m| {
            m.author_id == user_id || followed.is_some_and(|set| set.contains(&m.author_id))
        }))
    }

    #[instrument(skip(self))]
    async fn delete_authored(&self, id: Snowflake, requester_id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.write();

        let message = state
            .messages
            .get(&id)
            .ok_or(DomainError::MessageNotFound(id))?;
        if !message.is_authored_by(requester_id) {
            return Err(DomainError::NotMessageAuthor);
        }

        state.messages.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warbler_core::SnowflakeGenerator;

    struct Fixture {
        store: MemoryStore,
        ids: SnowflakeGenerator,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: MemoryStore::new(),
                ids: SnowflakeGenerator::new(1),
            }
        }

        async fn user(&self, name: &str) -> Snowflake {
            let user = User::new(self.ids.generate(), name.to_string(), format!("{name}@test.com"));
            UserRepository::create(&self.store, &user, "hash").await.unwrap();
            user.id
        }

        async fn message(&self, author: Snowflake, text: &str) -> Snowflake {
            let message = Message::new(self.ids.generate(), author, text.to_string());
            MessageRepository::create(&self.store, &message).await.unwrap();
            message.id
        }

        async fn follow(&self, a: Snowflake, b: Snowflake) -> bool {
            self.store
                .follow(&FollowEdge::new(a, b).unwrap())
                .await
                .unwrap()
        }
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicates() {
        let fx = Fixture::new();
        fx.user("alice").await;

        let dup_name = User::new(fx.ids.generate(), "alice".to_string(), "x@test.com".to_string());
        assert!(matches!(
            UserRepository::create(&fx.store, &dup_name, "h").await,
            Err(DomainError::UsernameTaken)
        ));

        let dup_email = User::new(fx.ids.generate(), "bob".to_string(), "alice@test.com".to_string());
        assert!(matches!(
            UserRepository::create(&fx.store, &dup_email, "h").await,
            Err(DomainError::EmailAlreadyExists)
        ));

        assert!(fx.store.username_exists("alice").await.unwrap());
        assert!(!fx.store.username_exists("bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_user_and_hash() {
        let fx = Fixture::new();
        let id = fx.user("alice").await;

        let found = fx.store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(fx.store.get_password_hash(id).await.unwrap().as_deref(), Some("hash"));
        assert!(UserRepository::find_by_id(&fx.store, Snowflake::new(1))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_follow_is_directed_and_idempotent() {
        let fx = Fixture::new();
        let a = fx.user("a").await;
        let b = fx.user("b").await;

        assert!(fx.follow(a, b).await);
        assert!(!fx.follow(a, b).await);

        assert!(fx.store.is_following(a, b).await.unwrap());
        assert!(!fx.store.is_following(b, a).await.unwrap());
        assert_eq!(fx.store.count_followers(b).await.unwrap(), 1);
        assert_eq!(fx.store.count_following(a).await.unwrap(), 1);
        assert_eq!(fx.store.count_following(b).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_follow_requires_both_users() {
        let fx = Fixture::new();
        let a = fx.user("a").await;
        let ghost = Snowflake::new(77);

        let result = fx.store.follow(&FollowEdge::new(a, ghost).unwrap()).await;
        assert!(matches!(result, Err(DomainError::UserNotFound(id)) if id == ghost));
        assert_eq!(fx.store.count_following(a).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unfollow() {
        let fx = Fixture::new();
        let a = fx.user("a").await;
        let b = fx.user("b").await;

        assert!(!fx.store.unfollow(a, b).await.unwrap());
        fx.follow(a, b).await;
        assert!(fx.store.unfollow(a, b).await.unwrap());
        assert!(!fx.store.is_following(a, b).await.unwrap());
        assert!(fx.store.find_followers(b).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listings_follow_edge_order() {
        let fx = Fixture::new();
        let target = fx.user("target").await;
        let c = fx.user("c").await;
        let a = fx.user("a").await;
        let b = fx.user("b").await;

        fx.follow(c, target).await;
        fx.follow(a, target).await;
        fx.follow(b, target).await;

        let names: Vec<_> = fx
            .store
            .find_followers(target)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, ["c", "a", "b"]);

        fx.follow(target, b).await;
        fx.follow(target, a).await;
        let ids: Vec<_> = fx
            .store
            .find_following(target)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, [b, a]);
    }

    #[tokio::test]
    async fn test_message_requires_author() {
        let fx = Fixture::new();
        let orphan = Message::new(fx.ids.generate(), Snowflake::new(5), "hi".to_string());
        assert!(matches!(
            MessageRepository::create(&fx.store, &orphan).await,
            Err(DomainError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_timeline_includes_self_and_followed() {
        let fx = Fixture::new();
        let me = fx.user("me").await;
        let friend = fx.user("friend").await;
        let stranger = fx.user("stranger").await;
        fx.follow(me, friend).await;

        let m1 = fx.message(me, "mine").await;
        let m2 = fx.message(friend, "friend's").await;
        fx.message(stranger, "not shown").await;

        let timeline = fx.store.find_timeline(me, 100).await.unwrap();
        let ids: Vec<_> = timeline.iter().map(|m| m.id).collect();
        assert_eq!(ids, [m2, m1]);

        assert_eq!(fx.store.find_timeline(me, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_author_newest_first() {
        let fx = Fixture::new();
        let me = fx.user("me").await;
        let first = fx.message(me, "one").await;
        let second = fx.message(me, "two").await;

        let ids: Vec<_> = fx
            .store
            .find_by_author(me, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, [second, first]);
    }

    #[tokio::test]
    async fn test_delete_authored() {
        let fx = Fixture::new();
        let author = fx.user("author").await;
        let other = fx.user("other").await;
        let id = fx.message(author, "hello").await;

        assert!(matches!(
            fx.store.delete_authored(id, other).await,
            Err(DomainError::NotMessageAuthor)
        ));
        assert!(MessageRepository::find_by_id(&fx.store, id)
            .await
            .unwrap()
            .is_some());

        fx.store.delete_authored(id, author).await.unwrap();
        assert!(MessageRepository::find_by_id(&fx.store, id)
            .await
            .unwrap()
            .is_none());

        assert!(matches!(
            fx.store.delete_authored(id, author).await,
            Err(DomainError::MessageNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_follows_single_edge() {
        let fx = Fixture::new();
        let a = fx.user("a").await;
        let b = fx.user("b").await;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = fx.store.clone();
                tokio::spawn(async move { store.follow(&FollowEdge::new(a, b).unwrap()).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(fx.store.count_followers(b).await.unwrap(), 1);
    }
}
