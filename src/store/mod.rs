mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

/// One registered account as persisted. `password_hash` never leaves the
/// store/auth layers; response shaping happens in the route DTOs.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub favorite_teams: Vec<i32>,
    pub favorite_players: Vec<i32>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteKind {
    Team,
    Player,
}

impl FavoriteKind {
    pub fn label(self) -> &'static str {
        match self {
            FavoriteKind::Team => "team",
            FavoriteKind::Player => "player",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    #[error("Already a favorite {kind}: {id}")]
    DuplicateFavorite { kind: &'static str, id: i32 },

    #[error("No user: {0}")]
    UserNotFound(String),

    #[error("{0}")]
    Backend(anyhow::Error),
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::Backend(err)
    }
}

/// The user record store. Every mutation is atomic with respect to
/// concurrent callers: an add of an id that is already present must fail
/// with `DuplicateFavorite` even when two adds race.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn update(&self, email: &str, patch: UserPatch) -> Result<User, StoreError>;

    async fn delete(&self, email: &str) -> Result<(), StoreError>;

    async fn favorites(&self, email: &str, kind: FavoriteKind) -> Result<Vec<i32>, StoreError>;

    /// Strict add: appending an id that is already present is an error.
    async fn add_favorite(
        &self,
        email: &str,
        kind: FavoriteKind,
        id: i32,
    ) -> Result<Vec<i32>, StoreError>;

    /// Lenient remove: removing an absent id returns the collection
    /// unchanged.
    async fn remove_favorite(
        &self,
        email: &str,
        kind: FavoriteKind,
        id: i32,
    ) -> Result<Vec<i32>, StoreError>;
}
