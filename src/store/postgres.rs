use async_trait::async_trait;
use sqlx::PgPool;

use super::{FavoriteKind, NewUser, StoreError, User, UserPatch, UserStore};

const USER_COLUMNS: &str =
    "email, password_hash, first_name, favorite_teams, favorite_players, created_at";

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.into())
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let inserted = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, first_name)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(row),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateEmail(user.email)),
            Err(e) => Err(backend(e)),
        }
    }

    async fn find(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)
    }

    async fn update(&self, email: &str, patch: UserPatch) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                password_hash = COALESCE($3, password_hash)
            WHERE email = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(&patch.first_name)
        .bind(&patch.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or_else(|| StoreError::UserNotFound(email.to_string()))
    }

    async fn delete(&self, email: &str) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, String>("DELETE FROM users WHERE email = $1 RETURNING email")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .map(|_| ())
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))
    }

    async fn favorites(&self, email: &str, kind: FavoriteKind) -> Result<Vec<i32>, StoreError> {
        let query = match kind {
            FavoriteKind::Team => "SELECT favorite_teams FROM users WHERE email = $1",
            FavoriteKind::Player => "SELECT favorite_players FROM users WHERE email = $1",
        };
        sqlx::query_scalar::<_, Vec<i32>>(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))
    }

    async fn add_favorite(
        &self,
        email: &str,
        kind: FavoriteKind,
        id: i32,
    ) -> Result<Vec<i32>, StoreError> {
        // Membership check and append happen in one statement, so two racing
        // adds of the same id cannot both succeed.
        let query = match kind {
            FavoriteKind::Team => {
                r#"
                UPDATE users
                SET favorite_teams = array_append(favorite_teams, $2)
                WHERE email = $1 AND NOT favorite_teams @> ARRAY[$2]
                RETURNING favorite_teams
                "#
            }
            FavoriteKind::Player => {
                r#"
                UPDATE users
                SET favorite_players = array_append(favorite_players, $2)
                WHERE email = $1 AND NOT favorite_players @> ARRAY[$2]
                RETURNING favorite_players
                "#
            }
        };
        let updated = sqlx::query_scalar::<_, Vec<i32>>(query)
            .bind(email)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        match updated {
            Some(list) => Ok(list),
            // No row matched: either the user is missing (surfaces from the
            // read below) or the id was already present.
            None => {
                self.favorites(email, kind).await?;
                Err(StoreError::DuplicateFavorite {
                    kind: kind.label(),
                    id,
                })
            }
        }
    }

    async fn remove_favorite(
        &self,
        email: &str,
        kind: FavoriteKind,
        id: i32,
    ) -> Result<Vec<i32>, StoreError> {
        let query = match kind {
            FavoriteKind::Team => {
                r#"
                UPDATE users
                SET favorite_teams = array_remove(favorite_teams, $2)
                WHERE email = $1
                RETURNING favorite_teams
                "#
            }
            FavoriteKind::Player => {
                r#"
                UPDATE users
                SET favorite_players = array_remove(favorite_players, $2)
                WHERE email = $1
                RETURNING favorite_players
                "#
            }
        };
        sqlx::query_scalar::<_, Vec<i32>>(query)
            .bind(email)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))
    }
}
