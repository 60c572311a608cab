use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use super::{FavoriteKind, NewUser, StoreError, User, UserPatch, UserStore};

/// Mutex-backed store with the same contract as the Postgres one; the lock
/// is held across each read-modify-write, so the set semantics hold under
/// concurrent calls. Backs the HTTP integration tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn list(user: &User, kind: FavoriteKind) -> &Vec<i32> {
    match kind {
        FavoriteKind::Team => &user.favorite_teams,
        FavoriteKind::Player => &user.favorite_players,
    }
}

fn list_mut(user: &mut User, kind: FavoriteKind) -> &mut Vec<i32> {
    match kind {
        FavoriteKind::Team => &mut user.favorite_teams,
        FavoriteKind::Player => &mut user.favorite_players,
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        let row = User {
            email: user.email.clone(),
            password_hash: user.password_hash,
            first_name: user.first_name,
            favorite_teams: Vec::new(),
            favorite_players: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.email, row.clone());
        Ok(row)
    }

    async fn find(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }

    async fn update(&self, email: &str, patch: UserPatch) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(password_hash) = patch.password_hash {
            user.password_hash = password_hash;
        }
        Ok(user.clone())
    }

    async fn delete(&self, email: &str) -> Result<(), StoreError> {
        self.users
            .lock()
            .unwrap()
            .remove(email)
            .map(|_| ())
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))
    }

    async fn favorites(&self, email: &str, kind: FavoriteKind) -> Result<Vec<i32>, StoreError> {
        let users = self.users.lock().unwrap();
        let user = users
            .get(email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;
        Ok(list(user, kind).clone())
    }

    async fn add_favorite(
        &self,
        email: &str,
        kind: FavoriteKind,
        id: i32,
    ) -> Result<Vec<i32>, StoreError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;
        let ids = list_mut(user, kind);
        if ids.contains(&id) {
            return Err(StoreError::DuplicateFavorite {
                kind: kind.label(),
                id,
            });
        }
        ids.push(id);
        Ok(ids.clone())
    }

    async fn remove_favorite(
        &self,
        email: &str,
        kind: FavoriteKind,
        id: i32,
    ) -> Result<Vec<i32>, StoreError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;
        let ids = list_mut(user, kind);
        ids.retain(|existing| *existing != id);
        Ok(ids.clone())
    }
}
