use anyhow::{Result, anyhow, bail};
use chirpy_types::models::{Chirp, User};
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::Store;

/// In-process store with the same constraints as the SQLite schema: unique
/// emails, chirp authors must exist, deleting users removes their chirps.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    chirps: Vec<Chirp>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().map(|t| t.users.len()).unwrap_or_default()
    }

    pub fn chirp_count(&self) -> usize {
        self.inner.lock().map(|t| t.chirps.len()).unwrap_or_default()
    }

    fn with_tables<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Tables) -> Result<T>,
    {
        let mut tables = self.inner.lock().map_err(|e| anyhow!("store lock poisoned: {}", e))?;
        f(&mut tables)
    }
}

impl Store for MemoryStore {
    fn create_user(&self, email: &str) -> Result<User> {
        self.with_tables(|t| {
            if t.users.iter().any(|u| u.email == email) {
                bail!("UNIQUE constraint failed: users.email");
            }
            let now = Utc::now();
            let user = User {
                id: Uuid::new_v4(),
                created_at: now,
                updated_at: now,
                email: email.to_string(),
            };
            t.users.push(user.clone());
            Ok(user)
        })
    }

    fn create_chirp(&self, body: &str, user_id: Option<Uuid>) -> Result<Chirp> {
        self.with_tables(|t| {
            if let Some(uid) = user_id {
                if !t.users.iter().any(|u| u.id == uid) {
                    bail!("FOREIGN KEY constraint failed: chirps.user_id {}", uid);
                }
            }
            let now = Utc::now();
            let chirp = Chirp {
                id: Uuid::new_v4(),
                created_at: now,
                updated_at: now,
                body: body.to_string(),
                user_id,
            };
            t.chirps.push(chirp.clone());
            Ok(chirp)
        })
    }

    fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>> {
        self.with_tables(|t| Ok(t.chirps.iter().find(|c| c.id == id).cloned()))
    }

    fn get_chirps(&self) -> Result<Vec<Chirp>> {
        self.with_tables(|t| Ok(t.chirps.clone()))
    }

    fn delete_users(&self) -> Result<usize> {
        self.with_tables(|t| {
            let removed = t.users.len();
            t.users.clear();
            t.chirps.retain(|c| c.user_id.is_none());
            Ok(removed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_schema_constraints() {
        let store = MemoryStore::new();
        let user = store.create_user("a@example.com").unwrap();
        assert!(store.create_user("a@example.com").is_err());
        assert!(store.create_chirp("ghost", Some(Uuid::new_v4())).is_err());

        store.create_chirp("mine", Some(user.id)).unwrap();
        let anon = store.create_chirp("anon", None).unwrap();
        assert_eq!(store.chirp_count(), 2);

        assert_eq!(store.delete_users().unwrap(), 1);
        assert_eq!(store.user_count(), 0);
        assert_eq!(store.get_chirps().unwrap(), vec![anon]);
    }
}
