use anyhow::Result;
use chirpy_types::models::{Chirp, User};
use chrono::Utc;
use uuid::Uuid;

use crate::Database;

/// Persistence operations the HTTP layer depends on.
///
/// Calls are blocking; callers on an async runtime should run them on the
/// blocking pool. Implementations serialize their own internal access.
pub trait Store: Send + Sync {
    /// Create a user. Fails if the email is already taken.
    fn create_user(&self, email: &str) -> Result<User>;

    /// Create a chirp with an already-filtered body.
    fn create_chirp(&self, body: &str, user_id: Option<Uuid>) -> Result<Chirp>;

    fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>>;

    /// All chirps, oldest first.
    fn get_chirps(&self) -> Result<Vec<Chirp>>;

    /// Delete every user and, with them, their chirps. Returns the number of
    /// users removed.
    fn delete_users(&self) -> Result<usize>;
}

impl Store for Database {
    fn create_user(&self, email: &str) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
        };
        self.insert_user(&user)?;
        Ok(user)
    }

    fn create_chirp(&self, body: &str, user_id: Option<Uuid>) -> Result<Chirp> {
        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id,
        };
        self.insert_chirp(&chirp)?;
        Ok(chirp)
    }

    fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>> {
        self.get_chirp_by_id(id)
    }

    fn get_chirps(&self) -> Result<Vec<Chirp>> {
        self.list_chirps()
    }

    fn delete_users(&self) -> Result<usize> {
        self.delete_all_users()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_through_trait_object() {
        let store: Box<dyn Store> = Box::new(Database::open_in_memory().unwrap());

        let user = store.create_user("a@example.com").unwrap();
        assert!(store.create_user("a@example.com").is_err());

        let chirp = store.create_chirp("hello", Some(user.id)).unwrap();
        assert_eq!(chirp.created_at, chirp.updated_at);
        assert_eq!(store.get_chirp(chirp.id).unwrap(), Some(chirp.clone()));
        assert_eq!(store.get_chirps().unwrap(), vec![chirp]);

        assert_eq!(store.delete_users().unwrap(), 1);
        assert!(store.get_chirps().unwrap().is_empty());
    }
}
