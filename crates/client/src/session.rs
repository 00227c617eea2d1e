use tracing::{debug, warn};

use crate::{
    error::ClientError,
    storage::{keys, Storage},
};

/// A user that can be picked without signing in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownUser {
    pub id: &'static str,
    pub name: &'static str,
}

pub const KNOWN_USERS: [KnownUser; 3] = [
    KnownUser { id: "1", name: "Tomi" },
    KnownUser { id: "2", name: "Juan" },
    KnownUser { id: "3", name: "Anita" },
];

/// The category picked on the categories page
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedCategory {
    pub id: i64,
    pub name: String,
}

/// Who is using the app and what they are looking at, persisted in storage so
/// a reload lands on the same page
#[derive(Debug, Clone)]
pub struct Session<S> {
    storage: S,
}

impl<S: Storage> Session<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Starts a session for `user_id`, either a known user id or one handed
    /// out by an identity provider. Anything left from a previous session,
    /// including a copied routine, is dropped
    pub fn login(&self, user_id: &str) -> Result<(), ClientError> {
        self.storage.clear();
        self.storage.set(keys::USER_ID, user_id)?;
        debug!(user_id, "Logged in");
        Ok(())
    }

    pub fn logout(&self) {
        self.storage.clear();
        debug!("Logged out");
    }

    pub fn user_id(&self) -> Option<String> {
        self.storage.get(keys::USER_ID)
    }

    /// Display name of the user if they were picked from [`KNOWN_USERS`]
    pub fn user_name(&self) -> Option<&'static str> {
        let user_id = self.user_id()?;
        KNOWN_USERS.iter().find(|u| u.id == user_id).map(|u| u.name)
    }

    pub fn select_category(&self, id: i64, name: &str) -> Result<(), ClientError> {
        self.storage.remove(keys::WORKOUT_ID);
        self.storage.set(keys::CATEGORY_ID, &id.to_string())?;
        self.storage.set(keys::CATEGORY_NAME, name)
    }

    /// Forgets the category, done whenever the category list is shown again
    pub fn clear_category(&self) {
        self.storage.remove(keys::CATEGORY_ID);
        self.storage.remove(keys::CATEGORY_NAME);
        self.storage.remove(keys::WORKOUT_ID);
    }

    pub fn category(&self) -> Option<SelectedCategory> {
        let id = parse_id(keys::CATEGORY_ID, self.storage.get(keys::CATEGORY_ID)?)?;
        let name = self.storage.get(keys::CATEGORY_NAME).unwrap_or_default();
        Some(SelectedCategory { id, name })
    }

    pub fn select_workout(&self, id: i64) -> Result<(), ClientError> {
        self.storage.set(keys::WORKOUT_ID, &id.to_string())
    }

    pub fn workout_id(&self) -> Option<i64> {
        parse_id(keys::WORKOUT_ID, self.storage.get(keys::WORKOUT_ID)?)
    }
}

fn parse_id(key: &str, value: String) -> Option<i64> {
    match value.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(key, %value, ?e, "Ignoring unparsable id in storage");
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::{SelectedCategory, Session};
    use crate::storage::{keys, MemoryStorage, Storage};

    #[test]
    fn test_login_clears_previous_session() {
        let storage = MemoryStorage::new();
        storage.set(keys::COPIED_WORKOUT, "{}").unwrap();
        let session = Session::new(storage.clone());

        session.login("1").unwrap();
        session.select_category(4, "Push Day").unwrap();
        session.select_workout(9).unwrap();

        session.login("3").unwrap();
        assert_eq!(session.user_id().as_deref(), Some("3"));
        assert_eq!(session.user_name(), Some("Anita"));
        assert_eq!(session.category(), None);
        assert_eq!(session.workout_id(), None);
        assert_eq!(storage.get(keys::COPIED_WORKOUT), None);
    }

    #[test]
    fn test_external_user_has_no_known_name() {
        let session = Session::new(MemoryStorage::new());
        session.login("google-oauth2|1234").unwrap();
        assert_eq!(session.user_id().as_deref(), Some("google-oauth2|1234"));
        assert_eq!(session.user_name(), None);
    }

    #[test]
    fn test_category_and_workout_selection() {
        let session = Session::new(MemoryStorage::new());
        session.login("2").unwrap();
        session.select_category(4, "Push Day").unwrap();
        session.select_workout(9).unwrap();

        assert_eq!(
            session.category(),
            Some(SelectedCategory {
                id: 4,
                name: "Push Day".to_string()
            })
        );
        assert_eq!(session.workout_id(), Some(9));

        session.clear_category();
        assert_eq!(session.category(), None);
        assert_eq!(session.workout_id(), None);
        assert_eq!(session.user_id().as_deref(), Some("2"));
    }

    #[test]
    fn test_logout() {
        let session = Session::new(MemoryStorage::new());
        session.login("2").unwrap();
        session.logout();
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn test_garbage_ids_are_ignored() {
        let storage = MemoryStorage::new();
        storage.set(keys::WORKOUT_ID, "abc").unwrap();
        assert_eq!(Session::new(storage).workout_id(), None);
    }
}
