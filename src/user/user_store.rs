use super::user_models::User;
use anyhow::Result;

pub trait UserStore: Send + Sync {
    fn list_users(&self) -> Result<Vec<User>>;

    fn get_user(&self, id: &str) -> Result<Option<User>>;

    fn get_user_by_login(&self, login: &str) -> Result<Option<User>>;

    /// Returns false, without storing anything, if the login is already taken.
    fn insert_user(&self, user: &User) -> Result<bool>;

    /// Replaces the stored row with the same id. Returns false if there is none.
    fn update_user(&self, user: &User) -> Result<bool>;

    fn remove_user(&self, id: &str) -> Result<bool>;
}
