use super::{new_id, now_millis};
use crate::error::{ServiceError, ServiceResult};
use crate::user::{CredentialHasher, Credentials, UpdatePasswordInput, User, UserStore};
use std::sync::Arc;
use tracing::debug;

pub const LOGIN_TAKEN: &str = "User with this login already exists";

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: CredentialHasher,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: CredentialHasher) -> Self {
        UserService { store, hasher }
    }

    pub fn create(&self, credentials: Credentials) -> ServiceResult<User> {
        let now = now_millis();
        let user = User {
            id: new_id(),
            login: credentials.login,
            password_hash: self.hasher.hash(&credentials.password)?,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        if !self.store.insert_user(&user)? {
            return Err(ServiceError::Conflict(LOGIN_TAKEN.to_string()));
        }
        debug!("Created user {} ({})", user.id, user.login);
        Ok(user)
    }

    pub fn find_all(&self) -> ServiceResult<Vec<User>> {
        Ok(self.store.list_users()?)
    }

    pub fn find_one(&self, id: &str) -> ServiceResult<User> {
        self.store
            .get_user(id)?
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }

    pub fn find_by_login(&self, login: &str) -> ServiceResult<Option<User>> {
        Ok(self.store.get_user_by_login(login)?)
    }

    pub fn check_password(&self, user: &User, password: &str) -> ServiceResult<bool> {
        Ok(self.hasher.verify(password, &user.password_hash)?)
    }

    pub fn update_password(&self, id: &str, input: UpdatePasswordInput) -> ServiceResult<User> {
        let mut user = self.find_one(id)?;
        if !self.check_password(&user, &input.old_password)? {
            return Err(ServiceError::forbidden("Old password is incorrect"));
        }
        user.password_hash = self.hasher.hash(&input.new_password)?;
        user.version += 1;
        user.updated_at = now_millis().max(user.updated_at + 1);
        if !self.store.update_user(&user)? {
            return Err(ServiceError::not_found("User not found"));
        }
        Ok(user)
    }

    pub fn remove(&self, id: &str) -> ServiceResult<()> {
        if !self.store.remove_user(id)? {
            return Err(ServiceError::not_found("User not found"));
        }
        debug!("Removed user {}", id);
        Ok(())
    }

    pub fn exists(&self, id: &str) -> ServiceResult<bool> {
        Ok(self.store.get_user(id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::MemoryUserStore;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUserStore::new()), CredentialHasher::new(1))
    }

    fn credentials(login: &str, password: &str) -> Credentials {
        Credentials {
            login: login.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn create_hashes_password() {
        let service = service();
        let user = service.create(credentials("alice", "secret")).unwrap();
        assert_eq!(user.version, 1);
        assert_eq!(user.created_at, user.updated_at);
        assert_ne!(user.password_hash, "secret");
        assert!(service.check_password(&user, "secret").unwrap());
    }

    #[test]
    fn duplicate_login_conflicts() {
        let service = service();
        service.create(credentials("alice", "a")).unwrap();
        let err = service.create(credentials("alice", "b")).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m == LOGIN_TAKEN));
    }

    #[test]
    fn password_update_bumps_version() {
        let service = service();
        let user = service.create(credentials("alice", "old")).unwrap();

        let err = service
            .update_password(
                &user.id,
                UpdatePasswordInput {
                    old_password: "wrong".to_string(),
                    new_password: "new".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(ref m) if m == "Old password is incorrect"));

        let updated = service
            .update_password(
                &user.id,
                UpdatePasswordInput {
                    old_password: "old".to_string(),
                    new_password: "new".to_string(),
                },
            )
            .unwrap();
        assert_eq!(updated.version, 2);
        assert!(updated.updated_at > updated.created_at);
        assert!(service.check_password(&updated, "new").unwrap());
        assert_eq!(service.find_one(&user.id).unwrap(), updated);
    }

    #[test]
    fn remove_twice_is_not_found() {
        let service = service();
        let user = service.create(credentials("alice", "pw")).unwrap();
        service.remove(&user.id).unwrap();
        assert!(matches!(
            service.remove(&user.id),
            Err(ServiceError::NotFound(_))
        ));
    }
}
