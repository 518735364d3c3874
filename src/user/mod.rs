mod hasher;
mod memory_user_store;
mod sqlite_user_store;
mod user_models;
mod user_store;

pub use hasher::CredentialHasher;
pub use memory_user_store::MemoryUserStore;
pub use sqlite_user_store::SqliteUserStore;
pub use user_models::{Credentials, UpdatePasswordInput, User};
pub use user_store::UserStore;
