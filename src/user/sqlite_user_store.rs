use super::user_models::User;
use super::user_store::UserStore;
use crate::sqlite_column;
use crate::sqlite_persistence::{
    is_constraint_violation, open_in_memory, open_versioned, SqlType, Table, VersionedSchema,
};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// V 0
const USERS_TABLE_V_0: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!("id", SqlType::Text, is_primary_key = true),
        sqlite_column!("login", SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("password", SqlType::Text, non_null = true),
        sqlite_column!(
            "version",
            SqlType::Integer,
            non_null = true,
            default_value = Some("1")
        ),
        sqlite_column!("created_at", SqlType::Integer, non_null = true),
        sqlite_column!("updated_at", SqlType::Integer, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

const VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[USERS_TABLE_V_0],
}];

const USER_COLUMNS: &str = "id, login, password, version, created_at, updated_at";

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        login: row.get(1)?,
        password_hash: row.get(2)?,
        version: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let conn = open_versioned(db_path.as_ref(), VERSIONED_SCHEMAS)?;
        info!("User db ready at {:?}", db_path.as_ref());
        Ok(SqliteUserStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(SqliteUserStore {
            conn: Arc::new(Mutex::new(open_in_memory(VERSIONED_SCHEMAS)?)),
        })
    }

    fn find_one(&self, column: &str, value: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE {} = ?1", USER_COLUMNS, column),
                params![value],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }
}

impl UserStore for SqliteUserStore {
    fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users ORDER BY created_at, rowid",
            USER_COLUMNS
        ))?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.find_one("id", id)
    }

    fn get_user_by_login(&self, login: &str) -> Result<Option<User>> {
        self.find_one("login", login)
    }

    fn insert_user(&self, user: &User) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let result = conn.execute(
            &format!(
                "INSERT INTO users ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                USER_COLUMNS
            ),
            params![
                &user.id,
                &user.login,
                &user.password_hash,
                user.version,
                user.created_at,
                user.updated_at
            ],
        );
        match result {
            Ok(_) => Ok(true),
            Err(err) if is_constraint_violation(&err) => {
                debug!("Rejected user insert for login {}: {}", user.login, err);
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_user(&self, user: &User) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE users SET login = ?2, password = ?3, version = ?4, updated_at = ?5 WHERE id = ?1",
            params![
                &user.id,
                &user.login,
                &user.password_hash,
                user.version,
                user.updated_at
            ],
        )?;
        Ok(updated > 0)
    }

    fn remove_user(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user(id: &str, login: &str) -> User {
        User {
            id: id.to_string(),
            login: login.to_string(),
            password_hash: "hash".to_string(),
            version: 1,
            created_at: 1000,
            updated_at: 1000,
        }
    }

    #[test]
    fn login_is_unique() {
        let store = SqliteUserStore::in_memory().unwrap();
        assert!(store.insert_user(&user("u1", "alice")).unwrap());
        assert!(!store.insert_user(&user("u2", "alice")).unwrap());
        assert_eq!(store.list_users().unwrap().len(), 1);
    }

    #[test]
    fn lookup_by_id_and_login() {
        let store = SqliteUserStore::in_memory().unwrap();
        store.insert_user(&user("u1", "alice")).unwrap();
        assert_eq!(store.get_user("u1").unwrap(), Some(user("u1", "alice")));
        assert_eq!(
            store.get_user_by_login("alice").unwrap().map(|u| u.id),
            Some("u1".to_string())
        );
        assert!(store.get_user_by_login("bob").unwrap().is_none());
    }

    #[test]
    fn update_and_remove() {
        let store = SqliteUserStore::in_memory().unwrap();
        store.insert_user(&user("u1", "alice")).unwrap();

        let mut updated = user("u1", "alice");
        updated.password_hash = "new-hash".to_string();
        updated.version = 2;
        updated.updated_at = 2000;
        assert!(store.update_user(&updated).unwrap());
        assert_eq!(store.get_user("u1").unwrap(), Some(updated));

        assert!(store.remove_user("u1").unwrap());
        assert!(!store.remove_user("u1").unwrap());
        assert!(!store.update_user(&user("u1", "alice")).unwrap());
    }

    #[test]
    fn persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user.db");
        SqliteUserStore::new(&path)
            .unwrap()
            .insert_user(&user("u1", "alice"))
            .unwrap();
        let reopened = SqliteUserStore::new(&path).unwrap();
        assert!(reopened.get_user("u1").unwrap().is_some());
    }
}
