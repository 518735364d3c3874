mod versioned_schema;

pub use versioned_schema::{
    open_in_memory, open_versioned, Column, ForeignKey, SqlType, Table, VersionedSchema,
    BASE_DB_VERSION,
};

/// Returns true when the error is a sqlite constraint violation (unique, foreign key, ...).
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
