use crate::validation::{InputSchema, ObjectReader, ValidationError};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub version: i64,
    /// Epoch millis.
    pub created_at: i64,
    /// Epoch millis.
    pub updated_at: i64,
}

/// Login and password pair, used by user creation, signup and login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl InputSchema for Credentials {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = ObjectReader::new(value)?;
        let credentials = Credentials {
            login: reader.required_string("login"),
            password: reader.required_string("password"),
        };
        reader.finish(credentials)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdatePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

impl InputSchema for UpdatePasswordInput {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = ObjectReader::new(value)?;
        let input = UpdatePasswordInput {
            old_password: reader.required_string("oldPassword"),
            new_password: reader.required_string("newPassword"),
        };
        reader.finish(input)
    }
}
