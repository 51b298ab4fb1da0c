use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, postgres::PgRow};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Single stored role tier. New identities always start as `User`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Parse the persisted `users.role` textual value into a typed enum.
    pub(crate) fn from_db(value: &str) -> Result<Self, sqlx::Error> {
        match value {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid users.role value: {value}"),
            )))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full persisted identity, including the password hash.
///
/// Deliberately not `Serialize`: outward responses are built from [`UserView`].
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
    pub image: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            image: self.image.clone(),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"***")
            .field("role", &self.role)
            .field("image", &self.image)
            .finish()
    }
}

impl<'r> FromRow<'r, PgRow> for Identity {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let role: String = row.try_get("role")?;
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            password_hash: row.try_get("password_hash")?,
            role: Role::from_db(&role)?,
            image: row.try_get("image")?,
        })
    }
}

/// Public projection of an identity: the only shape that leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub image: Option<String>,
}

impl<'r> FromRow<'r, PgRow> for UserView {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let role: String = row.try_get("role")?;
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            role: Role::from_db(&role)?,
            image: row.try_get("image")?,
        })
    }
}

/// Fields required to create an identity; the store assigns the id.
#[derive(Clone)]
pub struct NewIdentity {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
}

impl fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewIdentity")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"***")
            .field("role", &self.role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: "ann@example.com".to_string(),
            name: "Ann".to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
            role: Role::User,
            image: None,
        }
    }

    #[test]
    fn role_serializes_upper_case() -> Result<()> {
        assert_eq!(serde_json::to_value(Role::User)?, "USER");
        assert_eq!(serde_json::to_value(Role::Admin)?, "ADMIN");
        let role: Role = serde_json::from_str("\"ADMIN\"")?;
        assert_eq!(role, Role::Admin);
        Ok(())
    }

    #[test]
    fn role_from_db_rejects_unknown_values() {
        assert_eq!(Role::from_db("USER").ok(), Some(Role::User));
        assert_eq!(Role::from_db("ADMIN").ok(), Some(Role::Admin));
        assert!(Role::from_db("root").is_err());
    }

    #[test]
    fn view_omits_password_hash() -> Result<()> {
        let identity = identity();
        let value = serde_json::to_value(identity.view())?;
        let object = value.as_object().map(|o| o.len());
        assert_eq!(object, Some(5));
        assert!(value.get("password_hash").is_none());
        assert_eq!(value.get("role").and_then(|v| v.as_str()), Some("USER"));
        assert!(value.get("image").is_some_and(serde_json::Value::is_null));
        Ok(())
    }

    #[test]
    fn debug_redacts_password_hash() {
        let identity = identity();
        let debug = format!("{identity:?}");
        assert!(debug.contains("***"));
        assert!(!debug.contains("$2b$04$"));
    }
}
