use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::identity::{is_reference, EntityId, Identified};
use crate::domain::validation::{validate_account, validate_email, validate_username};
use crate::domain::{DomainError, DomainResult};

use super::password::{hash_password, verify_password};

/// A registered account.
///
/// Username, email and password are validated before a User exists.
/// Two users are the same account when their emails match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "UserRecord")]
pub struct User {
    /// Internal immutable identifier
    id: EntityId,

    username: String,

    /// Argon2 PHC string, never the plaintext
    #[serde(rename = "passwordHash")]
    password_hash: String,

    /// Stored as yyyy-MM-dd
    birthday: NaiveDate,

    email: String,

    role: Role,

    /// The owned movie library, once linked
    #[serde(rename = "movielibraryID")]
    library_id: Option<EntityId>,
}

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

/// Input for registering an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub birthday: NaiveDate,
    pub email: String,
    pub role: Role,
}

/// Input for signing in
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// On-disk shape, revalidated before it becomes a User
#[derive(Deserialize)]
struct UserRecord {
    id: EntityId,
    username: String,
    #[serde(rename = "passwordHash")]
    password_hash: String,
    birthday: NaiveDate,
    email: String,
    role: Role,
    #[serde(rename = "movielibraryID", default)]
    library_id: Option<EntityId>,
}

impl TryFrom<UserRecord> for User {
    type Error = DomainError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let mut errors = validate_username(&record.username).err().unwrap_or_default();
        if let Err(email_errors) = validate_email(&record.email) {
            errors.merge(email_errors);
        }
        errors.into_result().map_err(DomainError::InvalidArguments)?;

        Ok(Self {
            id: record.id,
            username: record.username,
            password_hash: record.password_hash,
            birthday: record.birthday,
            email: record.email,
            role: record.role,
            // legacy files use 0 for "no library"
            library_id: record.library_id.filter(|id| is_reference(*id)),
        })
    }
}

impl User {
    /// Validates the account fields together and hashes the password.
    /// Every failing field check is reported in one InvalidArguments error.
    pub fn register(id: EntityId, account: NewAccount) -> DomainResult<Self> {
        validate_account(&account.username, &account.email, &account.password)
            .map_err(DomainError::InvalidArguments)?;

        let password_hash = hash_password(&account.password)?;

        Ok(Self {
            id,
            username: account.username,
            password_hash,
            birthday: account.birthday,
            email: account.email,
            role: account.role,
            library_id: None,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn library_id(&self) -> Option<EntityId> {
        self.library_id
    }

    /// Assigns only when the new value passes validation
    pub fn set_username(&mut self, username: impl Into<String>) -> DomainResult<()> {
        let username = username.into();
        validate_username(&username).map_err(DomainError::InvalidArguments)?;
        self.username = username;
        Ok(())
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.password_hash)
    }

    pub fn matches(&self, credentials: &Credentials) -> bool {
        self.email == credentials.email && self.verify_password(&credentials.password)
    }

    /// Sets the library link once. Returns false if a library was already linked.
    pub fn link_library(&mut self, library_id: EntityId) -> bool {
        if self.library_id.is_some() {
            return false;
        }
        self.library_id = Some(library_id);
        true
    }
}

impl Identified for User {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }

    pub fn can_manage_accounts(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::User => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> ({})", self.username, self.email, self.role)
    }
}
