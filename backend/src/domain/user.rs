//! Users as seen by the credits ledger.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Credits;

/// Validation errors returned by [`UserId`] and [`FullName`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyFullName,
    FullNameTooLong { max: usize },
    FullNameControlCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyFullName => write!(f, "full name must not be empty"),
            Self::FullNameTooLong { max } => {
                write!(f, "full name must be at most {max} characters")
            }
            Self::FullNameControlCharacters => {
                write!(f, "full name must not contain control characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.1.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Maximum allowed length for a full name.
pub const FULL_NAME_MAX: usize = 128;

/// Name shown to end users in credit messages, such as "Ada Lovelace".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a [`FullName`] from owned input.
    pub fn new(full_name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(full_name.into())
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn from_owned(full_name: String) -> Result<Self, UserValidationError> {
        if full_name.trim().is_empty() {
            return Err(UserValidationError::EmptyFullName);
        }
        if full_name.chars().count() > FULL_NAME_MAX {
            return Err(UserValidationError::FullNameTooLong { max: FULL_NAME_MAX });
        }
        if full_name.chars().any(char::is_control) {
            return Err(UserValidationError::FullNameControlCharacters);
        }
        Ok(Self(full_name))
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

impl TryFrom<String> for FullName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A user's identity and current credit balance as reported by the ledger.
///
/// ## Invariants
/// - `id` must be a valid UUID string.
/// - `full_name` must be non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct UserCredits {
    id: UserId,
    full_name: FullName,
    #[serde(alias = "credits")]
    current_credits: Credits,
}

impl UserCredits {
    /// Build a ledger entry from validated components.
    pub fn new(id: UserId, full_name: FullName, current_credits: Credits) -> Self {
        Self {
            id,
            full_name,
            current_credits,
        }
    }

    /// Fallible constructor from string identifiers.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        full_name: impl Into<String>,
        current_credits: Credits,
    ) -> Result<Self, UserValidationError> {
        let id = UserId::new(id)?;
        let full_name = FullName::new(full_name)?;
        Ok(Self::new(id, full_name, current_credits))
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Name used when addressing the user in messages.
    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Credits currently available to the user.
    pub fn current_credits(&self) -> Credits {
        self.current_credits
    }
}
