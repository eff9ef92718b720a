use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Latency modes
// ---------------------------------------------------------------------------

/// Named latency profile selector. The set is closed: every mode has exactly
/// one profile in the catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum LatencyMode {
    #[default]
    NoLatency = 0,
    LowLatency = 1,
    MediumLatency = 2,
    HighLatency = 3,
}

impl LatencyMode {
    /// Every mode, in declaration order.
    pub const ALL: [LatencyMode; 4] = [
        LatencyMode::NoLatency,
        LatencyMode::LowLatency,
        LatencyMode::MediumLatency,
        LatencyMode::HighLatency,
    ];

    /// Compact code stored in the manager's atomic cell.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Resolve a raw code. Anything outside 0..=3 is a caller bug.
    pub fn from_code(code: u8) -> Result<Self, LatencyError> {
        match code {
            0 => Ok(LatencyMode::NoLatency),
            1 => Ok(LatencyMode::LowLatency),
            2 => Ok(LatencyMode::MediumLatency),
            3 => Ok(LatencyMode::HighLatency),
            _ => Err(LatencyError::InvalidMode(code)),
        }
    }

    /// External name, e.g. `MEDIUM_LATENCY`.
    pub const fn as_str(self) -> &'static str {
        match self {
            LatencyMode::NoLatency => "NO_LATENCY",
            LatencyMode::LowLatency => "LOW_LATENCY",
            LatencyMode::MediumLatency => "MEDIUM_LATENCY",
            LatencyMode::HighLatency => "HIGH_LATENCY",
        }
    }
}

impl fmt::Display for LatencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LatencyMode {
    type Err = ParseLatencyModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LatencyMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseLatencyModeError {
                input: s.to_string(),
            })
    }
}

/// Delay pair and description attached to a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatencyProfile {
    /// Applied before every read-class operation (list/fetch).
    pub read_delay: Duration,
    /// Applied before every write-class operation (create/update/delete/reset).
    pub write_delay: Duration,
    pub description: &'static str,
}

// ---------------------------------------------------------------------------
// User resource
// ---------------------------------------------------------------------------

pub type UserId = u64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Fields required to create a user. The id is assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Partial update: only `Some` fields are written.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }
}

// ---------------------------------------------------------------------------
// UserStore trait — the service ↔ persistence boundary
// ---------------------------------------------------------------------------

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn get(&self, id: UserId) -> Result<User, StoreError>;

    /// Insert a user. Fails if the email is already registered.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Apply a non-empty patch to an existing user.
    async fn update(&self, id: UserId, patch: UserPatch) -> Result<User, StoreError>;

    /// Remove a user, returning the removed record.
    async fn delete(&self, id: UserId) -> Result<User, StoreError>;

    /// Drop every user and reinsert the seed set. Returns the number seeded.
    async fn reset(&self) -> Result<usize, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Internal invariant violation: a mode code outside the closed set reached
/// the catalog or manager.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LatencyError {
    #[error("invalid latency mode code: {0}")]
    InvalidMode(u8),
}

/// Client input error: an external mode string that names no mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown latency mode {input:?}, expected one of NO_LATENCY, LOW_LATENCY, MEDIUM_LATENCY, HIGH_LATENCY")]
pub struct ParseLatencyModeError {
    pub input: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("User with ID {0} not found")]
    UserNotFound(UserId),

    #[error("Email {0} is already registered")]
    DuplicateEmail(String),

    #[error("No fields provided to update")]
    EmptyUpdate,
}
