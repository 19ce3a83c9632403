use serde::{Deserialize, Serialize};

/// Canonical cocktail identifier.
///
/// Ids arrive in two shapes depending on their origin: the remote service
/// assigns numeric ids, the local store mints millisecond-timestamp ids.
/// Both are normalized to this string form at the ingestion boundary so the
/// rest of the codebase never compares mixed representations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CocktailId(String);

impl CocktailId {
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for CocktailId {
    fn from(no: i64) -> Self {
        Self(no.to_string())
    }
}

impl From<&str> for CocktailId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CocktailId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for CocktailId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical user identifier, same normalization rule as [`CocktailId`]:
/// server-assigned member numbers and locally minted monotonic tokens both
/// become opaque strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric member number, when this id came from the remote service.
    pub fn as_member_no(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl From<i64> for UserId {
    fn from(no: i64) -> Self {
        Self(no.to_string())
    }
}

impl From<u64> for UserId {
    fn from(no: u64) -> Self {
        Self(no.to_string())
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the stores keep their source of truth.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoreMode {
    /// Everything client-side; snapshots are the only persistence.
    Local,
    /// The remote recipe service is authoritative; the client mirrors it.
    Remote,
}
