use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque per-browser identity used to de-duplicate votes.
///
/// Issued by the server on first contact and carried in the visitor's session cookie.
/// It is not authentication: a visitor who drops the cookie gets a fresh identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterId(Uuid);

impl VoterId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for VoterId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
