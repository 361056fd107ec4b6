//! Owner service operations.

use std::fmt;

/// The operations the owner router dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerOperation {
    /// `GET /status`
    HealthCheck,
    /// `GET /owner?ownerid=...`
    GetOwner,
    /// `GET /owners`
    ListOwners,
    /// `POST /owner`
    SaveOwner,
    /// `PATCH /owner`
    ModifyOwner,
    /// `DELETE /owner`
    DeleteOwner,
    /// `OPTIONS` on any path.
    Preflight,
}

impl OwnerOperation {
    /// Returns the operation name used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HealthCheck => "HealthCheck",
            Self::GetOwner => "GetOwner",
            Self::ListOwners => "ListOwners",
            Self::SaveOwner => "SaveOwner",
            Self::ModifyOwner => "ModifyOwner",
            Self::DeleteOwner => "DeleteOwner",
            Self::Preflight => "Preflight",
        }
    }

    /// Returns `true` if the operation requires a JSON request body.
    #[must_use]
    pub fn requires_body(&self) -> bool {
        matches!(self, Self::SaveOwner | Self::ModifyOwner | Self::DeleteOwner)
    }
}

impl fmt::Display for OwnerOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
