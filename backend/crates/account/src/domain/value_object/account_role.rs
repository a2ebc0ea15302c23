use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of account roles
///
/// Serialized with the same codes the API and the token claims use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum AccountRole {
    /// Platform administrator
    SuperAdmin = 0,
    /// Owns projects (resources) on the platform
    ProjectOwner = 1,
    #[default]
    Participant = 2,
}

impl AccountRole {
    pub const ALL: [AccountRole; 3] = [
        AccountRole::SuperAdmin,
        AccountRole::ProjectOwner,
        AccountRole::Participant,
    ];

    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use AccountRole::*;
        match self {
            SuperAdmin => "super_admin",
            ProjectOwner => "project_owner",
            Participant => "participant",
        }
    }

    /// Decode a stored id. Unknown ids are a data error, not a panic.
    pub fn from_id(id: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.code() == code)
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
