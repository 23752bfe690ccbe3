use serde::{Deserialize, Serialize};

/// Name used for the placeholder identity created on guest entry.
pub const GUEST_NAME: &str = "Guest";

/// Local identity. Login is mocked, so this is profile data only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub name: String,
    pub email: String,
    pub productivity_style: Option<String>,
}

impl User {
    pub fn guest() -> Self {
        Self {
            name: GUEST_NAME.to_string(),
            ..Self::default()
        }
    }

    /// Overwrite the fields present in `patch`, leave the rest untouched.
    pub fn merge(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(style) = patch.productivity_style {
            self.productivity_style = Some(style);
        }
    }
}

/// Partial user update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub productivity_style: Option<String>,
}
