use serde::{Deserialize, Serialize};
use ustr::Ustr;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 10;

/// One row of the members payload.
///
/// `selected` never comes from the server and is never sent back; it only
/// tracks the local checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Ustr,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing)]
    pub selected: bool,
}

impl Member {
    pub fn new(
        id: impl AsRef<str>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: Ustr::from(id.as_ref()),
            name: name.into(),
            email: email.into(),
            role: role.into(),
            selected: false,
        }
    }

    /// Whether any of id, name, email or role contains `needle`.
    ///
    /// `needle` must already be lowercased, see [`crate::normalize_term`].
    pub fn matches(&self, needle: &str) -> bool {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.email.as_str(),
            self.role.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}
