//! Shape of the session state and the actions that change it.

use schoolhub_models::{ClassRef, LoginPayload, Role};
use serde::{Deserialize, Serialize};

/// Everything the client remembers about the logged-in user.
///
/// `SessionState::default()` is the logged-out shape. While `is_logged_in` is
/// false, both tokens are empty and there is no role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(rename = "isLoggedIn")]
    pub is_logged_in: bool,
    pub access: String,
    pub refresh: String,
    pub role: Option<Role>,
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: String,
    pub gender: String,
    pub date_of_joining: String,
    pub classes: Vec<ClassRef>,
    pub subjects: Vec<String>,
    #[serde(rename = "selectedClass")]
    pub selected_class: String,
    #[serde(rename = "selectedSubject")]
    pub selected_subject: String,
    #[serde(rename = "selectedClassID")]
    pub selected_class_id: String,
}

impl SessionState {
    /// Checks the logged-out invariant. Rehydration discards blobs that fail it.
    pub fn is_consistent(&self) -> bool {
        self.is_logged_in
            || (self.access.is_empty() && self.refresh.is_empty() && self.role.is_none())
    }

    /// The bearer token, when there is one to send.
    pub fn access_token(&self) -> Option<&str> {
        Some(self.access.as_str()).filter(|token| self.is_logged_in && !token.is_empty())
    }

    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Every way the session state can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    SetLoginDetails(LoginPayload),
    LogoutUser,
    SetSelectedClass { class_name: String },
    SetSelectedSubject { subject_id: String },
    SetSelectedClassId { class_id: String },
}

impl SessionAction {
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::SetLoginDetails(_) => "setLoginDetails",
            SessionAction::LogoutUser => "logoutUser",
            SessionAction::SetSelectedClass { .. } => "setSelectedClass",
            SessionAction::SetSelectedSubject { .. } => "setSelectedSubject",
            SessionAction::SetSelectedClassId { .. } => "setSelectedClassId",
        }
    }
}
