use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

impl UserIdentity {
    pub fn new(user_id: &str, name: &str, email: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Name shown on the profile screen.
    pub fn display_name(&self) -> String {
        match &self.first_name {
            Some(first) if !first.is_empty() => {
                format!("{} {}", first, self.last_name.as_deref().unwrap_or(""))
                    .trim()
                    .to_string()
            }
            _ => "Not set".to_string(),
        }
    }
}

/// Values typed into the edit-profile dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileEdit {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// What has to be sent to the auth provider after an edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// A new address needs its own verification flow, it is never updated in place.
    pub new_email: Option<String>,
}

impl ProfileChanges {
    pub fn diff(current: &UserProfile, edited: &ProfileEdit) -> Self {
        let changed = |now: &Option<String>, new: &str| {
            (now.as_deref().unwrap_or("") != new).then(|| new.to_string())
        };

        Self {
            first_name: changed(&current.first_name, &edited.first_name),
            last_name: changed(&current.last_name, &edited.last_name),
            new_email: (!edited.email.is_empty()
                && current.email.as_deref() != Some(edited.email.as_str()))
            .then(|| edited.email.clone()),
        }
    }

    /// Whether the name update call is needed.
    pub fn has_name_update(&self) -> bool {
        self.first_name.is_some() || self.last_name.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_name_update() && self.new_email.is_none()
    }
}
