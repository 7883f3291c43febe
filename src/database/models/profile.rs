use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub phone: String,
    pub bio: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileUpdate {
    pub phone: Option<String>,
    pub bio: Option<String>,
    /// Explicit `null` clears the avatar, absence keeps it
    #[serde(default, deserialize_with = "double_option")]
    pub avatar: Option<Option<String>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.bio.is_none() && self.avatar.is_none()
    }
}

impl Profile {
    pub fn empty(user_id: i64) -> Self {
        Self {
            user_id,
            phone: String::new(),
            bio: String::new(),
            avatar: None,
        }
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_null_clears_and_absent_keeps() {
        let mut profile = Profile::empty(7);
        profile.avatar = Some("avatars/7.png".to_string());

        let keep: ProfileUpdate = serde_json::from_str(r#"{"bio": "Penalista"}"#).unwrap();
        profile.apply(keep);
        assert_eq!(profile.avatar.as_deref(), Some("avatars/7.png"));
        assert_eq!(profile.bio, "Penalista");

        let clear: ProfileUpdate = serde_json::from_str(r#"{"avatar": null}"#).unwrap();
        assert!(!clear.is_empty());
        profile.apply(clear);
        assert_eq!(profile.avatar, None);
    }

    #[test]
    fn empty_object_is_an_empty_update() {
        let update: ProfileUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());
    }
}
