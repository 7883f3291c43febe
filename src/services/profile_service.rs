use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password;
use crate::config::SecurityConfig;
use crate::database::models::{Profile, ProfileUpdate, User, UserUpdate};
use crate::database::{DatabaseError, UserStore};
use crate::error::{ApiError, FieldErrors};

use super::auth_service::required;

const NAME_MAX: usize = 150;
const EMAIL_MAX: usize = 254;
const PHONE_MAX: usize = 30;
const BIO_MAX: usize = 500;
const AVATAR_MAX: usize = 255;

/// Self-service representation of the caller's account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeView {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile: Profile,
}

impl MeView {
    fn new(user: &User, profile: Profile) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            profile,
        }
    }
}

/// Body of `PUT`/`PATCH /api/me/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeUpdate {
    #[serde(flatten)]
    pub user: UserUpdate,
    pub profile: Option<ProfileUpdate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// PUT: every required field must be present
    Full,
    /// PATCH: only present fields are validated and merged
    Partial,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Load the caller's account, creating the profile row if it is missing
pub async fn me(users: &dyn UserStore, user: &User) -> Result<MeView, ApiError> {
    let profile = users.get_or_create_profile(user.id).await?;
    Ok(MeView::new(user, profile))
}

/// Validate and merge a typed update into the caller's account
pub async fn update_me(
    users: &dyn UserStore,
    current: &User,
    update: MeUpdate,
    mode: UpdateMode,
) -> Result<MeView, ApiError> {
    validate_update(users, current, &update, mode).await?;

    let mut user = current.clone();
    user.apply(update.user);

    users.save_user(&user).await.map_err(|e| match e {
        DatabaseError::Conflict(_) => ApiError::field("username", "A user with that username already exists."),
        other => other.into(),
    })?;

    let profile = match update.profile {
        Some(profile_update) if !profile_update.is_empty() => {
            let mut profile = users.get_or_create_profile(user.id).await?;
            profile.apply(profile_update);
            users.save_profile(&profile).await?;
            profile
        }
        _ => users.get_or_create_profile(user.id).await?,
    };

    info!("Updated account for '{}'", user.username);
    Ok(MeView::new(&user, profile))
}

async fn validate_update(
    users: &dyn UserStore,
    current: &User,
    update: &MeUpdate,
    mode: UpdateMode,
) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();
    let fields = &update.user;

    match fields.username.as_deref() {
        None if mode == UpdateMode::Full => errors.add("username", "This field is required."),
        None => {}
        Some("") => errors.add("username", "This field may not be blank."),
        Some(username) => {
            if username.chars().count() > NAME_MAX {
                errors.add("username", max_length(NAME_MAX));
            } else if !is_valid_username(username) {
                errors.add(
                    "username",
                    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
                );
            } else if users.username_taken(username, Some(current.id)).await? {
                errors.add("username", "A user with that username already exists.");
            }
        }
    }

    for (field, value) in [("first_name", &fields.first_name), ("last_name", &fields.last_name)] {
        if let Some(value) = value {
            if value.chars().count() > NAME_MAX {
                errors.add(field, max_length(NAME_MAX));
            }
        }
    }

    if let Some(email) = fields.email.as_deref() {
        if email.chars().count() > EMAIL_MAX {
            errors.add("email", max_length(EMAIL_MAX));
        } else if !email.is_empty() && !is_valid_email(email) {
            errors.add("email", "Enter a valid email address.");
        }
    }

    match &update.profile {
        Some(profile) => errors.nest("profile", validate_profile(profile)),
        None if mode == UpdateMode::Full => errors.add("profile", "This field is required."),
        None => {}
    }

    errors.into_result()
}

fn validate_profile(update: &ProfileUpdate) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let limits = [
        ("phone", update.phone.as_deref(), PHONE_MAX),
        ("bio", update.bio.as_deref(), BIO_MAX),
        ("avatar", update.avatar.as_ref().and_then(|a| a.as_deref()), AVATAR_MAX),
    ];
    for (field, value, max) in limits {
        if value.is_some_and(|v| v.chars().count() > max) {
            errors.add(field, max_length(max));
        }
    }
    errors
}

fn max_length(max: usize) -> String {
    format!("Ensure this field has no more than {} characters.", max)
}

fn is_valid_username(username: &str) -> bool {
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Verify the current password and store a new one.
///
/// Checks run in order: required fields, confirmation match, password
/// policy, then the current password.
pub async fn change_password(
    users: &dyn UserStore,
    security: &SecurityConfig,
    user: &User,
    request: &ChangePasswordRequest,
) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();
    let current = required(&mut errors, "current_password", &request.current_password);
    let new = required(&mut errors, "new_password", &request.new_password);
    let confirm = required(&mut errors, "confirm_password", &request.confirm_password);
    let (Some(current), Some(new), Some(confirm)) = (current, new, confirm) else {
        return Err(ApiError::Validation(errors));
    };

    if new != confirm {
        return Err(ApiError::field("confirm_password", "Las contraseñas no coinciden."));
    }

    let violations = password::validate_password(new, user, security.password_min_length);
    if !violations.is_empty() {
        let mut errors = FieldErrors::new();
        errors.extend("new_password", violations);
        return Err(ApiError::Validation(errors));
    }

    if !password::verify_password(current, &user.password_hash) {
        tracing::warn!("Password change for '{}' rejected: wrong current password", user.username);
        return Err(ApiError::field("current_password", "Contraseña actual incorrecta."));
    }

    let hash = password::hash_password(new, security.bcrypt_cost)?;
    users.set_password_hash(user.id, &hash).await?;
    info!("Password changed for '{}'", user.username);
    Ok(())
}
