use thiserror::Error;

use crate::database::models::User;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// A malformed stored hash counts as a mismatch
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}

const COMMON_PASSWORDS: &[&str] = &[
    "123456", "12345678", "123456789", "1234567890", "password", "password1", "password123",
    "qwerty", "qwerty123", "qwertyuiop", "abc123", "111111", "000000", "iloveyou", "admin",
    "admin123", "welcome", "welcome1", "letmein", "monkey", "dragon", "football", "baseball",
    "sunshine", "princess", "superman", "trustno1", "passw0rd", "contraseña", "contrasena",
    "12341234", "11111111", "87654321", "changeme",
];

/// Check a candidate password against the account policy.
///
/// Returns every violated rule, empty when the password is acceptable.
/// This approximates Django's default validators: similarity is plain
/// case-insensitive containment rather than a 0.7 SequenceMatcher ratio,
/// and the common-password list is a short built-in one.
pub fn validate_password(password: &str, user: &User, min_length: usize) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(attribute) = similar_attribute(password, user) {
        errors.push(format!("The password is too similar to the {}.", attribute));
    }

    if password.chars().count() < min_length {
        errors.push(format!(
            "This password is too short. It must contain at least {} characters.",
            min_length
        ));
    }

    if COMMON_PASSWORDS.contains(&password.to_lowercase().as_str()) {
        errors.push("This password is too common.".to_string());
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        errors.push("This password is entirely numeric.".to_string());
    }

    errors
}

fn similar_attribute(password: &str, user: &User) -> Option<&'static str> {
    let password = password.to_lowercase();
    let email_local = user.email.split('@').next().unwrap_or_default();
    let attributes = [
        ("username", user.username.as_str()),
        ("first name", user.first_name.as_str()),
        ("last name", user.last_name.as_str()),
        ("email address", email_local),
    ];

    attributes.into_iter().find_map(|(label, value)| {
        let value = value.to_lowercase();
        // short values match too much to be meaningful
        if value.chars().count() < 3 {
            return None;
        }
        (password.contains(&value) || value.contains(&password)).then_some(label)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: 1,
            username: "mrojas".to_string(),
            password_hash: String::new(),
            first_name: "Maria".to_string(),
            last_name: "Rojas".to_string(),
            email: "maria.r@example.com".to_string(),
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("Tr1cky!pass", 4).unwrap();
        assert!(verify_password("Tr1cky!pass", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }

    #[test]
    fn strong_password_passes() {
        assert!(validate_password("Xk9#vLp2q", &user(), 8).is_empty());
    }

    #[test]
    fn short_numeric_password_reports_both() {
        let errors = validate_password("1234", &user(), 8);
        assert!(errors.iter().any(|e| e.contains("too short")));
        assert!(errors.iter().any(|e| e.contains("entirely numeric")));
    }

    #[test]
    fn common_password_is_rejected() {
        let errors = validate_password("Password123", &user(), 8);
        assert_eq!(errors, vec!["This password is too common.".to_string()]);
    }

    #[test]
    fn similarity_to_username_is_rejected() {
        let errors = validate_password("mrojas2024!", &user(), 8);
        assert_eq!(errors, vec!["The password is too similar to the username.".to_string()]);
    }

    #[test]
    fn similarity_to_email_local_part() {
        let errors = validate_password("maria.r", &user(), 6);
        assert!(errors.iter().any(|e| e.contains("first name") || e.contains("email")));
    }

    #[test]
    fn similarity_is_containment_only() {
        // reordered username is not caught
        assert!(validate_password("sajorm-Xk9#", &user(), 8).is_empty());
    }
}
