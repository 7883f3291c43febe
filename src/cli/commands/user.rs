use clap::Subcommand;
use serde_json::json;

use crate::auth::password;
use crate::cli::utils::{connect_store, output_success, resolve_password};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::models::NewUser;
use crate::database::UserStore;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user account")]
    Create {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (falls back to GESTDOCU_PASSWORD)")]
        password: Option<String>,
        #[arg(long, default_value = "", help = "Email address")]
        email: String,
        #[arg(long, default_value = "", help = "First name")]
        first_name: String,
        #[arg(long, default_value = "", help = "Last name")]
        last_name: String,
    },

    #[command(about = "Replace a user's password")]
    SetPassword {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "New password (falls back to GESTDOCU_PASSWORD)")]
        password: Option<String>,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = connect_store().await?;
    let security = &config().security;

    match cmd {
        UserCommands::Create {
            username,
            password,
            email,
            first_name,
            last_name,
        } => {
            let plain = resolve_password(password)?;
            if store.username_taken(&username, None).await? {
                anyhow::bail!("A user with that username already exists: '{}'", username);
            }

            let password_hash = password::hash_password(&plain, security.bcrypt_cost)?;
            let user = store
                .create_user(NewUser {
                    username,
                    password_hash,
                    first_name,
                    last_name,
                    email,
                })
                .await?;

            output_success(
                output_format,
                &format!("User '{}' created", user.username),
                Some(json!({ "id": user.id, "username": user.username })),
            )
        }
        UserCommands::SetPassword { username, password } => {
            let plain = resolve_password(password)?;
            let user = store
                .find_by_username(&username)
                .await?
                .ok_or_else(|| anyhow::anyhow!("User '{}' not found", username))?;

            let violations = password::validate_password(&plain, &user, security.password_min_length);
            if !violations.is_empty() {
                anyhow::bail!("Password rejected: {}", violations.join(" "));
            }

            let hash = password::hash_password(&plain, security.bcrypt_cost)?;
            store.set_password_hash(user.id, &hash).await?;

            output_success(output_format, &format!("Password updated for '{}'", user.username), None)
        }
    }
}
