use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::{DatabaseManager, PgStore};

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(object)) = (data, response.as_object_mut()) {
                object.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Connect to the configured database
pub async fn connect_store() -> anyhow::Result<PgStore> {
    let pool = DatabaseManager::connect(&config().database).await?;
    Ok(PgStore::new(pool))
}

/// Password from the flag, falling back to `GESTDOCU_PASSWORD`
pub fn resolve_password(password: Option<String>) -> anyhow::Result<String> {
    password
        .or_else(|| std::env::var("GESTDOCU_PASSWORD").ok())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Password required: pass --password or set GESTDOCU_PASSWORD"))
}
