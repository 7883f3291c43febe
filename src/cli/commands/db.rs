use serde_json::json;

use crate::cli::utils::{connect_store, output_success};
use crate::cli::OutputFormat;
use crate::database::DatabaseManager;

pub async fn init(output_format: OutputFormat) -> anyhow::Result<()> {
    let store = connect_store().await?;
    let statements = DatabaseManager::apply_schema(store.pool()).await?;

    output_success(
        output_format,
        &format!("Schema applied ({} statements)", statements),
        Some(json!({ "statements": statements })),
    )
}
