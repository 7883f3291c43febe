use std::fmt::Write;

use crate::cli::utils::connect_store;
use crate::cli::OutputFormat;
use crate::database::MemoryStore;
use crate::services::{build_hierarchy, HierarchyView};

pub async fn handle(demo: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let view = if demo {
        let store = MemoryStore::new();
        store.seed_demo().await;
        build_hierarchy(&store).await?
    } else {
        let store = connect_store().await?;
        build_hierarchy(&store).await?
    };

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => print!("{}", render_text(&view)),
    }
    Ok(())
}

/// Indented tree, one line per node with its counts
pub fn render_text(view: &HierarchyView) -> String {
    let mut out = String::new();
    if view.clients.is_empty() {
        out.push_str("No clients with cases\n");
        return out;
    }

    // Writing into a String cannot fail
    let _ = writeln!(out, "Clients: {}", view.total_clients);
    for client in &view.clients {
        let _ = writeln!(out, "{} ({} cases)", client.client.name, client.total_cases);
        for case in &client.cases {
            let _ = writeln!(
                out,
                "  {} [{}] ({} dossiers, {} documents)",
                case.case.title, case.case.status, case.total_dossiers, case.total_documents
            );
            for dossier in &case.dossiers {
                let _ = writeln!(
                    out,
                    "    {} {} ({} documents)",
                    dossier.dossier.number, dossier.dossier.title, dossier.total_documents
                );
                for document in &dossier.documents {
                    let _ = writeln!(out, "      - {}", document.title);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn renders_demo_tree() {
        let store = MemoryStore::new();
        store.seed_demo().await;
        let text = render_text(&build_hierarchy(&store).await.unwrap());

        assert!(text.starts_with("Clients: 1\n"));
        assert!(text.contains("(2 cases)"));
        assert!(text.contains("(1 dossiers, 2 documents)"));
        assert!(text.contains("(0 dossiers, 0 documents)"));
        assert!(!text.contains("Cliente sin casos"));
    }

    #[tokio::test]
    async fn renders_empty_view() {
        let store = MemoryStore::new();
        let text = render_text(&build_hierarchy(&store).await.unwrap());
        assert_eq!(text, "No clients with cases\n");
    }
}
