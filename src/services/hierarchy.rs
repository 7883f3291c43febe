//! Client → Case → Dossier → Document aggregation.
//!
//! Walks the chain one level at a time through a [`HierarchySource`] and
//! assembles a count-annotated tree. Clients without cases are dropped;
//! cases without dossiers and dossiers without documents are kept.

use serde::Serialize;
use tracing::debug;

use crate::database::models::{Case, Client, Document, Dossier};
use crate::database::{DatabaseError, HierarchySource};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DossierNode {
    pub dossier: Dossier,
    pub documents: Vec<Document>,
    pub total_documents: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseNode {
    pub case: Case,
    pub dossiers: Vec<DossierNode>,
    pub total_dossiers: usize,
    pub total_documents: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientNode {
    pub client: Client,
    pub cases: Vec<CaseNode>,
    pub total_cases: usize,
}

/// Snapshot handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyView {
    pub clients: Vec<ClientNode>,
    pub total_clients: usize,
}

/// Build the full hierarchy visible through `source`.
///
/// Errors from the source are returned as-is.
pub async fn build_hierarchy(source: &dyn HierarchySource) -> Result<HierarchyView, DatabaseError> {
    let mut clients = Vec::new();

    for client in source.list_clients().await? {
        let mut cases = Vec::new();

        for case in source.cases_of(&client).await? {
            let mut dossiers = Vec::new();

            for dossier in source.dossiers_of(&case).await? {
                let documents = source.documents_of(&dossier).await?;
                dossiers.push(DossierNode {
                    total_documents: documents.len(),
                    dossier,
                    documents,
                });
            }

            cases.push(CaseNode {
                total_dossiers: dossiers.len(),
                total_documents: dossiers.iter().map(|d| d.total_documents).sum(),
                case,
                dossiers,
            });
        }

        if cases.is_empty() {
            continue;
        }

        clients.push(ClientNode {
            total_cases: cases.len(),
            client,
            cases,
        });
    }

    debug!("Built hierarchy with {} clients", clients.len());

    Ok(HierarchyView {
        total_clients: clients.len(),
        clients,
    })
}
