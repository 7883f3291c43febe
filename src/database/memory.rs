use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Case, Client, Document, Dossier, NewUser, Profile, User};
use crate::database::store::{HierarchySource, UserStore};

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    profiles: BTreeMap<i64, Profile>,
    clients: BTreeMap<i64, Client>,
    cases: BTreeMap<i64, Case>,
    dossiers: BTreeMap<i64, Dossier>,
    documents: BTreeMap<i64, Document>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process store used by tests and `--memory` development runs.
///
/// Ids come from one shared sequence, so children enumerate in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_client(&self, name: &str) -> Client {
        let mut tables = self.tables.write().await;
        let client = Client {
            id: tables.next_id(),
            name: name.to_string(),
            email: None,
            phone: None,
            created_at: Utc::now(),
        };
        tables.clients.insert(client.id, client.clone());
        client
    }

    pub async fn add_case(&self, client: &Client, title: &str) -> Case {
        let mut tables = self.tables.write().await;
        let case = Case {
            id: tables.next_id(),
            client_id: client.id,
            title: title.to_string(),
            status: "open".to_string(),
            opened_at: Utc::now(),
        };
        tables.cases.insert(case.id, case.clone());
        case
    }

    pub async fn add_dossier(&self, case: &Case, number: &str) -> Dossier {
        let mut tables = self.tables.write().await;
        let dossier = Dossier {
            id: tables.next_id(),
            case_id: case.id,
            number: number.to_string(),
            title: String::new(),
            created_at: Utc::now(),
        };
        tables.dossiers.insert(dossier.id, dossier.clone());
        dossier
    }

    pub async fn add_document(&self, dossier: &Dossier, title: &str) -> Document {
        let mut tables = self.tables.write().await;
        let document = Document {
            id: tables.next_id(),
            dossier_id: dossier.id,
            title: title.to_string(),
            file: None,
            uploaded_at: Utc::now(),
        };
        tables.documents.insert(document.id, document.clone());
        document
    }

    pub async fn set_active(&self, user_id: i64, is_active: bool) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", user_id)))?;
        user.is_active = is_active;
        Ok(())
    }

    /// Small dataset for local runs without Postgres
    pub async fn seed_demo(&self) {
        let acme = self.add_client("Acme S.R.L.").await;
        let labor = self.add_case(&acme, "Demanda laboral").await;
        let first = self.add_dossier(&labor, "EXP-001").await;
        self.add_document(&first, "Memorial de demanda").await;
        self.add_document(&first, "Poder notarial").await;
        self.add_case(&acme, "Contrato de arrendamiento").await;
        self.add_client("Cliente sin casos").await;
    }
}

#[async_trait]
impl HierarchySource for MemoryStore {
    async fn list_clients(&self) -> Result<Vec<Client>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.clients.values().cloned().collect())
    }

    async fn cases_of(&self, client: &Client) -> Result<Vec<Case>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .cases
            .values()
            .filter(|c| c.client_id == client.id)
            .cloned()
            .collect())
    }

    async fn dossiers_of(&self, case: &Case) -> Result<Vec<Dossier>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .dossiers
            .values()
            .filter(|d| d.case_id == case.id)
            .cloned()
            .collect())
    }

    async fn documents_of(&self, dossier: &Dossier) -> Result<Vec<Document>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .documents
            .values()
            .filter(|d| d.dossier_id == dossier.id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn username_taken(&self, username: &str, excluding_id: Option<i64>) -> Result<bool, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .any(|u| u.username == username && Some(u.id) != excluding_id))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == new_user.username) {
            return Err(DatabaseError::Conflict(format!("user '{}' already exists", new_user.username)));
        }
        let user = User {
            id: tables.next_id(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save_user(&self, user: &User) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.username == user.username && u.id != user.id)
        {
            return Err(DatabaseError::Conflict(format!("user '{}' already exists", user.username)));
        }
        let stored = tables
            .users
            .get_mut(&user.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", user.id)))?;
        stored.username = user.username.clone();
        stored.first_name = user.first_name.clone();
        stored.last_name = user.last_name.clone();
        stored.email = user.email.clone();
        Ok(())
    }

    async fn set_password_hash(&self, user_id: i64, password_hash: &str) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {}", user_id)))?;
        stored.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn touch_last_login(&self, user_id: i64) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(stored) = tables.users.get_mut(&user_id) {
            stored.last_login = Some(Utc::now());
        }
        Ok(())
    }

    async fn get_or_create_profile(&self, user_id: i64) -> Result<Profile, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(DatabaseError::NotFound(format!("user {}", user_id)));
        }
        Ok(tables
            .profiles
            .entry(user_id)
            .or_insert_with(|| Profile::empty(user_id))
            .clone())
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.profiles.insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
