use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Case, Client, Document, Dossier, NewUser, Profile, User};

/// Read access to the Client → Case → Dossier → Document chain.
///
/// Every method enumerates children in ascending id order and must be
/// deterministic for a fixed dataset.
#[async_trait]
pub trait HierarchySource: Send + Sync {
    async fn list_clients(&self) -> Result<Vec<Client>, DatabaseError>;

    async fn cases_of(&self, client: &Client) -> Result<Vec<Case>, DatabaseError>;

    async fn dossiers_of(&self, case: &Case) -> Result<Vec<Dossier>, DatabaseError>;

    async fn documents_of(&self, dossier: &Dossier) -> Result<Vec<Document>, DatabaseError>;
}

/// Identity and profile persistence
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    /// True when another account (not `excluding_id`) already uses `username`
    async fn username_taken(&self, username: &str, excluding_id: Option<i64>) -> Result<bool, DatabaseError>;

    async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError>;

    /// Persist the mutable user fields (names, email, username)
    async fn save_user(&self, user: &User) -> Result<(), DatabaseError>;

    async fn set_password_hash(&self, user_id: i64, password_hash: &str) -> Result<(), DatabaseError>;

    async fn touch_last_login(&self, user_id: i64) -> Result<(), DatabaseError>;

    async fn get_or_create_profile(&self, user_id: i64) -> Result<Profile, DatabaseError>;

    async fn save_profile(&self, profile: &Profile) -> Result<(), DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
