use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Case, Client, Document, Dossier, NewUser, Profile, User};
use crate::database::store::{HierarchySource, UserStore};

const USER_COLUMNS: &str =
    "id, username, password_hash, first_name, last_name, email, is_active, date_joined, last_login";

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map unique-constraint violations to `Conflict`
fn map_write_error(err: sqlx::Error, what: &str) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DatabaseError::Conflict(format!("{} already exists", what))
        }
        _ => DatabaseError::Sqlx(err),
    }
}

#[async_trait]
impl HierarchySource for PgStore {
    async fn list_clients(&self) -> Result<Vec<Client>, DatabaseError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, phone, created_at FROM clients ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    async fn cases_of(&self, client: &Client) -> Result<Vec<Case>, DatabaseError> {
        let cases = sqlx::query_as::<_, Case>(
            "SELECT id, client_id, title, status, opened_at FROM cases WHERE client_id = $1 ORDER BY id",
        )
        .bind(client.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(cases)
    }

    async fn dossiers_of(&self, case: &Case) -> Result<Vec<Dossier>, DatabaseError> {
        let dossiers = sqlx::query_as::<_, Dossier>(
            "SELECT id, case_id, number, title, created_at FROM dossiers WHERE case_id = $1 ORDER BY id",
        )
        .bind(case.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(dossiers)
    }

    async fn documents_of(&self, dossier: &Dossier) -> Result<Vec<Document>, DatabaseError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT id, dossier_id, title, file, uploaded_at FROM documents WHERE dossier_id = $1 ORDER BY id",
        )
        .bind(dossier.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn username_taken(&self, username: &str, excluding_id: Option<i64>) -> Result<bool, DatabaseError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM users WHERE username = $1 AND ($2::BIGINT IS NULL OR id <> $2)",
        )
        .bind(username)
        .bind(excluding_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0 > 0)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password_hash, first_name, last_name, email)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &format!("user '{}'", new_user.username)))
    }

    async fn save_user(&self, user: &User) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET username = $2, first_name = $3, last_name = $4, email = $5 WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &format!("user '{}'", user.username)))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {}", user.id)));
        }
        Ok(())
    }

    async fn set_password_hash(&self, user_id: i64, password_hash: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {}", user_id)));
        }
        Ok(())
    }

    async fn touch_last_login(&self, user_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_or_create_profile(&self, user_id: i64) -> Result<Profile, DatabaseError> {
        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let profile = sqlx::query_as::<_, Profile>(
            "SELECT user_id, phone, bio, avatar FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO profiles (user_id, phone, bio, avatar) VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id) DO UPDATE SET phone = EXCLUDED.phone, bio = EXCLUDED.bio, avatar = EXCLUDED.avatar",
        )
        .bind(profile.user_id)
        .bind(&profile.phone)
        .bind(&profile.bio)
        .bind(&profile.avatar)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
