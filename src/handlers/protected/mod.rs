// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here runs behind jwt_auth_middleware and
// validate_user_middleware, so handlers receive `CurrentUser` as an
// explicit request extension.

pub mod auth; // Password change
pub mod hierarchy; // Client → Case → Dossier → Document tree
pub mod me; // Profile self-service

pub use auth::change_password_post;
pub use hierarchy::hierarchy_get;
pub use me::{me_get, me_patch, me_put};
