pub mod auth;
pub mod response;
pub mod validate_user;

pub use auth::{jwt_auth_middleware, AuthClaims};
pub use response::{ApiJson, ApiResponse, ApiResult};
pub use validate_user::{validate_user_middleware, CurrentUser};
