// handlers/public/auth/mod.rs - Token acquisition endpoints

pub mod refresh; // POST /api/auth/token/refresh/ - new access token
pub mod token; // POST /api/auth/token/ - credentials for access/refresh pair

pub use refresh::refresh_post as token_refresh;
pub use token::token_post as token_obtain;
