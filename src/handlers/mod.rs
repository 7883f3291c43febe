// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT access token + active user)

pub mod protected; // Tier 2: Bearer access token required
pub mod public; // Tier 1: No authentication (/, /health, token endpoints)
