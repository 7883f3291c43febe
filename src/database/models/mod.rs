pub mod case;
pub mod client;
pub mod document;
pub mod dossier;
pub mod profile;
pub mod user;

pub use case::Case;
pub use client::Client;
pub use document::Document;
pub use dossier::Dossier;
pub use profile::{Profile, ProfileUpdate};
pub use user::{NewUser, User, UserUpdate};
