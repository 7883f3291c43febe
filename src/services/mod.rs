pub mod auth_service;
pub mod hierarchy;
pub mod profile_service;

pub use hierarchy::{build_hierarchy, CaseNode, ClientNode, DossierNode, HierarchyView};
