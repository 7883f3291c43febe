pub mod db;
pub mod hierarchy;
pub mod user;
