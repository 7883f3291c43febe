pub mod password;

pub use password::change_password_post;
