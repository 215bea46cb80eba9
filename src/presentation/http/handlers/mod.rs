pub mod auth;
pub mod comments;
pub mod follows;
pub mod forms;
pub mod health;
pub mod projects;
pub mod reactions;
pub mod reviews;
pub mod scraps;
pub mod users;
