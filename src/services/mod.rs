pub mod auth;
pub mod recipe;
