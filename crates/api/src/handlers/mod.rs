pub mod auth;
pub mod ideas;
pub mod repos;
