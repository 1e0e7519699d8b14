pub mod auth;
pub mod health;
pub mod market;
pub mod portfolio;
pub mod users;
