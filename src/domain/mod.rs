pub mod auth;
pub mod clock;
pub mod market;
pub mod password;
pub mod portfolio;
pub mod users;
