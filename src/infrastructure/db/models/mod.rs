pub mod portfolio;
pub mod users;
