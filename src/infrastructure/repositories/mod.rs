pub mod market_data;
pub mod mock;
pub mod portfolio;
pub mod users;
