pub mod login;
pub mod refresh;
pub mod register;
pub mod resolve;
pub mod token_utils;
