pub mod history;
pub mod indices;
pub mod quote;
pub mod search;
