pub mod address;
pub mod listing;
