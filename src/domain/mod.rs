pub mod availability;
pub mod change_feed;
pub mod listing;
pub mod packages;
pub mod repeat;
