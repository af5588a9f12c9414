pub mod activity;
pub mod destination;
pub mod price_package;
pub mod tour;
pub mod tour_date;
pub mod tour_date_blocked_date;
pub mod tour_date_package;
pub mod user;
