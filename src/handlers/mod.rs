pub mod activities;
pub mod auth;
pub mod changes;
pub mod dates;
pub mod destinations;
pub mod packages;
pub mod public;
pub mod tours;
