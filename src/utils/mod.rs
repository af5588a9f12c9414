pub mod jwt;
pub mod slug;
