pub mod ads;
pub mod auth;
pub mod reviews;
pub mod users;
