pub mod advertisements;
pub mod password_resets;
pub mod reviews;
pub mod users;
