pub mod content_filter;
pub mod email;
