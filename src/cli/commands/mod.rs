pub mod admin;
pub mod content;
pub mod locale;
pub mod token;
