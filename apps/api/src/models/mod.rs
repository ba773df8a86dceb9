pub mod activity;
pub mod resume;
pub mod user;
