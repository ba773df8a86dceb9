pub mod handlers;
pub mod profile;
pub mod store;
