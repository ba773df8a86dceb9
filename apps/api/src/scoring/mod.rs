pub mod competency;
pub mod handlers;
pub mod store;
