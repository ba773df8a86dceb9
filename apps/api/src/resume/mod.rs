pub mod analysis;
pub mod handlers;
pub mod prompts;
pub mod store;
pub mod structured;
