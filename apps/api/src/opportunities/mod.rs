pub mod discovery;
pub mod handlers;
pub mod profile;
pub mod prompts;
