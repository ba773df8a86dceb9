pub mod bank;
pub mod generator;
pub mod grading;
pub mod handlers;
pub mod prompts;
