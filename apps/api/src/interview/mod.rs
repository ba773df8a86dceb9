pub mod anxiety;
pub mod evaluation;
pub mod handlers;
pub mod interviewer;
pub mod questions;
pub mod session_log;
