//! Read-only aggregate views for recruiters and college administrators.

pub mod admin;
pub mod handlers;
pub mod recruiter;
