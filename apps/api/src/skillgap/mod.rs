//! Skill gap analysis against company presets or a parsed job description.

pub mod benchmarks;
pub mod courses;
pub mod gap_analysis;
pub mod handlers;
pub mod jd_parser;
pub mod prompts;
