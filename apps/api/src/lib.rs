//! Shortlist scoring service: deterministic resume/JD scoring, suggestion
//! point allocation, and the live score preview behind the ATS checker.

pub mod config;
pub mod engine;
pub mod errors;
pub mod routes;
pub mod scoring;
pub mod sessions;
pub mod state;
