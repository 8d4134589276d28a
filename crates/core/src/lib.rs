//! Domain records and pure logic for the document intake service.
//!
//! This crate performs no I/O: flows, tracker calls and storage live in
//! the `genai`, `jira` and `api` crates and pass data in here.

pub mod activity;
pub mod credentials;
pub mod document;
pub mod error;
pub mod export;
pub mod metrics;
pub mod redaction;
pub mod requirement;
pub mod test_case;
pub mod types;
