//! Generative-model flows for the document intake service.
//!
//! Provides the [`model::GenerativeModel`] seam, a Gemini REST
//! implementation, and the typed flows (requirement extraction, test-case
//! generation, PII redaction, document Q&A) run through
//! [`flow::FlowRunner`].

pub mod config;
pub mod flow;
pub mod flows;
pub mod gemini;
pub mod model;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;
