//! Pygauge - sandboxed structural and behavioral auditing for Python
//! snippets.
//!
//! The pipeline runs one way: parse, then structural metrics and origin
//! assessment, then test synthesis, then sequential sandboxed
//! executions, and finally composite grading. Every stage degrades
//! instead of failing, so `pipeline::audit` always returns a complete
//! report.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod grading;
pub mod hints;
pub mod models;
pub mod orchestrator;
pub mod origin;
pub mod pipeline;
pub mod reporters;
pub mod sandbox;
pub mod synth;
