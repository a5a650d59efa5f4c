//! The AI orchestration layer: prompt templates, typed model contracts, the
//! per-task orchestrator, and the résumé HTTP handlers built on top of it.

pub mod engine;
pub mod handlers;
pub mod models;
pub mod prompts;
