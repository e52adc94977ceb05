//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into caller-facing store APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod entry_store;
