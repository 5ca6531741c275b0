//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into record lifecycle operations.
//! - Keep CLI callers decoupled from storage details.

pub mod campus_service;
