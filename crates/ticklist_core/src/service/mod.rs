//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and snapshot persistence into use-case
//!   level APIs.
//! - Keep the CLI layer decoupled from storage details.

pub mod list_service;
