//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository, renderer and export into table use-cases.
//! - Keep UI/FFI/CLI layers decoupled from storage details.

pub mod action;
pub mod table_service;
