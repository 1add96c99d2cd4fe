//! # hornsat-base
//!
//! Core types and utilities for the hornsat Horn-SAT engine.
//!
//! This crate provides the foundational building blocks used across all other
//! hornsat crates, including:
//!
//! - **Identifiers**: dense `VarId` / `ClauseId` indices
//! - **Interning**: the per-session `VarTable` mapping names to `VarId`s
//! - **Error Types**: unified error handling across the workspace

pub mod error;
pub mod intern;
pub mod types;

pub use error::{Error, Result};
pub use intern::VarTable;
pub use types::{ClauseId, ClauseKind, VarId};
