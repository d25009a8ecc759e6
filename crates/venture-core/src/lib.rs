//! # venture-core
//!
//! Core types, catalog, and error types for Venture.
//!
//! This crate provides the foundational types shared across all Venture crates:
//! - The consultation `Session` and its nested records
//! - Phase and status enums with state machine transitions
//! - The fixed component and deep-dive question catalog
//! - Turn inputs and output actions exchanged with the UI/transport
//! - ID prefix constants
//! - Cross-cutting error types

pub mod actions;
pub mod catalog;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
