//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - An in-memory application driven through `tower::ServiceExt::oneshot`
//! - Authentication helpers (register, login, bearer headers)
//! - Error assertion macro

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;

// Re-export commonly used utilities
pub use auth_helpers::*;
