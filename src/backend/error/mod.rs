//! Backend Error Module
//!
//! This module defines the error type returned by the board service and every
//! HTTP handler. Errors from the lower layers (validation, ordering engine,
//! store, identity provider) convert into `BackendError` with `?`.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` and its status/kind mapping
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Error Kinds
//!
//! | Kind               | Status |
//! |--------------------|--------|
//! | `ValidationError`  | 400    |
//! | `Unauthorized`     | 401    |
//! | `AccessDenied`     | 403    |
//! | `NotFound`         | 404    |
//! | `InvalidSequence`  | 400    |
//! | `InvalidIndex`     | 400    |
//! | `DuplicateMember`  | 409    |
//! | `ConflictError`    | 409    |
//! | `StoreError`       | 500    |
//!
//! # Response Format
//!
//! ```json
//! {"error": "Board not found", "kind": "NotFound", "status": 404}
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
