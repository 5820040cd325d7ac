//! Board Module
//!
//! Boards, columns and tasks: request types, the mutation service that keeps
//! ordering sequences and ownership consistent, and the HTTP handlers.
//!
//! # Module Structure
//!
//! ```text
//! board/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request/response types and validation
//! ├── extract.rs   - Json/Path extractors with BackendError rejections
//! ├── service/     - BoardService: validate, guard, order, persist, emit
//! └── handlers/    - axum handlers for /boards routes
//! ```

pub mod extract;
pub mod handlers;
pub mod service;
pub mod types;

pub use service::BoardService;
