//! Account Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! └── profile.rs  - Profile read, update and delete
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /users/register
//! - **`login`** - POST /users/login
//! - **`get_profile`** - GET /users/profile
//! - **`update_profile`** - PUT /users/profile
//! - **`delete_profile`** - DELETE /users/profile

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Profile handlers
pub mod profile;

pub use login::login;
pub use profile::{delete_profile, get_profile, update_profile};
pub use register::register;
