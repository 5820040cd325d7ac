//! Authentication Module
//!
//! Account registration, login and profile management, plus the JWT/bcrypt
//! primitives the auth middleware relies on.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── sessions.rs     - IdentityProvider: bcrypt hashing, JWT issue/verify
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - POST /users/register
//!     ├── login.rs    - POST /users/login
//!     └── profile.rs  - GET|PUT|DELETE /users/profile
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email and password → user stored with a bcrypt hash
//! 2. **Login**: email and password verified → access and refresh tokens returned
//! 3. **Requests**: `Authorization: Bearer <access token>` → `auth_middleware`
//!    resolves the user and attaches `AuthenticatedUser`
//!
//! # Security
//!
//! - Access tokens expire after 12 hours by default, refresh tokens after 7 days
//! - Refresh tokens are rejected where an access token is expected
//! - Unknown emails and wrong passwords get the same response

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for account endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use handlers::{delete_profile, get_profile, login, register, update_profile};
pub use sessions::{AuthError, IdentityProvider, SessionTokens};
