//! Middleware Module
//!
//! HTTP middleware applied by the router before requests reach handlers.
//!
//! - **`auth`** - bearer-token authentication for the `/users/profile` and
//!   `/boards` routes

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
