//! # Actix Middleware Library
//!
//! Request authorization for the todo service's protected routes
//!
//! ## Modules
//! - `jwt_auth`: bearer token gate and the `UserId` extractor

pub mod jwt_auth;

pub use jwt_auth::{JwtAuthMiddleware, UserId};
