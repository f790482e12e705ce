//! Axum extractors for request handling
//!
//! Session identity, typed path ids, listing limits, and validated bodies.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use pagination::{Limit, LimitParams};
pub use path::IdPath;
pub use validated::ValidatedJson;
