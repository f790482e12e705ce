//! Authentication primitives: session token codec and password hashing

mod password;
mod token;

pub use password::{hash_password, validate_password_strength, verify_password};
pub use token::{
    Claims, LifetimeParseError, SessionIdentity, TokenCodec, TokenError, TokenKind, TokenLifetime,
};
