//! Session token codec
//!
//! Signs and verifies the compact HS256 tokens carried in the session cookies
//! using the `jsonwebtoken` crate. Pure CPU work: no I/O, no shared state.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ledger_core::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which cookie a token was minted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Wire claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub kind: TokenKind,
}

/// Validated payload of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionIdentity {
    /// Seconds left before the token expires (never negative)
    #[must_use]
    pub fn remaining_secs(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

/// How long a signed token stays valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLifetime {
    /// Valid for a duration from the moment of signing
    Relative(Duration),
    /// Valid until an absolute Unix timestamp
    Until(i64),
}

impl TokenLifetime {
    /// Absolute expiry for a token signed at `now`
    #[must_use]
    pub fn expires_at(&self, now: DateTime<Utc>) -> i64 {
        match self {
            Self::Relative(duration) => (now + *duration).timestamp(),
            Self::Until(exp) => *exp,
        }
    }

    /// Length of a relative lifetime in seconds; `None` for absolute lifetimes
    #[must_use]
    pub fn as_secs(&self) -> Option<i64> {
        match self {
            Self::Relative(duration) => Some(duration.num_seconds()),
            Self::Until(_) => None,
        }
    }
}

/// Error when parsing a lifetime such as `"60min"` or `"7d"`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid token lifetime: {0}")]
pub struct LifetimeParseError(String);

impl FromStr for TokenLifetime {
    type Err = LifetimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, unit) = trimmed.split_at(split);

        let value: i64 = digits
            .parse()
            .map_err(|_| LifetimeParseError(s.to_string()))?;

        let duration = match unit.trim() {
            "" | "s" | "sec" | "secs" => Duration::seconds(value),
            "m" | "min" | "mins" => Duration::minutes(value),
            "h" | "hr" | "hrs" => Duration::hours(value),
            "d" | "day" | "days" => Duration::days(value),
            _ => return Err(LifetimeParseError(s.to_string())),
        };

        if value <= 0 {
            return Err(LifetimeParseError(s.to_string()));
        }

        Ok(Self::Relative(duration))
    }
}

impl fmt::Display for TokenLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative(duration) => write!(f, "{}s", duration.num_seconds()),
            Self::Until(exp) => write!(f, "until {exp}"),
        }
    }
}

/// Token verification failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Signature checked out but the expiry has passed; recoverable through refresh
    #[error("Token expired")]
    Expired,

    /// Well-formed token whose signature does not match the server secret
    #[error("Invalid token signature")]
    BadSignature,

    /// Undecodable header or payload, missing subject, or wrong token kind
    #[error("Malformed token")]
    Malformed,

    /// Failure not attributable to the token itself
    #[error("Token processing failed: {0}")]
    Unexpected(String),
}

/// Signs and verifies session tokens with a server-held secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    /// Create a new codec with the given secret
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a token for `user_id`
    ///
    /// # Errors
    /// Returns `TokenError::Unexpected` if encoding fails
    pub fn sign(
        &self,
        user_id: UserId,
        kind: TokenKind,
        lifetime: TokenLifetime,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: lifetime.expires_at(now),
            kind,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Unexpected(e.to_string()))
    }

    /// Verify a token and return its identity
    ///
    /// The signature is checked before the expiry, so a tampered token is
    /// `BadSignature` (or `Malformed` if it no longer decodes) and never `Expired`.
    ///
    /// # Errors
    /// Any [`TokenError`] variant
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<SessionIdentity, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| classify(e.kind()))?;
        let claims = data.claims;

        if claims.kind != kind {
            return Err(TokenError::Malformed);
        }

        let user_id = UserId::parse(&claims.sub).map_err(|_| TokenError::Malformed)?;

        let issued_at = Utc
            .timestamp_opt(claims.iat, 0)
            .single()
            .ok_or(TokenError::Malformed)?;
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(TokenError::Malformed)?;

        Ok(SessionIdentity {
            user_id,
            issued_at,
            expires_at,
        })
    }
}

fn classify(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::MissingAlgorithm
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::ImmatureSignature
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::Malformed,
        other => TokenError::Unexpected(format!("{other:?}")),
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret-key-that-is-long-enough")
    }

    fn hour() -> TokenLifetime {
        TokenLifetime::Relative(Duration::hours(1))
    }

    #[test]
    fn test_sign_then_verify() {
        let codec = codec();
        let user_id = UserId::new();

        let token = codec.sign(user_id, TokenKind::Access, hour()).unwrap();
        let identity = codec.verify(&token, TokenKind::Access).unwrap();

        assert_eq!(identity.user_id, user_id);
        assert!(identity.remaining_secs() > 3590);
        assert!(identity.remaining_secs() <= 3600);
    }

    #[test]
    fn test_expired_token() {
        let codec = codec();
        let two_hours_ago = Utc::now() - Duration::hours(2);
        let exp = two_hours_ago + Duration::hours(1);

        let token = codec
            .sign(UserId::new(), TokenKind::Access, TokenLifetime::Until(exp.timestamp()))
            .unwrap();

        assert_eq!(codec.verify(&token, TokenKind::Access), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let codec = codec();
        let token = codec.sign(UserId::new(), TokenKind::Access, hour()).unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        for i in 0..signature.len() {
            let mut bytes = signature.as_bytes().to_vec();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = format!("{head}.{}", String::from_utf8(bytes).unwrap());
            if tampered == token {
                continue;
            }
            // A non-canonical last character fails base64 before the signature check
            assert!(matches!(
                codec.verify(&tampered, TokenKind::Access),
                Err(TokenError::BadSignature | TokenError::Malformed)
            ));
        }
    }

    #[test]
    fn test_tampered_expired_token_is_never_expired() {
        let codec = codec();
        let exp = (Utc::now() - Duration::hours(1)).timestamp();
        let token = codec
            .sign(UserId::new(), TokenKind::Access, TokenLifetime::Until(exp))
            .unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        assert!(matches!(
            codec.verify(&tampered, TokenKind::Access),
            Err(TokenError::BadSignature | TokenError::Malformed)
        ));
    }

    #[test]
    fn test_foreign_secret_is_bad_signature() {
        let other = TokenCodec::new("a-completely-different-secret");
        let token = other.sign(UserId::new(), TokenKind::Access, hour()).unwrap();

        assert_eq!(codec().verify(&token, TokenKind::Access), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_foreign_secret_expired_is_bad_signature() {
        let other = TokenCodec::new("a-completely-different-secret");
        let exp = (Utc::now() - Duration::hours(1)).timestamp();
        let token = other
            .sign(UserId::new(), TokenKind::Refresh, TokenLifetime::Until(exp))
            .unwrap();

        assert_eq!(codec().verify(&token, TokenKind::Refresh), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_missing_subject_is_malformed() {
        let codec = codec();
        let claims = Claims {
            sub: String::new(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            kind: TokenKind::Access,
        };
        let token = encode(&Header::default(), &claims, &codec.encoding_key).unwrap();

        assert_eq!(codec.verify(&token, TokenKind::Access), Err(TokenError::Malformed));
    }

    #[test]
    fn test_wrong_kind_is_malformed() {
        let codec = codec();
        let token = codec.sign(UserId::new(), TokenKind::Refresh, hour()).unwrap();

        assert_eq!(codec.verify(&token, TokenKind::Access), Err(TokenError::Malformed));
        assert!(codec.verify(&token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert_eq!(
            codec().verify("invalid.token.here", TokenKind::Access),
            Err(TokenError::Malformed)
        );
        assert_eq!(codec().verify("", TokenKind::Access), Err(TokenError::Malformed));
    }

    #[test]
    fn test_until_lifetime_is_kept_exactly() {
        let codec = codec();
        let exp = (Utc::now() + Duration::minutes(10)).timestamp();
        let token = codec
            .sign(UserId::new(), TokenKind::Refresh, TokenLifetime::Until(exp))
            .unwrap();

        let identity = codec.verify(&token, TokenKind::Refresh).unwrap();
        assert_eq!(identity.expires_at.timestamp(), exp);
    }

    #[test]
    fn test_parse_lifetimes() {
        assert_eq!(
            "60min".parse::<TokenLifetime>().unwrap(),
            TokenLifetime::Relative(Duration::minutes(60))
        );
        assert_eq!(
            "7d".parse::<TokenLifetime>().unwrap(),
            TokenLifetime::Relative(Duration::days(7))
        );
        assert_eq!(
            "12h".parse::<TokenLifetime>().unwrap(),
            TokenLifetime::Relative(Duration::hours(12))
        );
        assert_eq!(
            "3600".parse::<TokenLifetime>().unwrap(),
            TokenLifetime::Relative(Duration::seconds(3600))
        );
        assert!("".parse::<TokenLifetime>().is_err());
        assert!("7w".parse::<TokenLifetime>().is_err());
        assert!("0d".parse::<TokenLifetime>().is_err());
        assert!("min".parse::<TokenLifetime>().is_err());
    }
}
