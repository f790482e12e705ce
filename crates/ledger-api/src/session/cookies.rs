//! Session cookies
//!
//! Two HTTP-only cookies carry the whole session: a short-lived access token
//! sent everywhere and a refresh token only sent to the refresh endpoint.
//! Removal cookies are produced by the same builder as the originals, since a
//! browser only drops a cookie whose path and flags match the stored one.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use ledger_common::{
    CookieConfig, JwtConfig, SessionIdentity, TokenCodec, TokenError, TokenKind, TokenLifetime,
};
use ledger_core::UserId;
use time::OffsetDateTime;

/// Name of the access token cookie
pub const ACCESS_COOKIE: &str = "access_token";

/// Name of the refresh token cookie
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Issues, reads, and clears the session cookie pair
#[derive(Clone)]
pub struct SessionCookies {
    codec: Arc<TokenCodec>,
    access_ttl: TokenLifetime,
    refresh_ttl: TokenLifetime,
    secure: bool,
    refresh_path: String,
}

impl SessionCookies {
    pub fn new(codec: Arc<TokenCodec>, jwt: &JwtConfig, cookies: &CookieConfig) -> Self {
        Self {
            codec,
            access_ttl: jwt.access_token_ttl,
            refresh_ttl: jwt.refresh_token_ttl,
            secure: cookies.secure,
            refresh_path: cookies.refresh_path.clone(),
        }
    }

    /// Sign a fresh pair and set both cookies.
    ///
    /// With `remaining_secs` the refresh token expires that many seconds from
    /// now instead of after the full refresh lifetime; rotation passes the old
    /// token's remainder so a session never outlives its first login.
    pub fn issue(
        &self,
        jar: CookieJar,
        user_id: UserId,
        remaining_secs: Option<i64>,
    ) -> Result<CookieJar, TokenError> {
        let now = Utc::now();
        let refresh_lifetime = match remaining_secs {
            Some(secs) => TokenLifetime::Until(now.timestamp() + secs.max(0)),
            None => self.refresh_ttl,
        };
        let cookie_secs = refresh_lifetime.expires_at(now) - now.timestamp();

        let access = self.codec.sign(user_id, TokenKind::Access, self.access_ttl)?;
        let refresh = self
            .codec
            .sign(user_id, TokenKind::Refresh, refresh_lifetime)?;

        // The access cookie lives as long as the refresh token so an expired
        // access token still reaches the server and can be reported as refreshable
        let max_age = time::Duration::seconds(cookie_secs.max(0));
        Ok(jar
            .add(self.build(ACCESS_COOKIE, access, max_age))
            .add(self.build(REFRESH_COOKIE, refresh, max_age)))
    }

    /// Expire both cookies; safe to repeat
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.removal(ACCESS_COOKIE))
            .add(self.removal(REFRESH_COOKIE))
    }

    /// Non-empty access token from the request
    pub fn access_token<'a>(&self, jar: &'a CookieJar) -> Option<&'a str> {
        non_empty(jar, ACCESS_COOKIE)
    }

    /// Non-empty refresh token from the request
    pub fn refresh_token<'a>(&self, jar: &'a CookieJar) -> Option<&'a str> {
        non_empty(jar, REFRESH_COOKIE)
    }

    pub fn verify_access(&self, token: &str) -> Result<SessionIdentity, TokenError> {
        self.codec.verify(token, TokenKind::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<SessionIdentity, TokenError> {
        self.codec.verify(token, TokenKind::Refresh)
    }

    fn path(&self, name: &str) -> String {
        if name == REFRESH_COOKIE {
            self.refresh_path.clone()
        } else {
            "/".to_string()
        }
    }

    fn build(&self, name: &'static str, value: String, max_age: time::Duration) -> Cookie<'static> {
        Cookie::build((name, value))
            .path(self.path(name))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::None)
            .max_age(max_age)
            .build()
    }

    fn removal(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.build(name, String::new(), time::Duration::ZERO);
        cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
        cookie
    }
}

impl std::fmt::Debug for SessionCookies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCookies")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("secure", &self.secure)
            .field("refresh_path", &self.refresh_path)
            .finish_non_exhaustive()
    }
}

fn non_empty<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(Cookie::value).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap};
    use axum::response::IntoResponse;

    const SECRET: &str = "cookie-test-secret-with-32-bytes!!";

    fn sessions() -> SessionCookies {
        SessionCookies::new(
            Arc::new(TokenCodec::new(SECRET)),
            &JwtConfig::with_secret(SECRET),
            &CookieConfig::default(),
        )
    }

    fn set_cookies(jar: CookieJar) -> Vec<String> {
        let response = (jar, ()).into_response();
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    fn find<'a>(headers: &'a [String], name: &str) -> &'a str {
        headers
            .iter()
            .find(|h| h.starts_with(&format!("{name}=")))
            .unwrap()
    }

    #[test]
    fn test_issue_sets_both_cookies() {
        let sessions = sessions();
        let user = UserId::new();
        let headers = set_cookies(sessions.issue(CookieJar::new(), user, None).unwrap());
        assert_eq!(headers.len(), 2);

        let access = find(&headers, ACCESS_COOKIE);
        assert!(access.contains("HttpOnly"));
        assert!(access.contains("Secure"));
        assert!(access.contains("SameSite=None"));
        assert!(access.contains("Path=/;") || access.ends_with("Path=/"));
        assert!(access.contains("Max-Age=604800"));

        let refresh = find(&headers, REFRESH_COOKIE);
        assert!(refresh.contains("Path=/api/v1/auth/refresh"));
        assert!(refresh.contains("Max-Age=604800"));
    }

    #[test]
    fn test_issued_tokens_verify() {
        let sessions = sessions();
        let user = UserId::new();
        let jar = sessions.issue(CookieJar::new(), user, None).unwrap();

        let access = sessions.access_token(&jar).unwrap();
        assert_eq!(sessions.verify_access(access).unwrap().user_id, user);
        let refresh = sessions.refresh_token(&jar).unwrap();
        assert_eq!(sessions.verify_refresh(refresh).unwrap().user_id, user);

        // Tokens are not interchangeable
        assert_eq!(sessions.verify_refresh(access), Err(TokenError::Malformed));
    }

    #[test]
    fn test_rotation_caps_refresh_lifetime() {
        let sessions = sessions();
        let jar = sessions.issue(CookieJar::new(), UserId::new(), Some(120)).unwrap();

        let refresh = sessions.refresh_token(&jar).unwrap();
        let identity = sessions.verify_refresh(refresh).unwrap();
        assert!(identity.remaining_secs() <= 120);

        let headers = set_cookies(jar);
        assert!(find(&headers, REFRESH_COOKIE).contains("Max-Age=120"));
    }

    #[test]
    fn test_clear_matches_issue_attributes() {
        let sessions = sessions();
        let headers = set_cookies(sessions.clear(CookieJar::new()));

        let access = find(&headers, ACCESS_COOKIE);
        assert!(access.starts_with("access_token=;"));
        assert!(access.contains("HttpOnly"));
        assert!(access.contains("SameSite=None"));
        assert!(access.contains("Max-Age=0"));

        let refresh = find(&headers, REFRESH_COOKIE);
        assert!(refresh.contains("Path=/api/v1/auth/refresh"));
        assert!(refresh.contains("Secure"));
    }

    #[test]
    fn test_double_clear_is_identical() {
        let sessions = sessions();
        let mut first = set_cookies(sessions.clear(CookieJar::new()));
        let mut second = set_cookies(sessions.clear(sessions.clear(CookieJar::new())));
        first.sort();
        second.sort();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_cookie_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "access_token=".parse().unwrap());
        let jar = CookieJar::from_headers(&headers);
        assert!(sessions().access_token(&jar).is_none());
    }
}
