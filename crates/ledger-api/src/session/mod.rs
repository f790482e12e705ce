//! Cookie sessions: issuing, clearing, and request gating

mod cookies;
mod middleware;

pub use cookies::{SessionCookies, ACCESS_COOKIE, REFRESH_COOKIE};
pub use middleware::{forbid_auth, require_auth, require_refresh, RefreshSession};
