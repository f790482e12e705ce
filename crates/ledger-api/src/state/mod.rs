//! Application state
//!
//! Holds the shared state for the Axum application: the service context and
//! the session cookie settings.

use std::sync::Arc;

use ledger_service::ServiceContext;

use crate::session::SessionCookies;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    sessions: SessionCookies,
}

impl AppState {
    pub fn new(service_context: ServiceContext, sessions: SessionCookies) -> Self {
        Self {
            service_context: Arc::new(service_context),
            sessions,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the session cookie manager
    pub fn sessions(&self) -> &SessionCookies {
        &self.sessions
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("sessions", &self.sessions)
            .finish()
    }
}
