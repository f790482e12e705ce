//! Authentication service
//!
//! Credential checks only. Sessions are stateless: the HTTP layer turns the
//! returned user into a pair of signed cookies, so nothing is stored here.

use ledger_common::auth::{hash_password, validate_password_strength, verify_password};
use ledger_common::AppError;
use ledger_core::{DomainError, User, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        validate_password_strength(&request.password)?;

        let email = normalize_email(&request.email);
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(email, request.display_name.trim().to_string());
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check email and password
    ///
    /// Unknown email and wrong password fail identically.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<User> {
        let email = normalize_email(&request.email);

        let Some(user) = self.ctx.user_repo().find_by_email(&email).await? else {
            warn!("Login failed: unknown email");
            return Err(AppError::InvalidCredentials.into());
        };

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Load the user behind an authenticated session
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    /// Confirm a refresh token still belongs to an existing user
    ///
    /// A deleted user's refresh token is treated as invalid.
    #[instrument(skip(self))]
    pub async fn ensure_active(&self, user_id: UserId) -> ServiceResult<User> {
        match self.ctx.user_repo().find_by_id(user_id).await? {
            Some(user) => Ok(user),
            None => {
                warn!("Refresh for unknown user");
                Err(AppError::InvalidToken.into())
            }
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
