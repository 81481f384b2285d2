//! Credential workflow orchestration.
//!
//! Composes the hasher, token service, and repository contracts into
//! the register / login / refresh / logout / reset workflows. All
//! durable state stays behind the repository traits; this service only
//! sequences the calls.

use std::collections::HashMap;
use std::sync::Arc;

use credo_shared::utils::validation::{sanitize_email, validate_email, validate_password};
use tracing::{debug, info, warn};

use crate::domain::entities::token::{Claims, RevocationReason, TokenKind};
use crate::domain::entities::user::NewUser;
use crate::domain::value_objects::{AccessTokenResponse, AuthResponse, ResetTokenResponse, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{RevocationRepository, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::mailer::{EmailTemplate, MailerService, NoOpMailer};

/// Credential orchestrator over account storage, hashing, and tokens
///
/// Every workflow takes raw caller input, normalizes and validates it,
/// and fails with the distinct domain error kind; collapsing those
/// kinds for callers happens at the boundary mapping, not here.
pub struct AuthService<U, R, M = NoOpMailer>
where
    U: UserRepository,
    R: RevocationRepository,
    M: MailerService,
{
    /// Account storage
    user_repository: Arc<U>,
    /// Token issuance, verification, and revocation
    token_service: Arc<TokenService<R>>,
    /// One-way password hashing
    password_hasher: PasswordHasher,
    /// Optional outbound notification delivery
    mailer: Option<Arc<M>>,
    /// Workflow policy
    config: AuthServiceConfig,
}

impl<U, R> AuthService<U, R, NoOpMailer>
where
    U: UserRepository,
    R: RevocationRepository,
{
    /// Create a credential service without a delivery backend
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<R>>,
        password_hasher: PasswordHasher,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            password_hasher,
            mailer: None,
            config,
        }
    }
}

impl<U, R, M> AuthService<U, R, M>
where
    U: UserRepository,
    R: RevocationRepository,
    M: MailerService,
{
    /// Create a credential service with an attached mailer
    pub fn with_mailer(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<R>>,
        password_hasher: PasswordHasher,
        mailer: Arc<M>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            password_hasher,
            mailer: Some(mailer),
            config,
        }
    }

    /// Register a new account
    ///
    /// Normalizes the email, aggregates every password-policy violation
    /// into one failure, stores the account (active, unverified), and
    /// issues the first token pair. The welcome email is best-effort
    /// and never blocks registration.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - The stored account and a fresh token pair
    /// * `Err(DomainError::Auth(AccountAlreadyExists))` - Email taken
    /// * `Err(DomainError::Validation(..))` - Bad email or weak password
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> DomainResult<AuthResponse> {
        let email = sanitize_email(email);
        if !validate_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let violations = validate_password(password);
        if !violations.is_empty() {
            return Err(ValidationError::PasswordPolicy { violations }.into());
        }

        let password_hash = self.password_hasher.hash(password)?;
        let user = self
            .user_repository
            .insert(NewUser {
                email: email.clone(),
                password_hash,
                first_name,
                last_name,
            })
            .await?;

        let tokens = self.token_service.issue_pair(user.id)?;
        info!(account_id = user.id, "account registered");

        let mut context = HashMap::new();
        context.insert("name".to_string(), user.full_name());
        self.dispatch_mail(EmailTemplate::Welcome, &email, context)
            .await;

        Ok(AuthResponse {
            user: UserProfile::from(&user),
            tokens,
        })
    }

    /// Authenticate with email and password
    ///
    /// A hash stored with a lower cost factor is transparently upgraded
    /// on the way through, so raising the configured cost never forces
    /// a password reset.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - The account and a fresh token pair
    /// * `Err(DomainError::Auth(AccountNotFound))` - No such email
    /// * `Err(DomainError::Auth(InvalidCredentials))` - Wrong password
    ///   or inactive account
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = sanitize_email(email);
        let mut user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !user.is_active {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !self.password_hasher.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        if self.password_hasher.needs_rehash(&user.password_hash) {
            let upgraded = self.password_hasher.hash(password)?;
            user.set_password_hash(upgraded);
            debug!(account_id = user.id, "password hash cost upgraded");
        }
        user.update_last_login();
        self.user_repository.update(&user).await?;

        let tokens = self.token_service.issue_pair(user.id)?;
        info!(account_id = user.id, "login succeeded");

        Ok(AuthResponse {
            user: UserProfile::from(&user),
            tokens,
        })
    }

    /// Exchange a refresh token for a new access token
    ///
    /// The refresh token itself is not rotated; it stays valid until it
    /// expires or is revoked. The account must still exist and be
    /// active at exchange time.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AccessTokenResponse> {
        let claims = self
            .token_service
            .verify(refresh_token, TokenKind::Refresh)
            .await?;

        let user = self
            .user_repository
            .find_by_id(claims.account_id()?)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        if !user.is_active {
            return Err(AuthError::InvalidCredentials.into());
        }

        let access_token = self.token_service.issue(user.id, TokenKind::Access, None)?;
        Ok(AccessTokenResponse::new(
            access_token,
            self.token_service.config().access_token_expiry,
        ))
    }

    /// Revoke a token, ending its session
    ///
    /// Idempotent: logging out with an already-revoked token is a no-op
    /// and leaves the single revocation record untouched. Expired or
    /// forged tokens still fail with their verification error.
    pub async fn logout(&self, token: &str, kind: TokenKind) -> DomainResult<()> {
        let claims = match self.token_service.verify(token, kind).await {
            Ok(claims) => claims,
            Err(DomainError::Token(TokenError::Revoked)) => return Ok(()),
            Err(e) => return Err(e),
        };

        self.token_service
            .revoke(&claims, RevocationReason::Logout)
            .await?;
        info!(account_id = %claims.sub, "logout recorded");
        Ok(())
    }

    /// Issue a password-reset token for an account
    ///
    /// Does not mutate the account. The token is returned to the caller
    /// and, when a mailer is attached, also dispatched to the account's
    /// address; delivery failure is reported in the response, never as
    /// an error.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<ResetTokenResponse> {
        let email = sanitize_email(email);
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let reset_token = self
            .token_service
            .issue(user.id, TokenKind::PasswordReset, None)?;
        let expires_in = self.token_service.config().reset_token_expiry;
        info!(account_id = user.id, "password reset requested");

        let mut context = HashMap::new();
        context.insert("reset_token".to_string(), reset_token.clone());
        context.insert("expires_in".to_string(), expires_in.to_string());
        let email_dispatched = self
            .dispatch_mail(EmailTemplate::PasswordReset, &email, context)
            .await;

        Ok(ResetTokenResponse::new(reset_token, expires_in, email_dispatched))
    }

    /// Rotate an account's password with a reset token
    ///
    /// The reset token is single-use: it is revoked on success, so a
    /// second confirmation with the same token fails as revoked. When
    /// the session-revocation policy flag is set, every token issued
    /// before this point is invalidated as well.
    pub async fn confirm_password_reset(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> DomainResult<AuthResponse> {
        let claims = self
            .token_service
            .verify(reset_token, TokenKind::PasswordReset)
            .await?;

        let violations = validate_password(new_password);
        if !violations.is_empty() {
            return Err(ValidationError::PasswordPolicy { violations }.into());
        }

        let mut user = self
            .user_repository
            .find_by_id(claims.account_id()?)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let password_hash = self.password_hasher.hash(new_password)?;
        user.set_password_hash(password_hash);
        self.user_repository.update(&user).await?;

        // Consume the reset token before issuing the replacement pair
        self.token_service
            .revoke(&claims, RevocationReason::PasswordReset)
            .await?;
        if self.config.revoke_sessions_on_password_reset {
            self.token_service.revoke_account(user.id).await?;
        }

        let tokens = self.token_service.issue_pair(user.id)?;
        info!(account_id = user.id, "password reset confirmed");

        Ok(AuthResponse {
            user: UserProfile::from(&user),
            tokens,
        })
    }

    /// Verify an access token for a protected-resource check
    pub async fn verify_token(&self, token: &str) -> DomainResult<Claims> {
        self.token_service.verify(token, TokenKind::Access).await
    }

    // Best-effort dispatch. Returns whether the mail was handed off.
    async fn dispatch_mail(
        &self,
        template: EmailTemplate,
        to: &str,
        context: HashMap<String, String>,
    ) -> bool {
        let Some(mailer) = self.mailer.as_ref() else {
            return false;
        };
        match mailer.send(template, to, context).await {
            Ok(()) => true,
            Err(e) => {
                warn!("email dispatch failed: {}", e);
                false
            }
        }
    }
}
