//! Unit tests for the credential workflows

use std::sync::Arc;

use credo_shared::utils::validation::PasswordViolation;

use super::mocks::{harness, harness_with_config, service_with_mailer, FailingMailer, RecordingMailer};
use crate::domain::entities::token::TokenKind;
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::auth::{AuthServiceConfig, EmailTemplate};

const EMAIL: &str = "user@example.com";
const PASSWORD: &str = "Abc12345!";

#[tokio::test]
async fn test_register_returns_account_and_pair() {
    let h = harness();

    let response = h
        .service
        .register(EMAIL, PASSWORD, Some("Ada".into()), Some("Lovelace".into()))
        .await
        .unwrap();

    assert_eq!(response.user.email, EMAIL);
    assert!(response.user.is_active);
    assert!(!response.user.is_verified);
    assert_eq!(response.tokens.token_type, "Bearer");
    assert!(h
        .service
        .verify_token(&response.tokens.access_token)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();

    let err = h
        .service
        .register(EMAIL, PASSWORD, None, None)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::AccountAlreadyExists));
}

#[tokio::test]
async fn test_register_normalizes_email() {
    let h = harness();
    h.service
        .register("  User@EXAMPLE.com ", PASSWORD, None, None)
        .await
        .unwrap();

    // Stored sanitized; a lookup with a differently-cased form matches
    assert!(h.service.login("USER@example.COM", PASSWORD).await.is_ok());
    let stored = h.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(stored.email, EMAIL);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let h = harness();
    let err = h
        .service
        .register("no-at-sign", PASSWORD, None, None)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Validation(ValidationError::InvalidEmail));
}

#[tokio::test]
async fn test_register_aggregates_password_violations() {
    let h = harness();
    let err = h.service.register(EMAIL, "abc", None, None).await.unwrap_err();

    match err {
        DomainError::Validation(ValidationError::PasswordPolicy { violations }) => {
            assert!(violations.contains(&PasswordViolation::TooShort));
            assert!(violations.contains(&PasswordViolation::MissingUppercase));
            assert!(violations.contains(&PasswordViolation::MissingDigit));
            assert!(violations.contains(&PasswordViolation::MissingSymbol));
        }
        other => panic!("expected password policy failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_roundtrip_updates_last_login() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();

    let response = h.service.login(EMAIL, PASSWORD).await.unwrap();
    assert!(response.user.last_login_at.is_some());
}

#[tokio::test]
async fn test_login_unknown_email_is_not_found() {
    let h = harness();
    let err = h.service.login(EMAIL, PASSWORD).await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::AccountNotFound));
}

#[tokio::test]
async fn test_repeated_wrong_password_never_locks_account() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();

    for _ in 0..3 {
        let err = h.service.login(EMAIL, "Wrong1234!").await.unwrap_err();
        assert_eq!(err, DomainError::Auth(AuthError::InvalidCredentials));
    }

    // No lockout: the account stays active and the right password works
    let stored = h.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(stored.is_active);
    assert!(h.service.login(EMAIL, PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_login_inactive_account_is_invalid_credentials() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();

    let mut stored = h.users.find_by_email(EMAIL).await.unwrap().unwrap();
    stored.deactivate();
    h.users.update(&stored).await.unwrap();

    let err = h.service.login(EMAIL, PASSWORD).await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_upgrades_lower_cost_hash() {
    use crate::services::password::PasswordHasher;
    use crate::services::auth::AuthService;
    use crate::repositories::user_repository::mock::MockUserRepository;
    use crate::domain::entities::user::NewUser;
    use super::mocks::{token_service, TEST_COST};

    let users = Arc::new(MockUserRepository::new());
    let old_hash = PasswordHasher::new(TEST_COST).hash(PASSWORD).unwrap();
    users
        .insert(NewUser {
            email: EMAIL.to_string(),
            password_hash: old_hash.clone(),
            first_name: None,
            last_name: None,
        })
        .await
        .unwrap();

    // Service configured one cost step above the stored hash
    let service = AuthService::new(
        Arc::clone(&users),
        token_service(),
        PasswordHasher::new(TEST_COST + 1),
        AuthServiceConfig::default(),
    );

    service.login(EMAIL, PASSWORD).await.unwrap();

    let stored = users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, old_hash);
    assert!(!PasswordHasher::new(TEST_COST + 1).needs_rehash(&stored.password_hash));
}

#[tokio::test]
async fn test_refresh_issues_new_access_token_only() {
    let h = harness();
    let registered = h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();

    let refreshed = h
        .service
        .refresh(&registered.tokens.refresh_token)
        .await
        .unwrap();

    assert_eq!(refreshed.token_type, "Bearer");
    assert_ne!(refreshed.access_token, registered.tokens.access_token);
    assert!(h.service.verify_token(&refreshed.access_token).await.is_ok());
    // The refresh token itself is not rotated
    assert!(h
        .service
        .refresh(&registered.tokens.refresh_token)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let h = harness();
    let registered = h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();

    let err = h
        .service
        .refresh(&registered.tokens.access_token)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::WrongKind { .. })
    ));
}

#[tokio::test]
async fn test_refresh_fails_for_deactivated_account() {
    let h = harness();
    let registered = h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();

    let mut stored = h.users.find_by_email(EMAIL).await.unwrap().unwrap();
    stored.deactivate();
    h.users.update(&stored).await.unwrap();

    let err = h
        .service
        .refresh(&registered.tokens.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_logout_revokes_access_token() {
    let h = harness();
    let registered = h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();
    let access = registered.tokens.access_token;

    h.service.logout(&access, TokenKind::Access).await.unwrap();

    let err = h.service.verify_token(&access).await.unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::Revoked));
    // Sibling refresh token keeps working
    assert!(h
        .service
        .refresh(&registered.tokens.refresh_token)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_logout_twice_is_a_noop() {
    let h = harness();
    let registered = h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();
    let access = registered.tokens.access_token;

    h.service.logout(&access, TokenKind::Access).await.unwrap();
    // Second logout with the same token: no error, no duplicate record
    h.service.logout(&access, TokenKind::Access).await.unwrap();
    assert_eq!(h.tokens.repository.len().await, 1);
}

#[tokio::test]
async fn test_logout_rejects_garbage_token() {
    let h = harness();
    let err = h
        .service
        .logout("not-a-token", TokenKind::Access)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::Malformed));
}

#[tokio::test]
async fn test_request_reset_does_not_mutate_account() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();
    let before = h.users.find_by_email(EMAIL).await.unwrap().unwrap();

    let response = h.service.request_password_reset(EMAIL).await.unwrap();
    assert!(!response.reset_token.is_empty());
    assert_eq!(response.expires_in, h.tokens.config().reset_token_expiry);
    assert!(!response.email_dispatched);

    let after = h.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_request_reset_unknown_email_is_not_found() {
    let h = harness();
    let err = h.service.request_password_reset(EMAIL).await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::AccountNotFound));
}

#[tokio::test]
async fn test_confirm_reset_rotates_password() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();
    let reset = h.service.request_password_reset(EMAIL).await.unwrap();

    let response = h
        .service
        .confirm_password_reset(&reset.reset_token, "Fresh9876$")
        .await
        .unwrap();
    assert!(h.service.verify_token(&response.tokens.access_token).await.is_ok());

    let err = h.service.login(EMAIL, PASSWORD).await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::InvalidCredentials));
    assert!(h.service.login(EMAIL, "Fresh9876$").await.is_ok());
}

#[tokio::test]
async fn test_reset_token_is_single_use() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();
    let reset = h.service.request_password_reset(EMAIL).await.unwrap();

    h.service
        .confirm_password_reset(&reset.reset_token, "Fresh9876$")
        .await
        .unwrap();

    let err = h
        .service
        .confirm_password_reset(&reset.reset_token, "Other5432#")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::Revoked));
}

#[tokio::test]
async fn test_confirm_reset_rejects_weak_password_without_consuming_token() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();
    let reset = h.service.request_password_reset(EMAIL).await.unwrap();

    let err = h
        .service
        .confirm_password_reset(&reset.reset_token, "weak")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::PasswordPolicy { .. })
    ));

    // The failed attempt did not consume the token
    assert!(h
        .service
        .confirm_password_reset(&reset.reset_token, "Fresh9876$")
        .await
        .is_ok());
}

#[tokio::test]
async fn test_reset_with_session_revocation_invalidates_old_refresh_tokens() {
    let h = harness_with_config(AuthServiceConfig {
        revoke_sessions_on_password_reset: true,
    });
    let registered = h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();

    // Re-sign the refresh token as if issued a minute earlier so it
    // falls behind the invalidation watermark deterministically
    let mut claims = h.tokens.codec.decode(&registered.tokens.refresh_token).unwrap();
    claims.iat -= 60;
    let old_refresh = h.tokens.codec.encode(&claims).unwrap();

    let reset = h.service.request_password_reset(EMAIL).await.unwrap();
    let response = h
        .service
        .confirm_password_reset(&reset.reset_token, "Fresh9876$")
        .await
        .unwrap();

    let err = h.service.refresh(&old_refresh).await.unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::Revoked));
    // The pair issued by the reset itself stays valid
    assert!(h.service.refresh(&response.tokens.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_reset_without_flag_leaves_old_sessions_valid() {
    let h = harness();
    let registered = h.service.register(EMAIL, PASSWORD, None, None).await.unwrap();

    let reset = h.service.request_password_reset(EMAIL).await.unwrap();
    h.service
        .confirm_password_reset(&reset.reset_token, "Fresh9876$")
        .await
        .unwrap();

    assert!(h.service.refresh(&registered.tokens.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_register_dispatches_welcome_email() {
    let mailer = Arc::new(RecordingMailer::new());
    let service = service_with_mailer(Arc::clone(&mailer));

    service
        .register(EMAIL, PASSWORD, Some("Ada".into()), None)
        .await
        .unwrap();

    let sent = mailer.sent.read().await;
    assert_eq!(sent.len(), 1);
    let (template, to, context) = &sent[0];
    assert_eq!(*template, EmailTemplate::Welcome);
    assert_eq!(to, EMAIL);
    assert_eq!(context.get("name").map(String::as_str), Some("Ada"));
}

#[tokio::test]
async fn test_reset_request_dispatches_token_by_mail() {
    let mailer = Arc::new(RecordingMailer::new());
    let service = service_with_mailer(Arc::clone(&mailer));
    service.register(EMAIL, PASSWORD, None, None).await.unwrap();

    let response = service.request_password_reset(EMAIL).await.unwrap();
    assert!(response.email_dispatched);

    let sent = mailer.sent.read().await;
    let (template, _, context) = sent.last().unwrap();
    assert_eq!(*template, EmailTemplate::PasswordReset);
    assert_eq!(
        context.get("reset_token").map(String::as_str),
        Some(response.reset_token.as_str())
    );
}

#[tokio::test]
async fn test_mail_failure_never_blocks_the_workflow() {
    let service = service_with_mailer(Arc::new(FailingMailer));
    service.register(EMAIL, PASSWORD, None, None).await.unwrap();

    let response = service.request_password_reset(EMAIL).await.unwrap();
    assert!(!response.email_dispatched);
    assert!(!response.reset_token.is_empty());
}
