//! Signup, login, logout, token refresh, email verification, and
//! password-reset flows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use bookly_auth::jwt::claims::{TokenKind, TokenUser};
use bookly_auth::password::PasswordHasher;
use bookly_auth::tokens::TokenService;
use bookly_auth::verify::VerificationTokenCodec;
use bookly_core::error::AppError;
use bookly_core::result::AppResult;
use bookly_core::traits::mail::Mailer;
use bookly_database::repositories::user::UserRepository;
use bookly_entity::user::model::CreateUser;
use bookly_entity::user::{User, UserRole};

/// Data collected at signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupData {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Short-lived access token.
    pub access_token: String,
    /// Longer-lived refresh token.
    pub refresh_token: String,
    /// The authenticated user.
    pub user: User,
}

/// Handles account lifecycle and credential flows.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token issuer/verifier.
    tokens: Arc<TokenService>,
    /// Out-of-band verification token codec.
    verification: Arc<VerificationTokenCodec>,
    /// Mail sender (fire-and-forget).
    mailer: Arc<dyn Mailer>,
    /// Public base URL for links placed in mail.
    frontend_url: String,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<TokenService>,
        verification: Arc<VerificationTokenCodec>,
        mailer: Arc<dyn Mailer>,
        frontend_url: String,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
            verification,
            mailer,
            frontend_url,
        }
    }

    /// Creates a new account and sends a verification link.
    ///
    /// Fails with `Conflict` when the email is already registered. The
    /// verification mail is dispatched on a background task; delivery
    /// problems never fail the signup itself.
    pub async fn signup(&self, data: SignupData) -> AppResult<User> {
        if self.user_repo.exists_by_email(&data.email).await? {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }

        let password_hash = self.hasher.hash_password(&data.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: data.username,
                email: data.email,
                password_hash,
                first_name: data.first_name,
                last_name: data.last_name,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, "New account created");

        let token = self.verification.create(&user.email)?;
        let link = format!("{}/api/auth/verify/{token}", self.frontend_url);
        self.send_mail_in_background(
            vec![user.email.clone()],
            "Verify your Bookly account".to_string(),
            format!(
                "<h1>Welcome to Bookly</h1>\
                 <p>Click <a href=\"{link}\">here</a> to verify your email address.</p>"
            ),
        );

        Ok(user)
    }

    /// Marks the account behind a verification link as verified.
    ///
    /// Idempotent: re-verifying an already-verified account succeeds.
    pub async fn verify_email(&self, token: &str) -> AppResult<User> {
        let email = self.verification.decode(token)?;
        let user = self.user_repo.mark_verified(&email).await?;
        info!(user_id = %user.id, "Email verified");
        Ok(user)
    }

    /// Authenticates with email and password, issuing a token pair.
    ///
    /// Unknown email and wrong password produce the same outcome so the
    /// endpoint cannot be used as an account oracle.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash) {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let identity = TokenUser {
            email: user.email.clone(),
            user_id: user.id,
            role: Some(user.role),
        };

        let access_token = self.tokens.issue_access_token(&identity)?;
        let refresh_token = self.tokens.issue_refresh_token(&identity)?;

        info!(user_id = %user.id, "Login successful");

        Ok(LoginOutcome {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Exchanges a refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.tokens.verify(refresh_token, TokenKind::Refresh).await?;
        self.tokens.issue_access_token(&claims.user)
    }

    /// Revokes the presented access token (logout).
    ///
    /// Only this token is revoked; any outstanding refresh token stays
    /// valid until its own expiry.
    pub async fn logout(&self, jti: Uuid) -> AppResult<()> {
        self.tokens.revoke(jti).await?;
        info!(%jti, "Token revoked on logout");
        Ok(())
    }

    /// Sends a password-reset link if the email belongs to an account.
    ///
    /// Always succeeds from the caller's perspective, whether or not the
    /// account exists.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        if !self.user_repo.exists_by_email(email).await? {
            info!("Password reset requested for unknown email");
            return Ok(());
        }

        let token = self.verification.create(email)?;
        let link = format!(
            "{}/api/auth/password-reset-confirm/{token}",
            self.frontend_url
        );
        self.send_mail_in_background(
            vec![email.to_string()],
            "Reset your Bookly password".to_string(),
            format!(
                "<h1>Password reset</h1>\
                 <p>Click <a href=\"{link}\">here</a> to choose a new password.</p>"
            ),
        );

        Ok(())
    }

    /// Sets a new password for the account behind a reset link.
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
        confirm_new_password: &str,
    ) -> AppResult<()> {
        if new_password != confirm_new_password {
            return Err(AppError::validation("Passwords do not match"));
        }

        let email = self.verification.decode(token)?;
        let password_hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(&email, &password_hash).await?;

        info!("Password reset completed");
        Ok(())
    }

    /// Spawns a mail send onto a background task. Failures are logged and
    /// otherwise dropped.
    fn send_mail_in_background(&self, addresses: Vec<String>, subject: String, html: String) {
        let mailer = Arc::clone(&self.mailer);
        tokio::spawn(async move {
            if let Err(e) = mailer.send_email(&addresses, &subject, &html).await {
                error!(error = %e, "Background mail send failed");
            }
        });
    }
}
