//! Auth Gate: admin login, one-time admin bootstrap, and token verification.

use std::sync::Arc;

use folio_core::error::CoreError;
use folio_core::roles::{is_admin, ROLE_ADMIN};
use folio_core::types::DbId;
use folio_db::models::user::{CreateUser, User};
use folio_db::store::UserStore;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, validate_token, Claims, JwtConfig};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{is_unique_violation, AppError, AppResult};

/// Partial unique index allowing at most one admin row.
const SINGLE_ADMIN_CONSTRAINT: &str = "uq_users_single_admin";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /admin/create`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct BootstrapAdmin {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Redacted user summary. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AuthGate {
    users: Arc<dyn UserStore>,
    jwt: Arc<JwtConfig>,
    min_password_length: usize,
}

impl AuthGate {
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtConfig, min_password_length: usize) -> Self {
        Self {
            users,
            jwt: Arc::new(jwt),
            min_password_length,
        }
    }

    /// Exchange admin credentials for a bearer token.
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, input: LoginRequest) -> AppResult<LoginResponse> {
        let email = normalize_email(&input.email);
        if email.is_empty() || input.password.is_empty() {
            return Err(CoreError::Validation("email and password are required".into()).into());
        }

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        let password_valid = verify_password(&input.password, &user.password_hash)
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;
        if !password_valid {
            return Err(CoreError::InvalidCredentials.into());
        }

        if !is_admin(&user.role) {
            return Err(CoreError::Forbidden("Admin access required".into()).into());
        }

        let token = generate_access_token(user.id, &user.role, &self.jwt)
            .map_err(|e| CoreError::Internal(format!("Token generation error: {e}")))?;

        tracing::info!(user_id = user.id, "Admin logged in");

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    /// Create the singleton admin account.
    ///
    /// Fails with `AlreadyExists` once any admin exists, whatever the input.
    pub async fn bootstrap_admin(&self, input: BootstrapAdmin) -> AppResult<UserInfo> {
        if self.users.admin_exists().await? {
            return Err(already_exists());
        }

        let input = BootstrapAdmin {
            username: input.username.trim().to_string(),
            email: normalize_email(&input.email),
            password: input.password,
        };
        input.validate().map_err(CoreError::from)?;
        validate_password_strength(&input.password, self.min_password_length)
            .map_err(CoreError::Validation)?;

        let password_hash = hash_password(&input.password)
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;

        let user = self
            .users
            .create(&CreateUser {
                username: input.username,
                email: input.email,
                password_hash,
                role: ROLE_ADMIN.to_string(),
            })
            .await
            .map_err(|e| {
                // Lost a race with a concurrent bootstrap.
                if is_unique_violation(&e, SINGLE_ADMIN_CONSTRAINT) {
                    already_exists()
                } else {
                    AppError::from(e)
                }
            })?;

        tracing::info!(user_id = user.id, "Admin account created");
        Ok(user.into())
    }

    /// Verify a bearer token's signature and expiry.
    ///
    /// The user record is not re-read: a token stays valid until it expires.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        validate_token(token, &self.jwt)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()).into())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn already_exists() -> AppError {
    CoreError::AlreadyExists("Admin user already exists".into()).into()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use folio_db::store::MemoryStore;

    use super::*;

    fn gate(users: Arc<MemoryStore>) -> AuthGate {
        AuthGate::new(
            users,
            JwtConfig {
                secret: "unit-test-secret".into(),
                token_expiry_hours: 24,
            },
            8,
        )
    }

    fn bootstrap_input() -> BootstrapAdmin {
        BootstrapAdmin {
            username: "admin".into(),
            email: "Admin@Example.com".into(),
            password: "s3cure-passw0rd".into(),
        }
    }

    #[tokio::test]
    async fn bootstrap_then_login_issues_verifiable_token() {
        let gate = gate(Arc::new(MemoryStore::new()));

        let created = gate.bootstrap_admin(bootstrap_input()).await.unwrap();
        assert_eq!(created.email, "admin@example.com");
        assert_eq!(created.role, ROLE_ADMIN);

        let response = gate
            .login(LoginRequest {
                email: "admin@example.com".into(),
                password: "s3cure-passw0rd".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.user, created);

        let claims = gate.verify(&response.token).unwrap();
        assert_eq!(claims.sub, created.id);
        assert_eq!(claims.role, ROLE_ADMIN);
    }

    #[tokio::test]
    async fn second_bootstrap_fails_regardless_of_input() {
        let gate = gate(Arc::new(MemoryStore::new()));
        gate.bootstrap_admin(bootstrap_input()).await.unwrap();

        let err = gate
            .bootstrap_admin(BootstrapAdmin {
                username: String::new(),
                email: "not-an-email".into(),
                password: "x".into(),
            })
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::AlreadyExists(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_bootstraps_create_exactly_one_admin() {
        let store = Arc::new(MemoryStore::new());
        let gate = gate(store.clone());

        let first = tokio::spawn({
            let gate = gate.clone();
            async move { gate.bootstrap_admin(bootstrap_input()).await }
        });
        let second = tokio::spawn({
            let gate = gate.clone();
            async move {
                gate.bootstrap_admin(BootstrapAdmin {
                    username: "other".into(),
                    email: "other@example.com".into(),
                    ..bootstrap_input()
                })
                .await
            }
        });
        let results = [first.await.unwrap(), second.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let err = results.into_iter().find_map(Result::err).unwrap();
        assert_matches!(err, AppError::Core(CoreError::AlreadyExists(_)));

        let admins = [
            store.find_by_email("admin@example.com").await.unwrap(),
            store.find_by_email("other@example.com").await.unwrap(),
        ];
        assert_eq!(admins.iter().flatten().count(), 1);
    }

    #[tokio::test]
    async fn bootstrap_rejects_short_password() {
        let gate = gate(Arc::new(MemoryStore::new()));
        let err = gate
            .bootstrap_admin(BootstrapAdmin {
                password: "short".into(),
                ..bootstrap_input()
            })
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn bootstrap_stores_only_the_hash() {
        let store = Arc::new(MemoryStore::new());
        let gate = gate(store.clone());
        gate.bootstrap_admin(bootstrap_input()).await.unwrap();

        let user = store
            .find_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(user.password_hash, "s3cure-passw0rd");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_fail_identically() {
        let gate = gate(Arc::new(MemoryStore::new()));
        gate.bootstrap_admin(bootstrap_input()).await.unwrap();

        let unknown = gate
            .login(LoginRequest {
                email: "nobody@example.com".into(),
                password: "s3cure-passw0rd".into(),
            })
            .await
            .unwrap_err();
        let wrong = gate
            .login(LoginRequest {
                email: "admin@example.com".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();

        assert_matches!(unknown, AppError::Core(CoreError::InvalidCredentials));
        assert_matches!(wrong, AppError::Core(CoreError::InvalidCredentials));
    }

    #[tokio::test]
    async fn non_admin_login_is_forbidden() {
        let store = Arc::new(MemoryStore::new());
        UserStore::create(
            store.as_ref(),
            &CreateUser {
                username: "editor".into(),
                email: "editor@example.com".into(),
                password_hash: hash_password("editor-password").unwrap(),
                role: "editor".into(),
            },
        )
        .await
        .unwrap();

        let err = gate(store)
            .login(LoginRequest {
                email: "editor@example.com".into(),
                password: "editor-password".into(),
            })
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        let gate = gate(Arc::new(MemoryStore::new()));
        assert_matches!(
            gate.verify("garbage"),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
    }
}
