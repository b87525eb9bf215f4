//! Authentication service - Issues and verifies access tokens.
//!
//! Accounts authenticate elsewhere; this service only deals with the
//! bearer JWT presented to the admin surface.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Account, Actor, Role};
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn role(&self) -> Role {
        Role::from(self.role.as_str())
    }

    /// Identity recorded on audited operations
    pub fn actor(&self) -> Actor {
        Actor::new(self.sub)
    }
}

/// Authentication service trait for dependency injection.
pub trait AuthService: Send + Sync {
    /// Sign a token for an account
    fn issue_token(&self, account: &Account) -> AppResult<String>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Verify a token and require the admin role
    fn authorize_admin(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;
        if !claims.role().is_admin() {
            return Err(AppError::Forbidden);
        }
        Ok(claims)
    }
}

/// HMAC-signed JWTs keyed by `JWT_SECRET`.
pub struct Authenticator {
    config: Config,
}

impl Authenticator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl AuthService for Authenticator {
    fn issue_token(&self, account: &Account) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: account.id,
            email: account.email.clone(),
            role: account.role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(token)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoleAssignable;

    fn authenticator() -> Authenticator {
        Authenticator::new(Config::new(
            "sqlite::memory:",
            "a-test-secret-that-is-long-enough-32",
        ))
    }

    fn account(role: Role) -> Account {
        let mut account = Account::new(
            Uuid::new_v4(),
            "admin@example.com".to_string(),
            "Admin".to_string(),
        );
        account.assign_role(role);
        account
    }

    #[test]
    fn test_issue_and_verify_token() {
        let auth = authenticator();
        let admin = account(Role::Admin);

        let token = auth.issue_token(&admin).unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, admin.id);
        assert_eq!(claims.role(), Role::Admin);
        assert_eq!(claims.actor(), Actor::new(admin.id));
    }

    #[test]
    fn test_authorize_admin_rejects_other_roles() {
        let auth = authenticator();
        let token = auth.issue_token(&account(Role::Specialist)).unwrap();

        assert!(matches!(auth.authorize_admin(&token), Err(AppError::Forbidden)));
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let other = Authenticator::new(Config::new(
            "sqlite::memory:",
            "another-secret-that-is-long-enough-32",
        ));
        let token = other.issue_token(&account(Role::Admin)).unwrap();

        assert!(matches!(authenticator().verify_token(&token), Err(AppError::Jwt(_))));
    }
}
