/// User service: CRUD plus registration and login
///
/// Login identities are classified as email or username by shape — an
/// identity that looks like `local@domain.tld` is looked up by email,
/// anything else by username. Both failure modes (unknown identity, wrong
/// password) collapse into the same unauthorized error so the endpoint
/// does not leak which accounts exist.
use crate::auth::jwt::TokenIssuer;
use crate::auth::password;
use crate::error::{CoreError, CoreResult};
use crate::models::user::{CreateUser, User, UserPublic};
use crate::query::Filter;
use crate::repository::user_repository;
use crate::services::base::CrudService;
use crate::storage::Database;
use serde::{Deserialize, Serialize};

/// Registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub username: Option<String>,
    pub full_name: String,
}

/// Login payload; `identity` is an email or a username
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub identity: String,
    pub password: String,
}

/// Successful login: the public projection plus a signed token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSession {
    pub user: UserPublic,
    pub token: String,
}

/// Domain service for user accounts
pub struct UserService {
    crud: CrudService<User, UserPublic>,
    issuer: TokenIssuer,
}

impl UserService {
    /// Creates the service over the shared database
    pub fn new(db: &Database, issuer: TokenIssuer) -> Self {
        Self {
            crud: CrudService::new(user_repository(db)),
            issuer,
        }
    }

    /// Generic CRUD operations bound to the public projection
    pub fn crud(&self) -> &CrudService<User, UserPublic> {
        &self.crud
    }

    /// Registers a new account
    ///
    /// # Errors
    ///
    /// Returns `Conflict` when the email or username is already taken
    pub async fn auth_register(&self, payload: RegisterUser) -> CoreResult<UserPublic> {
        let email_taken = self
            .crud
            .get_one_by_filters_model(&[Filter::new("email", payload.email.clone())])
            .await?
            .is_some();
        if email_taken {
            return Err(CoreError::conflict(format!(
                "email '{}' is already registered",
                payload.email
            )));
        }

        if let Some(username) = &payload.username {
            let username_taken = self
                .crud
                .get_one_by_filters_model(&[Filter::new("username", username.clone())])
                .await?
                .is_some();
            if username_taken {
                return Err(CoreError::conflict(format!(
                    "username '{}' is already taken",
                    username
                )));
            }
        }

        let password_hash = password::hash_password(&payload.password)?;

        self.crud
            .create(User::new(CreateUser {
                email: payload.email,
                username: payload.username,
                password_hash,
                full_name: payload.full_name,
            }))
            .await
    }

    /// Authenticates an identity/password pair and issues a token
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` on an unknown identity or a failed password
    /// check
    pub async fn auth_login(&self, payload: LoginUser) -> CoreResult<LoginSession> {
        let field = if looks_like_email(&payload.identity) {
            "email"
        } else {
            "username"
        };

        let user = self
            .crud
            .get_one_by_filters_model(&[Filter::new(field, payload.identity.clone())])
            .await?
            .ok_or_else(|| CoreError::unauthorized("invalid credentials"))?;

        if !password::verify_password(&payload.password, &user.password_hash)? {
            return Err(CoreError::unauthorized("invalid credentials"));
        }

        let user = UserPublic::from(user);
        let token = self.issuer.issue(&user)?;

        Ok(LoginSession { user, token })
    }
}

/// Email-shape heuristic: exactly one `@` with a non-empty local part and
/// a dotted domain (`local@domain.tld`)
fn looks_like_email(identity: &str) -> bool {
    let Some((local, domain)) = identity.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(looks_like_email("a@x.com"));
        assert!(looks_like_email("first.last@sub.domain.org"));

        assert!(!looks_like_email("jdoe"));
        assert!(!looks_like_email("a@x"));
        assert!(!looks_like_email("@x.com"));
        assert!(!looks_like_email("a@.com"));
        assert!(!looks_like_email("a@x."));
        assert!(!looks_like_email("a@b@x.com"));
    }
}
