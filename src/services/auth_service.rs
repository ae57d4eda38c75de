use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::config;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::user::{NewUser, User, UserRole};
use crate::database::store::UserStore;
use crate::database::users::PgUserStore;
use crate::error::ApiError;

/// External signup payload, camel-case wire naming. The product key is only
/// consulted for privileged roles.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub product_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Account shape exposed over the wire; never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
        }
    }
}

/// A freshly issued session: bearer token plus the account's public view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub user: UserView,
}

/// Account business rules, independent of the concrete store.
pub struct AuthService<S: UserStore> {
    store: Arc<S>,
}

impl AuthService<PgUserStore> {
    pub async fn from_env() -> Result<Self, ApiError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self::new(Arc::new(PgUserStore::new(pool))))
    }
}

impl<S: UserStore> AuthService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create an account. Email uniqueness rides on the store's unique
    /// constraint: one insert, and a violation maps to Conflict.
    pub async fn sign_up(
        &self,
        request: SignUpRequest,
        role: UserRole,
    ) -> Result<SessionResponse, ApiError> {
        let cost = config::config().security.bcrypt_cost;
        let password_hash = bcrypt::hash(&request.password, cost).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::internal_server_error("Failed to process password")
        })?;

        let new_user = NewUser {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password_hash,
            role,
        };

        let user = match self.store.insert(new_user).await {
            Ok(user) => user,
            Err(DatabaseError::UniqueViolation(_)) => {
                return Err(ApiError::conflict("An account with this email already exists"));
            }
            Err(other) => return Err(other.into()),
        };

        tracing::info!(user_id = %user.id, role = %user.role, "user signed up");
        self.session_for(user)
    }

    /// Verify credentials and issue a session. Unknown email and wrong
    /// password are indistinguishable to the caller.
    pub async fn sign_in(&self, request: SignInRequest) -> Result<SessionResponse, ApiError> {
        let user = self
            .store
            .find_by_email(&request.email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let matches = bcrypt::verify(&request.password, &user.password_hash).unwrap_or(false);
        if !matches {
            return Err(invalid_credentials());
        }

        tracing::info!(user_id = %user.id, "user signed in");
        self.session_for(user)
    }

    fn session_for(&self, user: User) -> Result<SessionResponse, ApiError> {
        let claims = Claims::for_user(&user);
        let token = auth::generate_jwt(&claims)?;
        Ok(SessionResponse {
            token,
            user: UserView::from(user),
        })
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid email or password")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// In-memory double enforcing the email unique constraint.
    #[derive(Default)]
    struct MockUserStore {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserStore for MockUserStore {
        async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email) {
                return Err(DatabaseError::UniqueViolation("email".to_string()));
            }
            let row = User {
                id: Uuid::new_v4(),
                name: user.name,
                email: user.email,
                phone: user.phone,
                password_hash: user.password_hash,
                role: user.role,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            users.push(row.clone());
            Ok(row)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
        }
    }

    fn signup_request(email: &str) -> SignUpRequest {
        SignUpRequest {
            name: "Jane".to_string(),
            phone: "(41) 99999-9999".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            product_key: None,
        }
    }

    #[tokio::test]
    async fn sign_up_creates_account_and_issues_token() {
        crate::testing::init_test_env();
        let store = Arc::new(MockUserStore::default());
        let service = AuthService::new(store.clone());

        let session = service
            .sign_up(signup_request("jane@example.com"), UserRole::Buyer)
            .await
            .unwrap();

        assert!(!session.token.is_empty());
        assert_eq!(session.user.email, "jane@example.com");
        assert_eq!(session.user.role, UserRole::Buyer);
        assert_eq!(store.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sign_up_stores_a_verifiable_hash_not_the_password() {
        crate::testing::init_test_env();
        let store = Arc::new(MockUserStore::default());
        let service = AuthService::new(store.clone());

        service
            .sign_up(signup_request("jane@example.com"), UserRole::Buyer)
            .await
            .unwrap();

        let users = store.users.lock().unwrap();
        assert_ne!(users[0].password_hash, "secret123");
        assert!(bcrypt::verify("secret123", &users[0].password_hash).unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        crate::testing::init_test_env();
        let store = Arc::new(MockUserStore::default());
        let service = AuthService::new(store.clone());

        service
            .sign_up(signup_request("jane@example.com"), UserRole::Buyer)
            .await
            .unwrap();
        let err = service
            .sign_up(signup_request("jane@example.com"), UserRole::Buyer)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(store.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sign_in_with_correct_password_succeeds() {
        crate::testing::init_test_env();
        let store = Arc::new(MockUserStore::default());
        let service = AuthService::new(store);

        service
            .sign_up(signup_request("jane@example.com"), UserRole::Realtor)
            .await
            .unwrap();
        let session = service
            .sign_in(SignInRequest {
                email: "jane@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.user.role, UserRole::Realtor);
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn sign_in_with_wrong_password_is_unauthorized() {
        crate::testing::init_test_env();
        let store = Arc::new(MockUserStore::default());
        let service = AuthService::new(store);

        service
            .sign_up(signup_request("jane@example.com"), UserRole::Buyer)
            .await
            .unwrap();
        let err = service
            .sign_in(SignInRequest {
                email: "jane@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn sign_in_with_unknown_email_is_unauthorized() {
        crate::testing::init_test_env();
        let service = AuthService::new(Arc::new(MockUserStore::default()));

        let err = service
            .sign_in(SignInRequest {
                email: "ghost@example.com".to_string(),
                password: "whatever".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn user_view_never_exposes_the_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: "(41) 99999-9999".to_string(),
            password_hash: "$2b$04$abcdefgh".to_string(),
            role: UserRole::Buyer,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(UserView::from(user)).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["role"], "BUYER");
    }
}
