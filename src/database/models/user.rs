use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for `users`; the password is already hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
pub enum UserRole {
    Buyer,
    Realtor,
    Admin,
}

/// What a role must present to register an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupPolicy {
    /// Anyone may register.
    Open,
    /// A signed product key for the (email, role) pair is required.
    RequiresProductKey,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Buyer => "BUYER",
            UserRole::Realtor => "REALTOR",
            UserRole::Admin => "ADMIN",
        }
    }

    /// Per-variant signup authorization policy.
    pub fn signup_policy(&self) -> SignupPolicy {
        match self {
            UserRole::Buyer => SignupPolicy::Open,
            UserRole::Realtor => SignupPolicy::RequiresProductKey,
            UserRole::Admin => SignupPolicy::RequiresProductKey,
        }
    }

    /// Roles allowed to create and manage listings.
    pub fn may_list_properties(&self) -> bool {
        matches!(self, UserRole::Realtor | UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUYER" => Ok(UserRole::Buyer),
            "REALTOR" => Ok(UserRole::Realtor),
            "ADMIN" => Ok(UserRole::Admin),
            other => Err(format!("unknown user role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buyer_signup_is_open() {
        assert_eq!(UserRole::Buyer.signup_policy(), SignupPolicy::Open);
    }

    #[test]
    fn privileged_roles_require_product_key() {
        assert_eq!(UserRole::Realtor.signup_policy(), SignupPolicy::RequiresProductKey);
        assert_eq!(UserRole::Admin.signup_policy(), SignupPolicy::RequiresProductKey);
    }

    #[test]
    fn only_realtors_and_admins_list_properties() {
        assert!(!UserRole::Buyer.may_list_properties());
        assert!(UserRole::Realtor.may_list_properties());
        assert!(UserRole::Admin.may_list_properties());
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [UserRole::Buyer, UserRole::Realtor, UserRole::Admin] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("LANDLORD".parse::<UserRole>().is_err());
    }
}
