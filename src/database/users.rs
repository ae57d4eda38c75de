use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::user::{NewUser, User};
use crate::database::store::UserStore;

const USER_COLUMNS: &str = "\"id\", \"name\", \"email\", \"phone\", \"password_hash\", \"role\", \
     \"created_at\", \"updated_at\"";

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let query = format!(
            "INSERT INTO \"users\" (\"name\", \"email\", \"phone\", \"password_hash\", \"role\") \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(user.name)
            .bind(user.email)
            .bind(user.phone)
            .bind(user.password_hash)
            .bind(user.role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "email"))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {} FROM \"users\" WHERE \"email\" = $1", USER_COLUMNS);

        Ok(sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }
}

/// Postgres unique_violation (23505) becomes a typed error; everything else
/// passes through untouched.
fn map_unique_violation(err: sqlx::Error, what: &str) -> DatabaseError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return DatabaseError::UniqueViolation(what.to_string());
        }
    }
    DatabaseError::Sqlx(err)
}
