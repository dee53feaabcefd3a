//! Diesel-backed credential store (the durable variant).
//!
//! Uniqueness is delegated to the UNIQUE constraints on `users.email` and
//! `users.username`; constraint violations are translated back into the
//! port's duplicate errors. Queries run on the blocking thread pool because
//! Diesel's SQLite backend is synchronous.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{EmailAddress, NewUser, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Durable credential store over a pooled SQLite database.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over an initialised pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        // SQLite reports "UNIQUE constraint failed: users.email".
        let message = info.message();
        if message.contains("users.email") {
            return UserPersistenceError::duplicate_email();
        }
        if message.contains("users.username") {
            return UserPersistenceError::duplicate_username();
        }
    }
    UserPersistenceError::query(error.to_string())
}

async fn run_query<T, F>(pool: &DbPool, query: F) -> Result<T, UserPersistenceError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> Result<T, UserPersistenceError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool
            .get()
            .map_err(|err| UserPersistenceError::connection(err.to_string()))?;
        query(&mut conn)
    })
    .await
    .map_err(|err| UserPersistenceError::query(format!("blocking task failed: {err}")))?
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, UserPersistenceError> {
        run_query(&self.pool, move |conn| {
            let row = NewUserRow {
                username: new_user.username.as_ref(),
                email: new_user.email.as_ref(),
                password_hash: new_user.password_hash.as_phc_string(),
                created_at: Utc::now().naive_utc(),
            };

            let inserted: UserRow = diesel::insert_into(users::table)
                .values(&row)
                .returning(UserRow::as_returning())
                .get_result(conn)
                .map_err(map_diesel_error)?;

            User::try_from(inserted)
        })
        .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let email = email.clone();
        run_query(&self.pool, move |conn| {
            let row: Option<UserRow> = users::table
                .filter(users::email.eq(email.as_ref()))
                .select(UserRow::as_select())
                .first(conn)
                .optional()
                .map_err(map_diesel_error)?;

            row.map(User::try_from).transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        run_query(&self.pool, move |conn| {
            let row: Option<UserRow> = users::table
                .find(id.as_i64())
                .select(UserRow::as_select())
                .first(conn)
                .optional()
                .map_err(map_diesel_error)?;

            row.map(User::try_from).transpose()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the durable credential store.
    use super::*;
    use crate::domain::user::{PasswordHash, Username};
    use rstest::rstest;

    fn test_pool() -> (DbPool, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("temp dir");
        let db_path = dir.path().join("users.db");
        let pool = DbPool::connect(db_path.to_str().expect("utf-8 path")).expect("pool builds");
        (pool, dir)
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: Username::new(username).expect("valid username"),
            email: EmailAddress::new(email).expect("valid email"),
            password_hash: PasswordHash::from_phc_string("$argon2id$stub"),
        }
    }

    #[tokio::test]
    async fn create_then_find_round_trip() {
        let (pool, _dir) = test_pool();
        let repository = DieselUserRepository::new(pool);

        let created = repository
            .create(new_user("alice", "alice@x.com"))
            .await
            .expect("insert succeeds");
        assert!(created.id().as_i64() > 0);

        let email = EmailAddress::new("alice@x.com").expect("valid email");
        let by_email = repository
            .find_by_email(&email)
            .await
            .expect("lookup succeeds")
            .expect("user present");
        assert_eq!(by_email.id(), created.id());
        assert_eq!(by_email.password_hash().as_phc_string(), "$argon2id$stub");

        let by_id = repository
            .find_by_id(created.id())
            .await
            .expect("lookup succeeds")
            .expect("user present");
        assert_eq!(by_id.username().as_ref(), "alice");
    }

    #[rstest]
    #[case("other", "alice@x.com", UserPersistenceError::DuplicateEmail)]
    #[case("alice", "other@x.com", UserPersistenceError::DuplicateUsername)]
    #[tokio::test]
    async fn unique_violations_map_to_duplicate_errors(
        #[case] username: &str,
        #[case] email: &str,
        #[case] expected: UserPersistenceError,
    ) {
        let (pool, _dir) = test_pool();
        let repository = DieselUserRepository::new(pool);
        repository
            .create(new_user("alice", "alice@x.com"))
            .await
            .expect("first insert succeeds");

        let err = repository
            .create(new_user(username, email))
            .await
            .expect_err("duplicate must fail");
        assert_eq!(err, expected);
    }

    #[tokio::test]
    async fn missing_user_is_none() {
        let (pool, _dir) = test_pool();
        let repository = DieselUserRepository::new(pool);

        let email = EmailAddress::new("ghost@x.com").expect("valid email");
        assert!(repository
            .find_by_email(&email)
            .await
            .expect("lookup succeeds")
            .is_none());
        assert!(repository
            .find_by_id(UserId::new(42))
            .await
            .expect("lookup succeeds")
            .is_none());
    }
}
