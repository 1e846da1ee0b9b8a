use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    pub username: String,
    pub isbn: String,
    pub title: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub isbn: String,
    pub title: String,
    pub comment: String,
}

/// Persistence for users, books and their reviews.
#[async_trait]
pub trait ReviewStore {
    /// Fails with [`StoreError::Conflict`] when the username is taken.
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    /// Stores a review, creating the book row for its ISBN on first use.
    async fn add_review(&self, author: &User, review: &NewReview) -> Result<Review, StoreError>;
    async fn count_reviews(&self, isbn: &str) -> Result<usize, StoreError>;
    /// Reviews for `isbn`, oldest first.
    async fn list_reviews(
        &self,
        isbn: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Review>, StoreError>;
    async fn test_connection(&self) -> Result<(), StoreError>;
}

pub type Store = Arc<dyn ReviewStore + Send + Sync>;

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                username VARCHAR(150) NOT NULL UNIQUE,
                email TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                date_joined TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id BIGSERIAL PRIMARY KEY,
                isbn VARCHAR(13) NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                id BIGSERIAL PRIMARY KEY,
                book_id BIGINT NOT NULL REFERENCES books(id) ON DELETE CASCADE,
                user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title VARCHAR(100) NOT NULL,
                comment TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_reviews_book_id ON reviews(book_id)
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    fn user_from_row(row: &sqlx::postgres::PgRow) -> User {
        User {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
        }
    }
}

#[async_trait]
impl ReviewStore for PostgresStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            RETURNING id, username, email, password_hash
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::user_from_row(&row))
            .ok_or_else(|| StoreError::Conflict(format!("username {} is taken", user.username)))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Self::user_from_row(&row)))
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query("SELECT id, username, email, password_hash FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Self::user_from_row(&row)))
    }

    async fn add_review(&self, author: &User, review: &NewReview) -> Result<Review, StoreError> {
        let mut tx = self.pool.begin().await?;

        let book_id: i64 = sqlx::query(
            r#"
            INSERT INTO books (isbn) VALUES ($1)
            ON CONFLICT (isbn) DO UPDATE SET isbn = EXCLUDED.isbn
            RETURNING id
            "#,
        )
        .bind(&review.isbn)
        .fetch_one(&mut *tx)
        .await?
        .get("id");

        let row = sqlx::query(
            r#"
            INSERT INTO reviews (book_id, user_id, title, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            "#,
        )
        .bind(book_id)
        .bind(author.id)
        .bind(&review.title)
        .bind(&review.comment)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Review {
            id: row.get("id"),
            username: author.username.clone(),
            isbn: review.isbn.clone(),
            title: review.title.clone(),
            comment: review.comment.clone(),
            created_at: row.get("created_at"),
        })
    }

    async fn count_reviews(&self, isbn: &str) -> Result<usize, StoreError> {
        let count = sqlx::query(
            r#"
            SELECT COUNT(*) AS count FROM reviews r
            JOIN books b ON b.id = r.book_id
            WHERE b.isbn = $1
            "#,
        )
        .bind(isbn)
        .fetch_one(&self.pool)
        .await?
        .get::<i64, _>("count");

        Ok(count as usize)
    }

    async fn list_reviews(
        &self,
        isbn: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Review>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, u.username, b.isbn, r.title, r.comment, r.created_at
            FROM reviews r
            JOIN books b ON b.id = r.book_id
            JOIN users u ON u.id = r.user_id
            WHERE b.isbn = $1
            ORDER BY r.created_at, r.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(isbn)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;

        let reviews = rows
            .into_iter()
            .map(|row| Review {
                id: row.get("id"),
                username: row.get("username"),
                isbn: row.get("isbn"),
                title: row.get("title"),
                comment: row.get("comment"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(reviews)
    }

    async fn test_connection(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
