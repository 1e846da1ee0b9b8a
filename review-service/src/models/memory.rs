use crate::models::storage::{NewReview, NewUser, Review, ReviewStore, StoreError, User};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    reviews: Vec<Review>,
}

/// Process-local store used when no database is configured.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!(
                "username {} is taken",
                user.username
            )));
        }

        let created = User {
            id: tables.users.len() as i64 + 1,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
        };
        tables.users.push(created.clone());

        Ok(created)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn add_review(&self, author: &User, review: &NewReview) -> Result<Review, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.users.iter().any(|u| u.id == author.id) {
            return Err(StoreError::NotFound(format!("user {}", author.id)));
        }

        let created = Review {
            id: tables.reviews.len() as i64 + 1,
            username: author.username.clone(),
            isbn: review.isbn.clone(),
            title: review.title.clone(),
            comment: review.comment.clone(),
            created_at: Utc::now(),
        };
        tables.reviews.push(created.clone());

        Ok(created)
    }

    async fn count_reviews(&self, isbn: &str) -> Result<usize, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.iter().filter(|r| r.isbn == isbn).count())
    }

    async fn list_reviews(
        &self,
        isbn: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Review>, StoreError> {
        let tables = self.tables.read().await;

        // insertion order is creation order
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.isbn == isbn)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn test_connection(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$ZGlnZXN0".to_string(),
        }
    }

    fn new_review(isbn: &str, title: &str) -> NewReview {
        NewReview {
            isbn: isbn.to_string(),
            title: title.to_string(),
            comment: "I really enjoyed reading this book.".to_string(),
        }
    }

    #[tokio::test]
    async fn usernames_are_unique() {
        let store = MemoryStore::new();

        let first = store.create_user(&new_user("reader")).await.unwrap();
        let second = store.create_user(&new_user("reader")).await;

        assert_eq!(first.id, 1);
        assert!(matches!(second, Err(StoreError::Conflict(_))));
        assert_eq!(
            store.find_user_by_username("reader").await.unwrap(),
            Some(first.clone())
        );
        assert_eq!(store.find_user_by_id(1).await.unwrap(), Some(first));
        assert_eq!(store.find_user_by_id(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn reviews_are_listed_per_isbn_in_creation_order() {
        let store = MemoryStore::new();
        let user = store.create_user(&new_user("reader")).await.unwrap();

        for i in 1..=3 {
            store
                .add_review(&user, &new_review("9780441013593", &format!("Review {}", i)))
                .await
                .unwrap();
        }
        store
            .add_review(&user, &new_review("9780140449136", "Other book"))
            .await
            .unwrap();

        assert_eq!(store.count_reviews("9780441013593").await.unwrap(), 3);
        assert_eq!(store.count_reviews("0000000000").await.unwrap(), 0);

        let page: Vec<String> = store
            .list_reviews("9780441013593", 1, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(page, vec!["Review 2", "Review 3"]);
    }

    #[tokio::test]
    async fn reviews_need_an_existing_author() {
        let store = MemoryStore::new();
        let ghost = User {
            id: 42,
            username: "ghost".to_string(),
            email: "ghost@example.com".to_string(),
            password_hash: String::new(),
        };

        let result = store
            .add_review(&ghost, &new_review("9780441013593", "Boo"))
            .await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
