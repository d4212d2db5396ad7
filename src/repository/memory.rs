use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{Repository, StoreError};
use crate::models::{Course, CourseSummary, Review, User};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    courses: Vec<Course>,
    reviews: Vec<Review>,
}

/// In-process store. Intended for tests and local development.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RwLock<Collections>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|u| u.email_address == email)
            .cloned())
    }

    async fn find_users(&self, ids: &[ObjectId]) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .filter(|u| u.id.is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn insert_user(&self, mut user: User) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner
            .users
            .iter()
            .any(|u| u.email_address == user.email_address)
        {
            return Err(StoreError::Duplicate {
                field: "emailAddress",
                value: user.email_address,
            });
        }

        user.id.get_or_insert_with(ObjectId::new);
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn list_courses(&self) -> Result<Vec<CourseSummary>, StoreError> {
        let inner = self.inner.read().await;
        let mut courses: Vec<CourseSummary> = inner
            .courses
            .iter()
            .filter_map(|c| {
                Some(CourseSummary {
                    id: c.id?,
                    title: c.title.clone(),
                })
            })
            .collect();
        courses.sort_by_key(|c| c.id);
        Ok(courses)
    }

    async fn find_course(&self, id: ObjectId) -> Result<Option<Course>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.courses.iter().find(|c| c.id == Some(id)).cloned())
    }

    async fn insert_course(&self, mut course: Course) -> Result<Course, StoreError> {
        let mut inner = self.inner.write().await;
        course.id.get_or_insert_with(ObjectId::new);
        inner.courses.push(course.clone());
        Ok(course)
    }

    async fn replace_course(&self, id: ObjectId, course: &Course) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.courses.iter_mut().find(|c| c.id == Some(id)) {
            Some(existing) => {
                *existing = Course {
                    id: Some(id),
                    ..course.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_reviews(&self, ids: &[ObjectId]) -> Result<Vec<Review>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .iter()
            .filter(|r| r.id.is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn insert_review(&self, mut review: Review) -> Result<Review, StoreError> {
        let mut inner = self.inner.write().await;
        review.id.get_or_insert_with(ObjectId::new);
        inner.reviews.push(review.clone());
        Ok(review)
    }

    async fn add_review(
        &self,
        course_id: ObjectId,
        mut review: Review,
    ) -> Result<Option<Review>, StoreError> {
        let mut inner = self.inner.write().await;
        let review_id = *review.id.get_or_insert_with(ObjectId::new);

        let Some(course) = inner.courses.iter_mut().find(|c| c.id == Some(course_id)) else {
            return Ok(None);
        };
        course.reviews.push(review_id);
        inner.reviews.push(review.clone());

        Ok(Some(review))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        *inner = Collections::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(email: &str) -> User {
        User {
            id: None,
            full_name: "Test User".into(),
            email_address: email.into(),
            password: "hash".into(),
        }
    }

    fn course(owner: ObjectId, title: &str) -> Course {
        Course {
            id: None,
            user: owner,
            title: title.into(),
            description: "description".into(),
            estimated_time: None,
            materials_needed: None,
            steps: Vec::new(),
            reviews: Vec::new(),
        }
    }

    fn review(author: ObjectId) -> Review {
        Review {
            id: None,
            user: author,
            posted_on: Utc::now(),
            rating: 4,
            review: None,
        }
    }

    #[tokio::test]
    async fn test_insert_user_assigns_id_and_rejects_duplicate_email() {
        let repo = MemoryRepository::new();
        let stored = repo.insert_user(user("a@b.com")).await.unwrap();
        assert!(stored.id.is_some());

        let err = repo.insert_user(user("a@b.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { field: "emailAddress", .. }));

        let found = repo.find_user_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found.id, stored.id);
    }

    #[tokio::test]
    async fn test_list_courses_is_ordered_by_id() {
        let repo = MemoryRepository::new();
        let owner = ObjectId::new();
        for (id, title) in [
            ("57029ed4795118be119cc441", "third"),
            ("57029ed4795118be119cc43d", "first"),
            ("57029ed4795118be119cc440", "second"),
        ] {
            let mut c = course(owner, title);
            c.id = Some(ObjectId::parse_str(id).unwrap());
            repo.insert_course(c).await.unwrap();
        }

        let titles: Vec<_> = repo
            .list_courses()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_replace_course_keeps_id() {
        let repo = MemoryRepository::new();
        let owner = ObjectId::new();
        let stored = repo.insert_course(course(owner, "before")).await.unwrap();
        let id = stored.id.unwrap();

        let replaced = repo
            .replace_course(id, &course(owner, "after"))
            .await
            .unwrap();
        assert!(replaced);
        let found = repo.find_course(id).await.unwrap().unwrap();
        assert_eq!(found.title, "after");
        assert_eq!(found.id, Some(id));

        assert!(!repo
            .replace_course(ObjectId::new(), &course(owner, "x"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_add_review_links_course() {
        let repo = MemoryRepository::new();
        let owner = ObjectId::new();
        let stored = repo.insert_course(course(owner, "c")).await.unwrap();
        let course_id = stored.id.unwrap();

        let added = repo
            .add_review(course_id, review(owner))
            .await
            .unwrap()
            .unwrap();
        let review_id = added.id.unwrap();

        let course = repo.find_course(course_id).await.unwrap().unwrap();
        assert_eq!(course.reviews, vec![review_id]);
        assert_eq!(repo.find_reviews(&[review_id]).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_review_to_missing_course_stores_nothing() {
        let repo = MemoryRepository::new();
        let result = repo
            .add_review(ObjectId::new(), review(ObjectId::new()))
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(repo.inner.read().await.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_clear_drops_everything() {
        let repo = MemoryRepository::new();
        repo.insert_user(user("a@b.com")).await.unwrap();
        repo.insert_course(course(ObjectId::new(), "c")).await.unwrap();
        repo.clear().await.unwrap();

        assert!(repo.find_user_by_email("a@b.com").await.unwrap().is_none());
        assert!(repo.list_courses().await.unwrap().is_empty());
    }
}
