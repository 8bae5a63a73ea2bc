//! In-memory media repository for testing
//!
//! Behaves like the Postgres repository, including the unique `post_id`
//! constraint, without a database. Inserts can be made to fail on demand to
//! exercise the persistence-failure path.

use async_trait::async_trait;
use postmedia_core::{AppError, Media, MediaId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::repository::MetadataRepository;

#[derive(Default)]
struct Inner {
    rows: Vec<Media>,
    next_id: i64,
}

#[derive(Clone, Default)]
pub struct InMemoryMediaRepository {
    inner: Arc<Mutex<Inner>>,
    fail_inserts: Arc<AtomicBool>,
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `insert` fail with `PersistenceFailed`.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all stored rows.
    pub fn rows(&self) -> Vec<Media> {
        self.inner.lock().unwrap().rows.clone()
    }

    pub fn count_for_post(&self, post_id: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|m| m.post_id == post_id)
            .count()
    }
}

#[async_trait]
impl MetadataRepository for InMemoryMediaRepository {
    async fn find_by_post(&self, post_id: &str) -> Result<Option<Media>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|m| m.post_id == post_id)
            .cloned())
    }

    async fn insert(&self, post_id: &str, image_url: &str) -> Result<Media, AppError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::PersistenceFailed(
                "insert rejected by test repository".to_string(),
            ));
        }

        let mut inner = self.inner.lock().unwrap();
        if inner.rows.iter().any(|m| m.post_id == post_id) {
            return Err(AppError::AlreadyExists {
                post_id: post_id.to_string(),
            });
        }

        inner.next_id += 1;
        let media = Media {
            id: MediaId(inner.next_id),
            post_id: post_id.to_string(),
            image_url: image_url.to_string(),
        };
        inner.rows.push(media.clone());
        Ok(media)
    }

    async fn find_by_id(&self, id: MediaId) -> Result<Option<Media>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
