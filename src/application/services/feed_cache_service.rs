use crate::application::ports::repositories::PostCacheRepository;
use crate::domain::entities::CachedPost;
use crate::shared::error::CacheError;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read/write policy layer between the cache store and its callers.
///
/// The network refresh path calls [`FeedCacheService::refresh`] after a
/// successful fetch; on fetch failure it must not call anything, so the
/// stale cache stays authoritative. On the read paths a decode failure is
/// treated as a cache miss rather than a fatal error: the caller falls
/// back to the network and the raw row stays in storage.
pub struct FeedCacheService {
    repository: Arc<dyn PostCacheRepository>,
}

impl FeedCacheService {
    pub fn new(repository: Arc<dyn PostCacheRepository>) -> Self {
        Self { repository }
    }

    /// Replaces the cached feed with a freshly fetched batch.
    pub async fn refresh(&self, posts: &[CachedPost]) -> Result<(), CacheError> {
        self.repository.replace_all(posts).await?;
        info!(count = posts.len(), "feed cache refreshed");
        Ok(())
    }

    /// Cached posts for the feed screen's initial render, newest id first.
    pub async fn cached_feed(&self) -> Result<Option<Vec<CachedPost>>, CacheError> {
        match self.repository.get_all().await {
            Ok(posts) => Ok(Some(posts)),
            Err(CacheError::Codec(err)) => {
                warn!(error = %err, "cached feed failed to decode, treating as cache miss");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// A single cached post for the detail screen.
    pub async fn post_detail(&self, post_id: &str) -> Result<Option<CachedPost>, CacheError> {
        match self.repository.find_by_id(post_id).await {
            Ok(post) => Ok(post),
            Err(CacheError::Codec(err)) => {
                warn!(post_id, error = %err, "cached post failed to decode, treating as cache miss");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// The most recent posts for preview widgets.
    pub async fn latest(&self, count: usize) -> Result<Option<Vec<CachedPost>>, CacheError> {
        match self.repository.get_latest(count).await {
            Ok(posts) => Ok(Some(posts)),
            Err(CacheError::Codec(err)) => {
                warn!(count, error = %err, "latest posts failed to decode, treating as cache miss");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn clear(&self) -> Result<(), CacheError> {
        self.repository.delete_all().await?;
        debug!("feed cache cleared");
        Ok(())
    }
}
