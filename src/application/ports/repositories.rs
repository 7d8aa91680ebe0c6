use crate::domain::entities::CachedPost;
use crate::shared::error::CacheError;
use async_trait::async_trait;

#[async_trait]
pub trait Repository: Send + Sync {
    async fn initialize(&self) -> Result<(), CacheError>;
    async fn health_check(&self) -> Result<bool, CacheError>;
}

/// Durable storage of cached feed posts.
///
/// Every write runs inside a single transaction: a concurrent reader
/// observes either the pre-write or the post-write state of the whole
/// table, never an interleaved one.
#[async_trait]
pub trait PostCacheRepository: Send + Sync {
    /// Inserts each post, replacing any existing row with the same
    /// `post_id` in full. If the input itself contains duplicate ids the
    /// later occurrence wins.
    async fn upsert_many(&self, posts: &[CachedPost]) -> Result<(), CacheError>;

    /// Atomically clears the table and inserts `posts` as its new
    /// complete contents. Readers never observe the intermediate empty
    /// window; a mid-write storage failure leaves the prior contents
    /// untouched.
    async fn replace_all(&self, posts: &[CachedPost]) -> Result<(), CacheError>;

    /// Every cached post, ordered by `post_id` descending. Fails as a
    /// whole if any row fails to decode.
    async fn get_all(&self) -> Result<Vec<CachedPost>, CacheError>;

    /// Absence is a normal result, not an error.
    async fn find_by_id(&self, id: &str) -> Result<Option<CachedPost>, CacheError>;

    /// Up to `count` posts, most recent `create_time` first.
    async fn get_latest(&self, count: usize) -> Result<Vec<CachedPost>, CacheError>;

    /// Removes every row. Idempotent.
    async fn delete_all(&self) -> Result<(), CacheError>;
}
