pub mod feed_cache_service;

pub use feed_cache_service::FeedCacheService;
