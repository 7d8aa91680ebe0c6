pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::ports::repositories::{PostCacheRepository, Repository};
pub use application::services::FeedCacheService;
pub use domain::entities::{Author, CachedPost, Clip, ClipType, Music};
pub use infrastructure::database::post_codec::{PostRecord, decode_post, encode_post};
pub use infrastructure::database::{ConnectionPool, SqliteRepository};
pub use shared::config::{AppConfig, DatabaseConfig};
pub use shared::error::{CacheError, CodecError};

pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "croissant_cache=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
