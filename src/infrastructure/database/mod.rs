pub mod connection_pool;
pub mod post_codec;
pub mod sqlite_repository;

pub use connection_pool::ConnectionPool;
pub use sqlite_repository::SqliteRepository;
