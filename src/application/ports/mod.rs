pub mod repositories;

pub use repositories::{PostCacheRepository, Repository};
