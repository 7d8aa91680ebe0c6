pub mod post;

pub use post::{Author, CachedPost, Clip, ClipType, Music};
