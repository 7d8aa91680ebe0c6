use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A feed post as the UI consumes it, reconstructed from the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedPost {
    pub post_id: String,
    pub title: String,
    pub content: String,
    pub hashtags: Vec<String>,
    pub create_time: DateTime<Utc>,
    pub author: Author,
    pub clips: Vec<Clip>,
    pub music: Option<Music>,
    pub like_count: u32,
    pub is_liked: bool,
}

impl CachedPost {
    pub fn new(
        post_id: String,
        title: String,
        content: String,
        author: Author,
        create_time: DateTime<Utc>,
    ) -> Self {
        Self {
            post_id,
            title,
            content,
            hashtags: Vec::new(),
            create_time,
            author,
            clips: Vec::new(),
            music: None,
            like_count: 0,
            is_liked: false,
        }
    }

    pub fn with_hashtags(mut self, hashtags: Vec<String>) -> Self {
        self.hashtags = hashtags;
        self
    }

    pub fn with_clips(mut self, clips: Vec<Clip>) -> Self {
        self.clips = clips;
        self
    }

    pub fn with_music(mut self, music: Music) -> Self {
        self.music = Some(music);
        self
    }

    pub fn with_likes(mut self, like_count: u32, is_liked: bool) -> Self {
        self.like_count = like_count;
        self.is_liked = is_liked;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub user_id: String,
    pub display_name: String,
    pub avatar_url: String,
}

/// An image or video segment of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    #[serde(rename = "type")]
    pub clip_type: ClipType,
    pub width: u32,
    pub height: u32,
    pub url: String,
}

impl Clip {
    /// Aspect ratio for display, clamped to the 3:4 .. 4:3 band the feed
    /// layout supports.
    pub fn display_aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        (self.width as f32 / self.height as f32).clamp(0.75, 1.33)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipType {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Music {
    pub title: String,
    pub artist: String,
    pub url: String,
}
