//! Conversion between a [`CachedPost`]'s nested form and the flat row the
//! store persists. Each nested field becomes its own self-contained JSON
//! blob, so corruption of one blob is attributable to that field alone.

use crate::domain::entities::{Author, CachedPost, Clip, Music};
use crate::shared::error::CodecError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A cached post in its flat, storable form. Column-for-column the shape
/// of the `cached_posts` table.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub post_id: String,
    pub title: String,
    pub content: String,
    pub hashtags_json: String,
    /// Milliseconds since epoch.
    pub create_time: i64,
    pub author_json: String,
    pub clips_json: String,
    /// `None` maps to SQL NULL: an absent music field, distinct from an
    /// encoded empty object.
    pub music_json: Option<String>,
    pub like_count: i64,
    pub is_liked: bool,
}

pub fn encode_post(post: &CachedPost) -> Result<PostRecord, CodecError> {
    Ok(PostRecord {
        post_id: post.post_id.clone(),
        title: post.title.clone(),
        content: post.content.clone(),
        hashtags_json: encode_field("hashtags", &post.post_id, &post.hashtags)?,
        create_time: post.create_time.timestamp_millis(),
        author_json: encode_field("author", &post.post_id, &post.author)?,
        clips_json: encode_field("clips", &post.post_id, &post.clips)?,
        music_json: post
            .music
            .as_ref()
            .map(|music| encode_field("music", &post.post_id, music))
            .transpose()?,
        like_count: i64::from(post.like_count),
        is_liked: post.is_liked,
    })
}

/// Inverse of [`encode_post`]. A malformed blob fails the whole row; no
/// field is ever silently nulled out.
pub fn decode_post(record: &PostRecord) -> Result<CachedPost, CodecError> {
    let hashtags: Vec<String> = decode_field("hashtags", &record.post_id, &record.hashtags_json)?;
    let author: Author = decode_field("author", &record.post_id, &record.author_json)?;
    let clips: Vec<Clip> = decode_field("clips", &record.post_id, &record.clips_json)?;
    let music: Option<Music> = record
        .music_json
        .as_deref()
        .map(|json| decode_field("music", &record.post_id, json))
        .transpose()?;

    Ok(CachedPost {
        post_id: record.post_id.clone(),
        title: record.title.clone(),
        content: record.content.clone(),
        hashtags,
        create_time: DateTime::from_timestamp_millis(record.create_time).unwrap_or_else(Utc::now),
        author,
        clips,
        music,
        like_count: u32::try_from(record.like_count.max(0)).unwrap_or(u32::MAX),
        is_liked: record.is_liked,
    })
}

fn encode_field<T: Serialize>(
    field: &'static str,
    post_id: &str,
    value: &T,
) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(|source| CodecError::Encode {
        field,
        post_id: post_id.to_string(),
        source,
    })
}

fn decode_field<T: DeserializeOwned>(
    field: &'static str,
    post_id: &str,
    json: &str,
) -> Result<T, CodecError> {
    serde_json::from_str(json).map_err(|source| CodecError::MalformedBlob {
        field,
        post_id: post_id.to_string(),
        source,
    })
}
