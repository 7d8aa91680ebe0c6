use crate::infrastructure::database::post_codec::PostRecord;
use crate::shared::error::CacheError;
use sqlx::{Row, sqlite::SqliteRow};

pub(super) fn map_post_record(row: &SqliteRow) -> Result<PostRecord, CacheError> {
    Ok(PostRecord {
        post_id: row.try_get("post_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        hashtags_json: row.try_get("hashtags_json")?,
        create_time: row.try_get("create_time")?,
        author_json: row.try_get("author_json")?,
        clips_json: row.try_get("clips_json")?,
        music_json: row.try_get::<Option<String>, _>("music_json")?,
        like_count: row.try_get("like_count")?,
        is_liked: row.try_get("is_liked")?,
    })
}
