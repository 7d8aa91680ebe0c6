use super::SqliteRepository;
use super::mapper::map_post_record;
use super::queries::{
    DELETE_ALL_POSTS, SELECT_ALL_POSTS, SELECT_LATEST_POSTS, SELECT_POST_BY_ID, UPSERT_POST,
};
use crate::application::ports::repositories::PostCacheRepository;
use crate::domain::entities::CachedPost;
use crate::infrastructure::database::post_codec::{PostRecord, decode_post, encode_post};
use crate::shared::error::CacheError;
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};
use tracing::debug;

async fn insert_record(
    tx: &mut Transaction<'_, Sqlite>,
    record: &PostRecord,
) -> Result<(), CacheError> {
    sqlx::query(UPSERT_POST)
        .bind(&record.post_id)
        .bind(&record.title)
        .bind(&record.content)
        .bind(&record.hashtags_json)
        .bind(record.create_time)
        .bind(&record.author_json)
        .bind(&record.clips_json)
        .bind(record.music_json.as_deref())
        .bind(record.like_count)
        .bind(record.is_liked)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

fn encode_batch(posts: &[CachedPost]) -> Result<Vec<PostRecord>, CacheError> {
    let mut records = Vec::with_capacity(posts.len());
    for post in posts {
        records.push(encode_post(post)?);
    }
    Ok(records)
}

#[async_trait]
impl PostCacheRepository for SqliteRepository {
    async fn upsert_many(&self, posts: &[CachedPost]) -> Result<(), CacheError> {
        // Encode up front so a codec failure never opens a transaction.
        let records = encode_batch(posts)?;

        let mut tx = self.pool.get_pool().begin().await?;
        for record in &records {
            insert_record(&mut tx, record).await?;
        }
        tx.commit().await?;

        debug!(count = records.len(), "upserted cached posts");
        Ok(())
    }

    async fn replace_all(&self, posts: &[CachedPost]) -> Result<(), CacheError> {
        let records = encode_batch(posts)?;

        // Clear and insert share one transaction, so a concurrent reader
        // sees either the old contents or the new, never the empty window
        // in between. A failed insert rolls the delete back as well.
        let mut tx = self.pool.get_pool().begin().await?;
        sqlx::query(DELETE_ALL_POSTS).execute(&mut *tx).await?;
        for record in &records {
            insert_record(&mut tx, record).await?;
        }
        tx.commit().await?;

        debug!(count = records.len(), "replaced cached posts");
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<CachedPost>, CacheError> {
        let rows = sqlx::query(SELECT_ALL_POSTS)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            let record = map_post_record(&row)?;
            posts.push(decode_post(&record)?);
        }

        Ok(posts)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CachedPost>, CacheError> {
        let row = sqlx::query(SELECT_POST_BY_ID)
            .bind(id)
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => {
                let record = map_post_record(&row)?;
                Ok(Some(decode_post(&record)?))
            }
            None => Ok(None),
        }
    }

    async fn get_latest(&self, count: usize) -> Result<Vec<CachedPost>, CacheError> {
        let rows = sqlx::query(SELECT_LATEST_POSTS)
            .bind(count as i64)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            let record = map_post_record(&row)?;
            posts.push(decode_post(&record)?);
        }

        Ok(posts)
    }

    async fn delete_all(&self) -> Result<(), CacheError> {
        sqlx::query(DELETE_ALL_POSTS)
            .execute(self.pool.get_pool())
            .await?;

        debug!("cleared cached posts");
        Ok(())
    }
}
