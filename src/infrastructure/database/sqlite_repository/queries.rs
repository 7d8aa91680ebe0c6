pub(super) const UPSERT_POST: &str = r#"
    INSERT INTO cached_posts (
        post_id,
        title,
        content,
        hashtags_json,
        create_time,
        author_json,
        clips_json,
        music_json,
        like_count,
        is_liked
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
    ON CONFLICT(post_id) DO UPDATE SET
        title = excluded.title,
        content = excluded.content,
        hashtags_json = excluded.hashtags_json,
        create_time = excluded.create_time,
        author_json = excluded.author_json,
        clips_json = excluded.clips_json,
        music_json = excluded.music_json,
        like_count = excluded.like_count,
        is_liked = excluded.is_liked
"#;

pub(super) const SELECT_ALL_POSTS: &str = r#"
    SELECT post_id, title, content, hashtags_json, create_time,
           author_json, clips_json, music_json, like_count, is_liked
    FROM cached_posts
    ORDER BY post_id DESC
"#;

pub(super) const SELECT_POST_BY_ID: &str = r#"
    SELECT post_id, title, content, hashtags_json, create_time,
           author_json, clips_json, music_json, like_count, is_liked
    FROM cached_posts
    WHERE post_id = ?1
"#;

pub(super) const SELECT_LATEST_POSTS: &str = r#"
    SELECT post_id, title, content, hashtags_json, create_time,
           author_json, clips_json, music_json, like_count, is_liked
    FROM cached_posts
    ORDER BY create_time DESC
    LIMIT ?1
"#;

pub(super) const DELETE_ALL_POSTS: &str = r#"
    DELETE FROM cached_posts
"#;
