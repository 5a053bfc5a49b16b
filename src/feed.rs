//! Dashboard post feed: chronological fetch, pure client-side filtering
//! and the create/like/comment mutations.
//!
//! Comments and like state are fetched with batched `in.(...)` queries,
//! so a feed load costs three round-trips regardless of post count. The
//! denormalized counters on `posts` are written from a fresh count of
//! the child rows after each mutation, never from a stale read.

use crate::backend::{BackendClient, Query};
use crate::error::{AppError, AppResult};
use crate::models::{NewPost, Post, PostCategory, PostComment, PostLike, UserProfile};

#[derive(Debug, Clone)]
pub struct FeedPost {
    pub post: Post,
    pub comments: Vec<PostComment>,
    pub user_has_liked: bool,
}

/// Fetch all posts newest-first with their comments (oldest-first) and
/// the current user's like state.
pub async fn fetch_feed(backend: &BackendClient, user_id: &str) -> AppResult<Vec<FeedPost>> {
    let posts: Vec<Post> = backend
        .select("posts", &Query::new().order("created_at.desc"))
        .await?;
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let post_ids: Vec<String> = posts.iter().map(|p| p.id.clone()).collect();

    let comments: Vec<PostComment> = backend
        .select(
            "post_comments",
            &Query::new()
                .in_list("post_id", &post_ids)
                .order("created_at.asc"),
        )
        .await?;

    let likes: Vec<PostLike> = backend
        .select(
            "post_likes",
            &Query::new()
                .in_list("post_id", &post_ids)
                .eq("user_id", user_id),
        )
        .await?;

    let liked: std::collections::HashSet<&str> =
        likes.iter().map(|l| l.post_id.as_str()).collect();

    Ok(posts
        .into_iter()
        .map(|post| {
            let post_comments = comments
                .iter()
                .filter(|c| c.post_id == post.id)
                .cloned()
                .collect();
            let user_has_liked = liked.contains(post.id.as_str());
            FeedPost {
                post,
                comments: post_comments,
                user_has_liked,
            }
        })
        .collect())
}

/// Pure filter over the fetched set: exact category match (`None`
/// bypasses, i.e. the "all" selection) unioned with a case-insensitive
/// location substring match. Never mutates the input.
pub fn filter_posts<'a>(
    posts: &'a [FeedPost],
    category: Option<PostCategory>,
    location: &str,
) -> Vec<&'a FeedPost> {
    let location = location.to_lowercase();
    posts
        .iter()
        .filter(|fp| category.map_or(true, |c| fp.post.category == c))
        .filter(|fp| {
            location.is_empty() || fp.post.location.to_lowercase().contains(&location)
        })
        .collect()
}

pub async fn create_post(
    backend: &BackendClient,
    author: &UserProfile,
    content: &str,
    category: PostCategory,
    location: &str,
) -> AppResult<Post> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("Post content is required".into()));
    }

    let row = NewPost {
        author_id: author.id.clone(),
        author_name: author.full_name.clone(),
        content: content.to_string(),
        category,
        location: location.to_string(),
        likes_count: 0,
        comments_count: 0,
    };
    Ok(backend.insert("posts", &row).await?)
}

/// Toggle the current user's like on a post. Returns the new liked state.
///
/// The like row is the authority; `likes_count` is rewritten from a count
/// of like rows after the toggle, which also self-heals any prior drift.
pub async fn toggle_like(
    backend: &BackendClient,
    user_id: &str,
    post_id: &str,
) -> AppResult<bool> {
    let existing: Option<PostLike> = backend
        .select_one(
            "post_likes",
            &Query::new().eq("post_id", post_id).eq("user_id", user_id),
        )
        .await?;

    let now_liked = if existing.is_some() {
        backend
            .delete(
                "post_likes",
                &Query::new().eq("post_id", post_id).eq("user_id", user_id),
            )
            .await?;
        false
    } else {
        let _: serde_json::Value = backend
            .insert(
                "post_likes",
                &serde_json::json!({ "post_id": post_id, "user_id": user_id }),
            )
            .await?;
        true
    };

    let count = backend
        .count("post_likes", &Query::new().eq("post_id", post_id))
        .await?;
    backend
        .update(
            "posts",
            &Query::new().eq("id", post_id),
            &serde_json::json!({ "likes_count": count }),
        )
        .await?;

    Ok(now_liked)
}

pub async fn add_comment(
    backend: &BackendClient,
    author: &UserProfile,
    post_id: &str,
    content: &str,
) -> AppResult<PostComment> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("Comment content is required".into()));
    }

    let comment: PostComment = backend
        .insert(
            "post_comments",
            &serde_json::json!({
                "post_id": post_id,
                "user_id": author.id,
                "user_name": author.full_name,
                "content": content,
            }),
        )
        .await?;

    let count = backend
        .count("post_comments", &Query::new().eq("post_id", post_id))
        .await?;
    backend
        .update(
            "posts",
            &Query::new().eq("id", post_id),
            &serde_json::json!({ "comments_count": count }),
        )
        .await?;

    Ok(comment)
}
