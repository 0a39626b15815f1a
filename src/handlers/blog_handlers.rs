use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::models::blog_models::PostSummary;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    tag: Option<String>,
}

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BlogQuery>,
) -> Json<serde_json::Value> {
    let repo = &state.blog_repository;
    let posts: Vec<PostSummary<'_>> = match query.tag.as_deref().filter(|t| !t.is_empty()) {
        Some(tag) => repo.posts_with_tag(tag).map(|post| post.summary()).collect(),
        None => repo.all_posts().iter().map(|post| post.summary()).collect(),
    };

    Json(json!({
        "ok": true,
        "posts": posts,
    }))
}

pub async fn list_slugs(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "ok": true,
        "slugs": state.blog_repository.all_slugs(),
    }))
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match state.blog_repository.find_by_slug(&slug) {
        Some(post) => Ok(Json(json!({
            "ok": true,
            "post": post,
        }))),
        None => {
            tracing::info!("Blog post {} not found", slug);
            Err((
                StatusCode::NOT_FOUND,
                Json(json!({"ok": false, "error": "Article not found"})),
            ))
        }
    }
}
