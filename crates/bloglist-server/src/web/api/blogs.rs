use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use bloglist_common::models::blog::Blog;
use bloglist_common::stats;
use bloglist_db::{BlogRepo, BlogWithOwner};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::web::api::middleware::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// Path ids must parse as UUIDs; anything else is a malformed id.
/// Callers stringify the parsed value so lookups always use the canonical
/// lowercase form.
fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    id.parse::<Uuid>().map_err(|_| ApiError::MalformedId)
}

fn require_non_negative(likes: Option<i64>) -> Result<(), ApiError> {
    match likes {
        Some(likes) if likes < 0 => Err(ApiError::Validation(
            "likes must be non-negative".to_string(),
        )),
        _ => Ok(()),
    }
}

fn blog_json(blog: &BlogWithOwner) -> Value {
    json!({
        "id": blog.blog_id,
        "title": blog.title,
        "author": blog.author,
        "url": blog.url,
        "likes": blog.likes,
        "user": {
            "id": blog.user_id,
            "username": blog.username,
            "name": blog.name,
        },
    })
}

/// GET /api/blogs - all blogs with owners expanded
#[tracing::instrument(skip(state))]
pub async fn list_blogs(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let blogs = BlogRepo::list_with_owners(&state.pool).await?;
    let blogs: Vec<Value> = blogs.iter().map(blog_json).collect();
    Ok(Json(json!(blogs)))
}

/// GET /api/blogs/{id}
#[tracing::instrument(skip(state))]
pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?.to_string();
    let blog = BlogRepo::get_with_owner(&state.pool, &id)
        .await?
        .ok_or(ApiError::NotFound("blog"))?;
    Ok(Json(blog_json(&blog)))
}

/// GET /api/blogs/stats - aggregate statistics over the whole collection
#[tracing::instrument(skip(state))]
pub async fn blog_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let blogs: Vec<Blog> = BlogRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|row| Blog {
            id: row.blog_id,
            title: row.title,
            author: row.author,
            url: row.url,
            likes: row.likes,
        })
        .collect();

    Ok(Json(json!({
        "blogs": blogs.len(),
        "totalLikes": stats::total_likes(&blogs),
        "favoriteBlog": stats::favorite_blog(&blogs),
        "mostBlogs": stats::most_blogs(&blogs),
        "mostLikes": stats::most_likes(&blogs),
    })))
}

/// POST /api/blogs - create a blog owned by the acting user
#[tracing::instrument(skip(state, user, req))]
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<CreateBlogRequest>,
) -> ApiResult<impl IntoResponse> {
    let title = req
        .title
        .filter(|title| !title.is_empty())
        .ok_or_else(|| ApiError::Validation("title is required".to_string()))?;
    let url = req
        .url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::Validation("url is required".to_string()))?;
    require_non_negative(req.likes)?;

    let author = req.author.unwrap_or_default();
    let likes = req.likes.unwrap_or(0);
    let blog_id = Uuid::new_v4().to_string();
    let owner = &user.0;

    BlogRepo::create(&state.pool, &blog_id, &title, &author, &url, likes, &owner.user_id).await?;

    tracing::info!("User {} created blog {}", owner.username, blog_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": blog_id,
            "title": title,
            "author": author,
            "url": url,
            "likes": likes,
            "user": owner.user_id,
        })),
    ))
}

/// PUT /api/blogs/{id} - update fields; fields absent from the body are
/// left unchanged
#[tracing::instrument(skip(state, req))]
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBlogRequest>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?.to_string();

    if matches!(req.title.as_deref(), Some("")) {
        return Err(ApiError::Validation("title is required".to_string()));
    }
    if matches!(req.url.as_deref(), Some("")) {
        return Err(ApiError::Validation("url is required".to_string()));
    }
    require_non_negative(req.likes)?;

    // TODO: decide whether updates should require ownership the way
    // deletes do; today any caller may edit any blog.
    let blog = BlogRepo::update(
        &state.pool,
        &id,
        req.title.as_deref(),
        req.author.as_deref(),
        req.url.as_deref(),
        req.likes,
    )
    .await?
    .ok_or(ApiError::NotFound("blog"))?;

    Ok(Json(json!({
        "id": blog.blog_id,
        "title": blog.title,
        "author": blog.author,
        "url": blog.url,
        "likes": blog.likes,
        "user": blog.user_id,
    })))
}

/// DELETE /api/blogs/{id} - owner only
#[tracing::instrument(skip(state, user))]
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    user: CurrentUser,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?.to_string();
    let blog = BlogRepo::get(&state.pool, &id)
        .await?
        .ok_or(ApiError::NotFound("blog"))?;

    if blog.user_id != user.0.user_id {
        return Err(ApiError::NotOwner);
    }

    BlogRepo::delete(&state.pool, &id).await?;

    tracing::info!("User {} deleted blog {}", user.0.username, id);

    Ok(StatusCode::NO_CONTENT)
}
