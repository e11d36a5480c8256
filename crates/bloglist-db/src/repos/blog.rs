use anyhow::{Context, Result};
use sqlx::SqlitePool;

/// A blog row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRow {
    pub blog_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user_id: String,
}

/// A blog row joined with its owning user, for listings
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogWithOwner {
    pub blog_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user_id: String,
    pub username: String,
    pub name: String,
}

pub struct BlogRepo;

impl BlogRepo {
    pub async fn create(
        pool: &SqlitePool,
        blog_id: &str,
        title: &str,
        author: &str,
        url: &str,
        likes: i64,
        user_id: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO blogs (blog_id, title, author, url, likes, user_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(blog_id)
        .bind(title)
        .bind(author)
        .bind(url)
        .bind(likes)
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to create blog")?;
        Ok(())
    }

    pub async fn get(pool: &SqlitePool, blog_id: &str) -> Result<Option<BlogRow>> {
        let blog = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT blog_id, title, author, url, likes, user_id
            FROM blogs
            WHERE blog_id = ?
            "#,
        )
        .bind(blog_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog")?;
        Ok(blog)
    }

    pub async fn get_with_owner(pool: &SqlitePool, blog_id: &str) -> Result<Option<BlogWithOwner>> {
        let blog = sqlx::query_as::<_, BlogWithOwner>(
            r#"
            SELECT b.blog_id, b.title, b.author, b.url, b.likes, b.user_id, u.username, u.name
            FROM blogs b
            JOIN users u ON u.user_id = b.user_id
            WHERE b.blog_id = ?
            "#,
        )
        .bind(blog_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog with owner")?;
        Ok(blog)
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<BlogRow>> {
        let blogs = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT blog_id, title, author, url, likes, user_id
            FROM blogs
            ORDER BY created_at, blog_id
            "#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to list blogs")?;
        Ok(blogs)
    }

    pub async fn list_with_owners(pool: &SqlitePool) -> Result<Vec<BlogWithOwner>> {
        let blogs = sqlx::query_as::<_, BlogWithOwner>(
            r#"
            SELECT b.blog_id, b.title, b.author, b.url, b.likes, b.user_id, u.username, u.name
            FROM blogs b
            JOIN users u ON u.user_id = b.user_id
            ORDER BY b.created_at, b.blog_id
            "#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to list blogs with owners")?;
        Ok(blogs)
    }

    /// Update the given fields of a blog; `None` leaves a field unchanged.
    /// Returns the updated row, or `None` if no blog has this id.
    pub async fn update(
        pool: &SqlitePool,
        blog_id: &str,
        title: Option<&str>,
        author: Option<&str>,
        url: Option<&str>,
        likes: Option<i64>,
    ) -> Result<Option<BlogRow>> {
        let result = sqlx::query(
            r#"
            UPDATE blogs
            SET title = COALESCE(?, title),
                author = COALESCE(?, author),
                url = COALESCE(?, url),
                likes = COALESCE(?, likes)
            WHERE blog_id = ?
            "#,
        )
        .bind(title)
        .bind(author)
        .bind(url)
        .bind(likes)
        .bind(blog_id)
        .execute(pool)
        .await
        .context("Failed to update blog")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::get(pool, blog_id).await
    }

    /// Delete a blog. Returns true if a row was removed.
    pub async fn delete(pool: &SqlitePool, blog_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE blog_id = ?")
            .bind(blog_id)
            .execute(pool)
            .await
            .context("Failed to delete blog")?;
        Ok(result.rows_affected() > 0)
    }
}
