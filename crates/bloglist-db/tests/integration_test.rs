use anyhow::Result;
use bloglist_db::{create_pool, is_unique_violation, run_migrations, BlogRepo, UserRepo};
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

async fn setup_db() -> Result<(SqlitePool, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("bloglist.db");
    let url = format!("sqlite://{}", db_path.display());
    let pool = create_pool(&url, 5).await?;
    run_migrations(&pool).await?;
    Ok((pool, temp_dir))
}

async fn seed_user(pool: &SqlitePool, username: &str) -> Result<String> {
    let user_id = Uuid::new_v4().to_string();
    UserRepo::create(pool, &user_id, username, "Test User", "$argon2id$hashed").await?;
    Ok(user_id)
}

// ─── User repo tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_create_user_and_get_by_username() -> Result<()> {
    let (pool, _tmp) = setup_db().await?;

    let user_id = Uuid::new_v4().to_string();
    UserRepo::create(&pool, &user_id, "alice", "Alice", "$argon2id$hashed").await?;

    let user = UserRepo::get_by_username(&pool, "alice")
        .await?
        .expect("User should exist");
    assert_eq!(user.user_id, user_id);
    assert_eq!(user.username, "alice");
    assert_eq!(user.name, "Alice");
    assert_eq!(user.password_hash, "$argon2id$hashed");

    Ok(())
}

#[tokio::test]
async fn test_get_user_by_id() -> Result<()> {
    let (pool, _tmp) = setup_db().await?;

    let user_id = seed_user(&pool, "bob").await?;

    let user = UserRepo::get_by_id(&pool, &user_id)
        .await?
        .expect("User should exist");
    assert_eq!(user.username, "bob");

    Ok(())
}

#[tokio::test]
async fn test_get_nonexistent_user() -> Result<()> {
    let (pool, _tmp) = setup_db().await?;

    let result = UserRepo::get_by_username(&pool, "nobody").await?;
    assert!(result.is_none());

    let result = UserRepo::get_by_id(&pool, &Uuid::new_v4().to_string()).await?;
    assert!(result.is_none());

    Ok(())
}

#[tokio::test]
async fn test_duplicate_username_is_a_unique_violation() -> Result<()> {
    let (pool, _tmp) = setup_db().await?;

    seed_user(&pool, "dup").await?;
    let err = UserRepo::create(
        &pool,
        &Uuid::new_v4().to_string(),
        "dup",
        "Other",
        "$argon2id$other",
    )
    .await
    .expect_err("Second insert should fail");

    assert!(is_unique_violation(&err));

    Ok(())
}

#[tokio::test]
async fn test_list_users() -> Result<()> {
    let (pool, _tmp) = setup_db().await?;

    seed_user(&pool, "alice").await?;
    seed_user(&pool, "bob").await?;

    let users = UserRepo::list(&pool).await?;
    assert_eq!(users.len(), 2);

    Ok(())
}

// ─── Blog repo tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_create_and_get_blog() -> Result<()> {
    let (pool, _tmp) = setup_db().await?;

    let user_id = seed_user(&pool, "alice").await?;
    let blog_id = Uuid::new_v4().to_string();
    BlogRepo::create(
        &pool,
        &blog_id,
        "React patterns",
        "Michael Chan",
        "https://reactpatterns.com/",
        7,
        &user_id,
    )
    .await?;

    let blog = BlogRepo::get(&pool, &blog_id)
        .await?
        .expect("Blog should exist");
    assert_eq!(blog.title, "React patterns");
    assert_eq!(blog.author, "Michael Chan");
    assert_eq!(blog.likes, 7);
    assert_eq!(blog.user_id, user_id);

    Ok(())
}

#[tokio::test]
async fn test_get_blog_with_owner() -> Result<()> {
    let (pool, _tmp) = setup_db().await?;

    let user_id = seed_user(&pool, "alice").await?;
    let blog_id = Uuid::new_v4().to_string();
    BlogRepo::create(&pool, &blog_id, "Title", "Author", "https://x.test/", 0, &user_id).await?;

    let blog = BlogRepo::get_with_owner(&pool, &blog_id)
        .await?
        .expect("Blog should exist");
    assert_eq!(blog.username, "alice");
    assert_eq!(blog.name, "Test User");

    Ok(())
}

#[tokio::test]
async fn test_list_blogs_with_owners() -> Result<()> {
    let (pool, _tmp) = setup_db().await?;

    let user_id = seed_user(&pool, "alice").await?;
    for i in 0..3 {
        BlogRepo::create(
            &pool,
            &Uuid::new_v4().to_string(),
            &format!("Blog {}", i),
            "Author",
            "https://x.test/",
            i,
            &user_id,
        )
        .await?;
    }

    let blogs = BlogRepo::list_with_owners(&pool).await?;
    assert_eq!(blogs.len(), 3);
    assert!(blogs.iter().all(|b| b.username == "alice"));

    Ok(())
}

#[tokio::test]
async fn test_update_blog_changes_only_given_fields() -> Result<()> {
    let (pool, _tmp) = setup_db().await?;

    let user_id = seed_user(&pool, "alice").await?;
    let blog_id = Uuid::new_v4().to_string();
    BlogRepo::create(&pool, &blog_id, "Old title", "Author", "https://x.test/", 1, &user_id)
        .await?;

    let updated = BlogRepo::update(&pool, &blog_id, None, None, None, Some(42))
        .await?
        .expect("Blog should exist");
    assert_eq!(updated.likes, 42);
    assert_eq!(updated.title, "Old title");

    let updated = BlogRepo::update(&pool, &blog_id, Some("New title"), None, None, None)
        .await?
        .expect("Blog should exist");
    assert_eq!(updated.title, "New title");
    assert_eq!(updated.likes, 42);

    Ok(())
}

#[tokio::test]
async fn test_update_missing_blog_returns_none() -> Result<()> {
    let (pool, _tmp) = setup_db().await?;

    let result =
        BlogRepo::update(&pool, &Uuid::new_v4().to_string(), None, None, None, Some(1)).await?;
    assert!(result.is_none());

    Ok(())
}

#[tokio::test]
async fn test_delete_blog() -> Result<()> {
    let (pool, _tmp) = setup_db().await?;

    let user_id = seed_user(&pool, "alice").await?;
    let blog_id = Uuid::new_v4().to_string();
    BlogRepo::create(&pool, &blog_id, "Title", "Author", "https://x.test/", 0, &user_id).await?;

    assert!(BlogRepo::delete(&pool, &blog_id).await?);
    assert!(BlogRepo::get(&pool, &blog_id).await?.is_none());

    // Deleting again removes nothing
    assert!(!BlogRepo::delete(&pool, &blog_id).await?);

    Ok(())
}
