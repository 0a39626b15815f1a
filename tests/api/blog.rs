use regenflo_backend::config::app_config::AppConfig;
use tempfile::TempDir;

use crate::helpers::{spawn_app, TestApp};

async fn spawn_with_posts() -> (TestApp, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("first-post.mdx"),
        "---\ntitle: Terrain repair 101\ndate: 2025-01-10\nauthor: Mehul\ntags: [terrain]\n---\n# Hello\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("gut-health.md"),
        "---\ntitle: Gut health\ndate: 2025-02-14\ndescription: The basics\ntags: [gut]\n---\nBody\n",
    )
    .unwrap();

    let app = spawn_app(AppConfig {
        blog_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    })
    .await;
    (app, dir)
}

#[tokio::test]
async fn listing_returns_summaries_newest_first() {
    let (app, _dir) = spawn_with_posts().await;

    let response = app.get("/api/blog").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["slug"], "gut-health");
    assert_eq!(posts[1]["slug"], "first-post");
    assert_eq!(posts[1]["author"], "Mehul");
    assert!(posts[0].get("body").is_none(), "listing should not carry bodies");
}

#[tokio::test]
async fn listing_can_be_filtered_by_tag() {
    let (app, _dir) = spawn_with_posts().await;

    let body: serde_json::Value = app.get("/api/blog?tag=TERRAIN").await.json().await.unwrap();

    let slugs: Vec<&str> = body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|post| post["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["first-post"]);
}

#[tokio::test]
async fn slugs_are_listed() {
    let (app, _dir) = spawn_with_posts().await;

    let body: serde_json::Value = app.get("/api/blog/slugs").await.json().await.unwrap();

    assert_eq!(body["slugs"], serde_json::json!(["gut-health", "first-post"]));
}

#[tokio::test]
async fn a_single_post_includes_its_body() {
    let (app, _dir) = spawn_with_posts().await;

    let response = app.get("/api/blog/first-post").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["post"]["title"], "Terrain repair 101");
    assert_eq!(body["post"]["body"], "# Hello\n");
}

#[tokio::test]
async fn unknown_post_is_a_404() {
    let (app, _dir) = spawn_with_posts().await;

    let response = app.get("/api/blog/no-such-post").await;

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"ok": false, "error": "Article not found"})
    );
}

#[tokio::test]
async fn missing_blog_directory_serves_an_empty_listing() {
    let dir = tempfile::tempdir().unwrap();
    let app = spawn_app(AppConfig {
        blog_dir: dir.path().join("missing"),
        ..AppConfig::default()
    })
    .await;

    let body: serde_json::Value = app.get("/api/blog").await.json().await.unwrap();

    assert_eq!(body, serde_json::json!({"ok": true, "posts": []}));
}
