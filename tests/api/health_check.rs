use regenflo_backend::config::app_config::AppConfig;

use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app(AppConfig::default()).await;

    let response = app.get("/api/health").await;

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn static_site_is_served_when_configured() {
    let site = tempfile::tempdir().unwrap();
    std::fs::write(site.path().join("thank-you.html"), "<h1>Thank you.</h1>").unwrap();
    let app = spawn_app(AppConfig {
        static_dir: Some(site.path().to_path_buf()),
        ..AppConfig::default()
    })
    .await;

    let response = app.get("/thank-you.html").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "<h1>Thank you.</h1>");
    // API routes still take precedence over the fallback
    assert_eq!(app.get("/api/health").await.status().as_u16(), 200);
}

#[tokio::test]
async fn unknown_paths_are_404_without_a_static_site() {
    let app = spawn_app(AppConfig::default()).await;

    let response = app.get("/thank-you.html").await;

    assert_eq!(response.status().as_u16(), 404);
}
