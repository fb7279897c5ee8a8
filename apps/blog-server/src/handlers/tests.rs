use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use blog_core::domain::{Post, Tag};
use blog_infra::{InMemoryBlogStore, InMemoryMailer};

use super::configure_routes;
use crate::config::SiteConfig;
use crate::state::AppState;

struct Fixture {
    state: AppState,
    store: Arc<InMemoryBlogStore>,
    mailer: Arc<InMemoryMailer>,
    posts: Vec<Post>,
    draft: Post,
}

/// Six published posts, newest first, plus one draft.
async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryBlogStore::new());
    let mailer = Arc::new(InMemoryMailer::new());

    let rust = Tag::new("Rust");
    let web_tag = Tag::new("Web");
    let python = Tag::new("Python");
    let author = Uuid::new_v4();
    let base = Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap();

    let specs: Vec<(&str, Vec<Tag>)> = vec![
        ("Async Rust", vec![rust.clone(), web_tag.clone()]),
        ("Django intro", vec![python.clone(), web_tag.clone()]),
        ("Rust ownership", vec![rust.clone()]),
        ("Unrelated", vec![]),
        ("Web servers", vec![web_tag.clone()]),
        ("Old notes", vec![]),
    ];

    let mut posts = Vec::new();
    for (i, (title, tags)) in specs.into_iter().enumerate() {
        let body = format!("This is **{title}**. It has a few words of *markdown* text.");
        let post = Post::new(author, title, body)
            .with_tags(tags)
            .published_at(base - Duration::days(i as i64));
        posts.push(store.insert_post(post).await.unwrap());
    }

    let draft = store
        .insert_post(Post::new(author, "Secret draft", "wip").with_tags(vec![rust]))
        .await
        .unwrap();

    let state = AppState::in_memory(
        store.clone(),
        mailer.clone(),
        SiteConfig::default(),
        "webmaster@localhost".to_string(),
    );

    Fixture {
        state,
        store,
        mailer,
        posts,
        draft,
    }
}

fn titles(items: &Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_post_list_first_page() {
    let fx = fixture().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/blog/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let data = &body["data"];
    assert_eq!(
        titles(&data["posts"]),
        vec!["Async Rust", "Django intro", "Rust ownership"]
    );
    assert_eq!(data["page"]["number"], 1);
    assert_eq!(data["page"]["num_pages"], 2);
    assert_eq!(data["page"]["has_next"], true);
    assert_eq!(data["sidebar"]["total_posts"], 6);
    assert_eq!(data["sidebar"]["latest_posts"].as_array().unwrap().len(), 5);
    assert!(
        data["posts"][0]["excerpt_html"]
            .as_str()
            .unwrap()
            .contains("<strong>Async Rust</strong>")
    );
}

#[actix_web::test]
async fn test_post_list_page_clamping() {
    let fx = fixture().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    for (raw, expected) in [("99", 2), ("0", 2), ("-3", 2), ("abc", 1), ("2", 2)] {
        let req = test::TestRequest::get()
            .uri(&format!("/blog/?page={raw}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["page"]["number"], expected, "page={raw}");
    }

    let req = test::TestRequest::get().uri("/blog/?page=2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        titles(&body["data"]["posts"]),
        vec!["Unrelated", "Web servers", "Old notes"]
    );
}

#[actix_web::test]
async fn test_post_list_by_tag() {
    let fx = fixture().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/blog/tag/web/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["tag"]["slug"], "web");
    assert_eq!(
        titles(&body["data"]["posts"]),
        vec!["Async Rust", "Django intro", "Web servers"]
    );

    let req = test::TestRequest::get().uri("/blog/tag/nope/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_post_detail_with_similar_posts() {
    let fx = fixture().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/blog/2024/5/20/async-rust/")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let data = &body["data"];
    assert_eq!(data["post"]["title"], "Async Rust");
    assert_eq!(data["form"]["is_bound"], false);
    assert!(data["comments"].as_array().unwrap().is_empty());
    assert_eq!(
        titles(&data["similar_posts"]),
        vec!["Django intro", "Rust ownership", "Web servers"]
    );
}

#[actix_web::test]
async fn test_post_detail_not_found() {
    let fx = fixture().await;
    let draft_path = fx.draft.absolute_path();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    for uri in [
        draft_path.as_str(),
        "/blog/2024/5/21/async-rust/",
        "/blog/2023/2/30/async-rust/",
        "/blog/2024/x/20/async-rust/",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn test_valid_comment_is_stored() {
    let fx = fixture().await;
    let post_id = fx.posts[1].id;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/blog/{post_id}/comment/"))
        .set_form([
            ("name", "Ana"),
            ("email", "ana@example.com"),
            ("body", "Great post"),
        ])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["comment"]["name"], "Ana");
    assert_eq!(fx.store.active_comment_count(post_id).await, 1);

    let req = test::TestRequest::get()
        .uri("/blog/2024/5/19/django-intro/")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["comments"][0]["body"], "Great post");
}

#[actix_web::test]
async fn test_invalid_comment_changes_nothing() {
    let fx = fixture().await;
    let post_id = fx.posts[1].id;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/blog/{post_id}/comment/"))
        .set_form([("name", "Ana"), ("body", "No email")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["comment"].is_null());
    assert_eq!(
        body["data"]["form"]["errors"]["email"][0],
        "This field is required."
    );
    assert_eq!(fx.store.active_comment_count(post_id).await, 0);
}

#[actix_web::test]
async fn test_comment_requires_post_on_published_post() {
    let fx = fixture().await;
    let post_id = fx.posts[0].id;
    let draft_id = fx.draft.id;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/blog/{post_id}/comment/"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let req = test::TestRequest::post()
        .uri(&format!("/blog/{draft_id}/comment/"))
        .set_form([
            ("name", "Ana"),
            ("email", "ana@example.com"),
            ("body", "Hello"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(fx.store.active_comment_count(draft_id).await, 0);
}

#[actix_web::test]
async fn test_share_sends_exactly_one_email() {
    let fx = fixture().await;
    let post_id = fx.posts[0].id;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/blog/{post_id}/share/"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["sent"], false);

    let req = test::TestRequest::post()
        .uri(&format!("/blog/{post_id}/share/"))
        .set_form([
            ("name", "Ana"),
            ("email", "ana@example.com"),
            ("to", "bo@example.com"),
            ("comments", "Have a look"),
        ])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["sent"], true);

    let sent = fx.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].subject,
        "Ana (ana@example.com) recommends you read Async Rust"
    );
    assert!(sent[0].body.starts_with("Read Async Rust at http"));
    assert!(sent[0].body.contains("/blog/2024/5/20/async-rust/"));
    assert!(sent[0].body.ends_with("Ana's comments: Have a look"));
    assert_eq!(sent[0].to, vec!["bo@example.com".to_string()]);
    assert_eq!(sent[0].from.as_deref(), Some("webmaster@localhost"));
}

#[actix_web::test]
async fn test_invalid_share_sends_nothing() {
    let fx = fixture().await;
    let post_id = fx.posts[0].id;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/blog/{post_id}/share/"))
        .set_form([("name", "Ana"), ("email", "ana@example.com"), ("to", "bo")])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["sent"], false);
    assert!(body["data"]["form"]["errors"]["to"].is_array());
    assert!(fx.mailer.is_empty().await);
}

#[actix_web::test]
async fn test_search() {
    let fx = fixture().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/blog/search/?query=djan")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["query"], "djan");
    assert_eq!(titles(&body["data"]["results"]), vec!["Django intro"]);

    let req = test::TestRequest::get().uri("/blog/search/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]["query"].is_null());
    assert_eq!(body["data"]["form"]["is_bound"], false);
    assert!(body["data"]["results"].as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/blog/search/?query=")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]["form"]["errors"]["query"].is_array());
    assert!(body["data"]["results"].as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/blog/search/?query=secret")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(
        !titles(&body["data"]["results"]).contains(&fx.draft.title),
        "drafts never show up in search results"
    );
}

#[actix_web::test]
async fn test_feeds_and_sitemap_only_list_published_posts() {
    let fx = fixture().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/blog/feed/").to_request();
    let resp = test::call_service(&app, req).await;
    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(
        content_type
            .to_str()
            .unwrap()
            .starts_with("application/rss+xml")
    );
    let rss = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(rss.contains("<title>My blog</title>"));
    assert_eq!(rss.matches("<item>").count(), 5);
    assert!(!rss.contains("Secret draft"));
    assert!(!rss.contains("Old notes"), "feeds only carry the latest five posts");

    let req = test::TestRequest::get().uri("/blog/feed/atom/").to_request();
    let atom = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert_eq!(atom.matches("<entry>").count(), 5);

    let req = test::TestRequest::get().uri("/sitemap.xml").to_request();
    let sitemap = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert_eq!(sitemap.matches("<url>").count(), 6);
    assert!(sitemap.contains("/blog/2024/5/16/web-servers/</loc>"));
    assert!(sitemap.contains("/blog/2024/5/15/old-notes/</loc>"));
    assert!(!sitemap.contains("secret-draft"));
    assert!(sitemap.contains("<changefreq>weekly</changefreq>"));
}

#[actix_web::test]
async fn test_health_in_memory() {
    let fx = fixture().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fx.state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "in-memory");
}
