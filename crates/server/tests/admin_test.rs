mod common;

use axum::http::StatusCode;
use folio_server::db::inputs::ContactForm;
use serde_json::json;

use common::*;

#[tokio::test]
async fn admin_routes_require_a_token() {
    let ctx = build_test_context().await;

    let (status, _) = request_json(&ctx.app, "GET", "/api/admin/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request_json(
        &ctx.app,
        "GET",
        "/api/admin/dashboard",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let ctx = build_test_context().await;

    let (status, body) = request_json(
        &ctx.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": "wrong" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn project_crud_roundtrip() {
    let ctx = build_test_context().await;
    let token = login_and_get_token(&ctx.app).await;

    let (status, created) = request_json(
        &ctx.app,
        "POST",
        "/api/admin/projects",
        Some(&token),
        Some(json!({
            "title": "  Folio  ",
            "description": "Portfolio site",
            "image": "projects/folio.png",
            "technologies": "Rust, axum, , SQLite",
            "github_link": "https://github.com/example/folio",
            "is_featured": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    assert_eq!(created["title"], "Folio");
    assert_eq!(created["technologies"], json!(["Rust", "axum", "SQLite"]));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, listed) = request_json(
        &ctx.app,
        "GET",
        "/api/admin/projects?featured=true&q=folio",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], 1);

    let (status, updated) = request_json(
        &ctx.app,
        "PUT",
        &format!("/api/admin/projects/{id}"),
        Some(&token),
        Some(json!({
            "title": "Folio 2",
            "description": "Portfolio site",
            "image": "projects/folio.png",
            "technologies": ["Rust"],
            "is_featured": false,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Folio 2");
    assert_eq!(updated["created_date"], created["created_date"]);

    let (status, _) = request_json(
        &ctx.app,
        "DELETE",
        &format!("/api/admin/projects/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request_json(
        &ctx.app,
        "GET",
        &format!("/api/admin/projects/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn invalid_skill_reports_field_errors() {
    let ctx = build_test_context().await;
    let token = login_and_get_token(&ctx.app).await;

    let (status, body) = request_json(
        &ctx.app,
        "POST",
        "/api/admin/skills",
        Some(&token),
        Some(json!({
            "name": "Rust",
            "category": "backend",
            "proficiency": 140,
            "icon": "fab fa-rust",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["fields"]["proficiency"].is_array());
}

#[tokio::test]
async fn marking_one_message_read_leaves_the_other_unread() {
    let ctx = build_test_context().await;
    let token = login_and_get_token(&ctx.app).await;

    let mut ids = Vec::new();
    for name in ["Ada", "Grace"] {
        let receipt = ctx
            .state
            .contact
            .submit(ContactForm {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                subject: "Hello".to_string(),
                message: "Hi".to_string(),
            })
            .await
            .unwrap();
        ids.push(receipt.message.id);
    }

    let (status, message) = request_json(
        &ctx.app,
        "POST",
        &format!("/api/admin/messages/{}/read", ids[0]),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["is_read"], true);

    let (_, unread) = request_json(
        &ctx.app,
        "GET",
        "/api/admin/messages?is_read=false",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(unread["count"], 1);
    assert_eq!(unread["items"][0]["id"], ids[1].as_str());

    let (_, stats) =
        request_json(&ctx.app, "GET", "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(stats["unread_messages"], 1);

    let (status, bulk) = request_json(
        &ctx.app,
        "POST",
        "/api/admin/messages/mark-unread",
        Some(&token),
        Some(json!({ "ids": ids })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bulk["updated"], 2);

    let (_, stats) =
        request_json(&ctx.app, "GET", "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(stats["unread_messages"], 2);
}

#[tokio::test]
async fn profile_put_then_public_pages_show_it() {
    let ctx = build_test_context().await;
    let token = login_and_get_token(&ctx.app).await;

    let (status, _) = request_json(&ctx.app, "GET", "/api/admin/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, profile) = request_json(
        &ctx.app,
        "PUT",
        "/api/admin/profile",
        Some(&token),
        Some(json!({
            "name": "Grace Hopper",
            "title": "Rear Admiral",
            "bio": "Invented the first compiler.",
            "email": "grace@example.com",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{profile}");

    let (_, again) = request_json(
        &ctx.app,
        "PUT",
        "/api/admin/profile",
        Some(&token),
        Some(json!({
            "name": "Grace Hopper",
            "title": "Computer Scientist",
            "bio": "Invented the first compiler.",
            "email": "grace@example.com",
        })),
    )
    .await;
    assert_eq!(again["id"], profile["id"]);

    let (_, body) = get_page(&ctx.app, "/about/").await;
    assert!(body.contains("Computer Scientist"));
    assert!(!body.contains("Rear Admiral"));
}

#[tokio::test]
async fn remaining_entities_support_authenticated_writes() {
    let ctx = build_test_context().await;
    let token = login_and_get_token(&ctx.app).await;

    let cases = [
        (
            "experience",
            json!({
                "company": "Acme",
                "position": "Engineer",
                "start_date": "2020-01-15",
                "is_current": true,
            }),
            json!({
                "company": "Acme",
                "position": "Staff Engineer",
                "start_date": "2020-01-15",
                "end_date": "2023-06-30",
            }),
            "position",
            "Staff Engineer",
        ),
        (
            "education",
            json!({
                "institution": "University",
                "degree": "BSc",
                "field_of_study": "Mathematics",
                "start_date": "2012-09-01",
            }),
            json!({
                "institution": "University",
                "degree": "MSc",
                "field_of_study": "Mathematics",
                "start_date": "2012-09-01",
                "end_date": "2016-06-30",
            }),
            "degree",
            "MSc",
        ),
        (
            "certifications",
            json!({
                "name": "Cloud Practitioner",
                "issuing_organization": "Cloud Co",
                "issue_date": "2022-03-01",
            }),
            json!({
                "name": "Cloud Architect",
                "issuing_organization": "Cloud Co",
                "issue_date": "2023-03-01",
                "credential_url": "https://example.com/verify/1",
            }),
            "name",
            "Cloud Architect",
        ),
        (
            "testimonials",
            json!({
                "name": "Client",
                "position": "CEO",
                "company": "Startup",
                "testimonial": "Shipped on time.",
                "rating": 4,
            }),
            json!({
                "name": "Client",
                "position": "CEO",
                "company": "Startup",
                "testimonial": "Shipped early.",
                "rating": 5,
            }),
            "testimonial",
            "Shipped early.",
        ),
    ];

    for (resource, create, update, field, expected) in cases {
        let base = format!("/api/admin/{resource}");

        let (status, created) =
            request_json(&ctx.app, "POST", &base, Some(&token), Some(create)).await;
        assert_eq!(status, StatusCode::OK, "{resource}: {created}");
        let item = format!("{base}/{}", created["id"].as_str().unwrap());

        let (status, updated) =
            request_json(&ctx.app, "PUT", &item, Some(&token), Some(update)).await;
        assert_eq!(status, StatusCode::OK, "{resource}: {updated}");
        assert_eq!(updated[field], expected);

        let (status, _) = request_json(&ctx.app, "DELETE", &item, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK, "{resource}");

        let (status, _) = request_json(&ctx.app, "DELETE", &item, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{resource}");
    }
}
