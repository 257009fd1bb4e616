use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use devconnect::entities::post_comments;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::read_ok_json;
use crate::support::app_builder::{create_test_app, test_state};
use crate::support::factory::{delete, get, post_json, register_user};

/// Keep creation timestamps strictly ordered.
fn tick() {
    std::thread::sleep(Duration::from_millis(5));
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("id field").to_string()
}

#[actix_web::test]
async fn create_post_copies_author_details() {
    let app = create_test_app(test_state().await).await;
    let user = register_user(&app, "Hank").await;

    let post = read_ok_json(
        test::call_service(
            &app,
            post_json("/api/posts", &user.token, json!({ "text": "hello world" })),
        )
        .await,
    )
    .await;

    assert_eq!(post["text"], "hello world");
    assert_eq!(post["name"], "Hank");
    assert!(post["avatar"].as_str().unwrap().starts_with("https://www.gravatar.com/avatar/"));
    assert_eq!(post["comments"], json!([]));
    assert!(Uuid::parse_str(&id_of(&post)).is_ok());

    let fetched = read_ok_json(
        test::call_service(&app, get(&format!("/api/posts/{}", id_of(&post)), &user.token)).await,
    )
    .await;
    assert_eq!(fetched["id"], post["id"]);
    assert_eq!(fetched["user"], post["user"]);
    assert_eq!(fetched["text"], "hello world");
}

#[actix_web::test]
async fn post_text_is_required() {
    let app = create_test_app(test_state().await).await;
    let user = register_user(&app, "Ivy").await;

    let resp =
        test::call_service(&app, post_json("/api/posts", &user.token, json!({ "text": "" }))).await;
    let problem = assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("Text is required"),
    )
    .await;
    assert_eq!(problem.errors[0].param, "text");
}

#[actix_web::test]
async fn list_posts_newest_first() {
    let app = create_test_app(test_state().await).await;
    let user = register_user(&app, "Jack").await;

    for text in ["first", "second", "third"] {
        let resp =
            test::call_service(&app, post_json("/api/posts", &user.token, json!({ "text": text })))
                .await;
        assert_eq!(resp.status(), StatusCode::OK);
        tick();
    }

    let list = read_ok_json(test::call_service(&app, get("/api/posts", &user.token)).await).await;
    let texts: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["third", "second", "first"]);
}

#[actix_web::test]
async fn unknown_or_garbage_post_id_is_404() {
    let app = create_test_app(test_state().await).await;
    let user = register_user(&app, "Kim").await;

    for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let resp = test::call_service(&app, get(&format!("/api/posts/{id}"), &user.token)).await;
        assert_problem_details_from_service_response(
            resp,
            "POST_NOT_FOUND",
            StatusCode::NOT_FOUND,
            Some("Post not found"),
        )
        .await;
    }
}

#[actix_web::test]
async fn only_the_author_can_delete_a_post() {
    let app = create_test_app(test_state().await).await;
    let author = register_user(&app, "Leo").await;
    let other = register_user(&app, "Mia").await;

    let post = read_ok_json(
        test::call_service(
            &app,
            post_json("/api/posts", &author.token, json!({ "text": "mine" })),
        )
        .await,
    )
    .await;
    let uri = format!("/api/posts/{}", id_of(&post));

    let resp = test::call_service(&app, delete(&uri, &other.token)).await;
    assert_problem_details_from_service_response(
        resp,
        "NOT_OWNER",
        StatusCode::UNAUTHORIZED,
        Some("User not authorized"),
    )
    .await;

    // Still there after the refused delete.
    let resp = test::call_service(&app, get(&uri, &author.token)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_ok_json(test::call_service(&app, delete(&uri, &author.token)).await).await;
    assert_eq!(body, json!({ "msg": "Post removed" }));

    let resp = test::call_service(&app, get(&uri, &author.token)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, delete(&uri, &author.token)).await;
    assert_problem_details_from_service_response(
        resp,
        "POST_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

#[actix_web::test]
async fn comments_are_added_newest_first_and_deleted_by_author_only() {
    let app = create_test_app(test_state().await).await;
    let author = register_user(&app, "Nina").await;
    let commenter = register_user(&app, "Omar").await;

    let post = read_ok_json(
        test::call_service(
            &app,
            post_json("/api/posts", &author.token, json!({ "text": "discuss" })),
        )
        .await,
    )
    .await;
    let post_id = id_of(&post);
    let comment_uri = format!("/api/posts/comment/{post_id}");

    let comments = read_ok_json(
        test::call_service(
            &app,
            post_json(&comment_uri, &commenter.token, json!({ "text": "first!" })),
        )
        .await,
    )
    .await;
    assert_eq!(comments.as_array().unwrap().len(), 1);
    assert_eq!(comments[0]["name"], "Omar");
    tick();

    let comments = read_ok_json(
        test::call_service(
            &app,
            post_json(&comment_uri, &author.token, json!({ "text": "thanks" })),
        )
        .await,
    )
    .await;
    let texts: Vec<&str> = comments
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["thanks", "first!"]);

    let fetched = read_ok_json(
        test::call_service(&app, get(&format!("/api/posts/{post_id}"), &author.token)).await,
    )
    .await;
    let fetched_ids: Vec<String> = fetched["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(id_of)
        .collect();
    let added_ids: Vec<String> = comments.as_array().unwrap().iter().map(id_of).collect();
    assert_eq!(fetched_ids, added_ids);

    let omar_comment = id_of(&comments[1]);
    let delete_uri = format!("/api/posts/comment/{post_id}/{omar_comment}");

    // The post author does not own the comment.
    let resp = test::call_service(&app, delete(&delete_uri, &author.token)).await;
    assert_problem_details_from_service_response(
        resp,
        "NOT_OWNER",
        StatusCode::UNAUTHORIZED,
        Some("User not authorized"),
    )
    .await;

    let remaining =
        read_ok_json(test::call_service(&app, delete(&delete_uri, &commenter.token)).await).await;
    let texts: Vec<&str> = remaining
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["thanks"]);

    let resp = test::call_service(&app, delete(&delete_uri, &commenter.token)).await;
    assert_problem_details_from_service_response(
        resp,
        "COMMENT_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Comment does not exist"),
    )
    .await;
}

#[actix_web::test]
async fn comment_on_missing_post_is_404() {
    let app = create_test_app(test_state().await).await;
    let user = register_user(&app, "Pia").await;

    let resp = test::call_service(
        &app,
        post_json(
            &format!("/api/posts/comment/{}", Uuid::new_v4()),
            &user.token,
            json!({ "text": "anyone?" }),
        ),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "POST_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;

    let resp = test::call_service(
        &app,
        delete(
            &format!("/api/posts/comment/{}/{}", Uuid::new_v4(), Uuid::new_v4()),
            &user.token,
        ),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "POST_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Post not found"),
    )
    .await;
}

#[actix_web::test]
async fn deleting_a_post_removes_its_comments() {
    let state = test_state().await;
    let app = create_test_app(state.clone()).await;
    let user = register_user(&app, "Quin").await;

    let post = read_ok_json(
        test::call_service(&app, post_json("/api/posts", &user.token, json!({ "text": "bye" })))
            .await,
    )
    .await;
    let post_id = id_of(&post);
    let resp = test::call_service(
        &app,
        post_json(
            &format!("/api/posts/comment/{post_id}"),
            &user.token,
            json!({ "text": "soon gone" }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, delete(&format!("/api/posts/{post_id}"), &user.token)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let left = post_comments::Entity::find().count(state.db()).await.unwrap();
    assert_eq!(left, 0);
}
