//! Blog post handlers.

use actix_web::{HttpResponse, web};

use blog_core::DomainError;
use blog_core::domain::{Post, PostDraft, PostId};
use blog_shared::{PostPayload, PostResponse, SearchQuery};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn into_draft(payload: PostPayload) -> PostDraft {
    PostDraft {
        id: payload.id,
        title: payload.title.unwrap_or_default(),
        content: payload.content.unwrap_or_default(),
        category: payload.category,
        tags: payload.tags.unwrap_or_default(),
    }
}

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        deleted_at: post.deleted_at(),
        is_deleted: post.is_deleted(),
        id: post.id,
        title: post.title,
        content: post.content,
        category: post.category,
        tags: post.tags,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// Log a failed operation and convert it for the transport.
fn logged<T>(operation: &'static str, result: Result<T, DomainError>) -> AppResult<T> {
    result.map_err(|err| {
        tracing::warn!(operation, kind = ?err.kind(), "Post operation failed: {}", err);
        AppError::from(err)
    })
}

/// POST /blog/
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<Option<PostPayload>>,
) -> AppResult<HttpResponse> {
    let draft = body.into_inner().map(into_draft);
    let post = logged("create", state.posts.create(draft).await)?;

    tracing::info!(post_id = post.id, "Post created");
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// PUT /blog/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<Option<PostPayload>>,
) -> AppResult<HttpResponse> {
    let draft = body.into_inner().map(into_draft);
    let post = logged("update", state.posts.update(path.into_inner(), draft).await)?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /blog/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<PostId>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    logged("delete", state.posts.delete(id).await)?;

    tracing::info!(post_id = id, "Post soft-deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// GET /blog/
pub async fn get_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = logged("get_all", state.posts.get_all().await)?;

    let body: Vec<PostResponse> = posts.into_iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /blog/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = logged("get_by_id", state.posts.get_by_id(path.into_inner()).await)?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /blog/search?term=...
pub async fn find(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let posts = logged("find", state.posts.find(query.term.as_deref()).await)?;

    let body: Vec<PostResponse> = posts.into_iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;

    use super::*;
    use crate::handlers::configure_routes;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn sample(title: &str) -> serde_json::Value {
        json!({
            "title": title,
            "content": format!("This is {title}"),
            "category": "Technology",
            "tags": ["rust", "actix"],
        })
    }

    #[actix_web::test]
    async fn test_create_then_get_round_trip() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/blog/")
            .set_json(sample("Post #1"))
            .to_request();
        let created: PostResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(created.id, 1);
        assert!(!created.is_deleted);
        assert_eq!(created.deleted_at, None);
        assert_eq!(created.created_at, created.updated_at);

        let req = test::TestRequest::get().uri("/blog/1").to_request();
        let fetched: PostResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn test_collection_routes_accept_missing_trailing_slash() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/blog")
            .set_json(sample("Post #1"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/blog").to_request();
        let posts: Vec<PostResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(posts.len(), 1);
    }

    #[actix_web::test]
    async fn test_validation_error_is_plain_text_400() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/blog/")
            .set_json(json!({ "title": "", "content": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
        let body = test::read_body(resp).await;
        assert_eq!(body, "Post must have a title.");
    }

    #[actix_web::test]
    async fn test_null_body_is_rejected() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/blog/")
            .insert_header(("content-type", "application/json"))
            .set_payload("null")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(resp).await, "Post must not be null.");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_400() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/blog/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"title\":")
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_duplicate_id_is_400() {
        let app = app!();

        let mut body = sample("Post #1");
        body["id"] = json!(7);
        for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
            let req = test::TestRequest::post()
                .uri("/blog/")
                .set_json(&body)
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }
    }

    #[actix_web::test]
    async fn test_delete_lifecycle_status_codes() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/blog/")
            .set_json(sample("Post #1"))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::delete().uri("/blog/1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete().uri("/blog/1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get().uri("/blog/1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::put()
            .uri("/blog/1")
            .set_json(sample("Edited"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get().uri("/blog/").to_request();
        let posts: Vec<PostResponse> = test::call_and_read_body_json(&app, req).await;
        assert!(posts.is_empty());
    }

    #[actix_web::test]
    async fn test_unknown_and_invalid_ids() {
        let app = app!();

        let req = test::TestRequest::get().uri("/blog/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(test::read_body(resp).await, "Post with Id = 42 not found.");

        let req = test::TestRequest::delete().uri("/blog/-10").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/blog/abc").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_update_replaces_content_and_keeps_created_at() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/blog/")
            .set_json(sample("Post #1"))
            .to_request();
        let created: PostResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/blog/1")
            .set_json(json!({ "title": "Edited", "content": "New body" }))
            .to_request();
        let updated: PostResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(updated.title, "Edited");
        assert_eq!(updated.category, None);
        assert!(updated.tags.is_empty());
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[actix_web::test]
    async fn test_search() {
        let app = app!();

        for title in ["Post #1", "Post #2", "Post #3"] {
            let req = test::TestRequest::post()
                .uri("/blog/")
                .set_json(sample(title))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get()
            .uri("/blog/search?term=%231")
            .to_request();
        let found: Vec<PostResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Post #1");

        for uri in ["/blog/search", "/blog/search?term="] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(test::read_body(resp).await, "Search term not specified.");
        }
    }

    #[actix_web::test]
    async fn test_health_reports_storage() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }
}
