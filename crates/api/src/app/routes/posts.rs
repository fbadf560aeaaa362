use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
};

use posts_core::{Entity, PostId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_post).get(list_posts))
        .route("/:id", put(update_post).delete(delete_post))
}

fn parse_id(raw: &str) -> Result<PostId, axum::response::Response> {
    raw.parse::<PostId>().map_err(|e| {
        tracing::debug!("rejecting path id {raw:?}: {e}");
        errors::domain_error_to_response(e)
    })
}

pub async fn create_post(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::PostPayload>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let draft = body.into_draft();

    let post = match services.create_post(draft).await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    tracing::info!(post_id = %post.id(), "post created");
    (StatusCode::CREATED, Json(dto::post_to_json(&post))).into_response()
}

pub async fn list_posts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_posts().await {
        Ok(posts) => (StatusCode::OK, Json(dto::posts_to_json(&posts))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<dto::PostPayload>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    // Unknown ids answer 404 before the body is looked at.
    match services.get_post(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return errors::post_not_found(),
        Err(e) => return errors::store_error_to_response(e),
    }

    let Json(body) = match payload {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let draft = body.into_draft();

    match services.update_post(id, draft).await {
        Ok(Some(post)) => {
            tracing::info!(post_id = %id, "post updated");
            (StatusCode::OK, Json(dto::post_to_json(&post))).into_response()
        }
        Ok(None) => errors::post_not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.delete_post(id).await {
        Ok(true) => {
            tracing::info!(post_id = %id, "post deleted");
            (StatusCode::OK, Json(dto::message("Post deleted"))).into_response()
        }
        Ok(false) => errors::post_not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}
