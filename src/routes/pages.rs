use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    routing::{get, post},
};

use crate::{
    dto::pages::{HomeContext, UploadResponse},
    error::{AppError, AppResult},
    models::Water,
    response::ApiResponse,
    services::page_service,
    state::AppState,
};

/// Multipart field the editor sends its file in.
pub const UPLOAD_FIELD: &str = "file";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/product/{id}", get(product_detail))
        .route("/tinymce/upload", post(tinymce_upload))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page context", body = ApiResponse<HomeContext>)
    ),
    tag = "Pages"
)]
pub async fn home_page(State(state): State<AppState>) -> AppResult<Json<ApiResponse<HomeContext>>> {
    let context = page_service::home_page(&state).await?;
    Ok(Json(ApiResponse::success("Home page", context, None)))
}

#[utoipa::path(
    get,
    path = "/product/{id}",
    params(
        ("id" = i32, Path, description = "Water ID")
    ),
    responses(
        (status = 200, description = "Product detail context", body = ApiResponse<Water>),
        (status = 404, description = "Water not found"),
    ),
    tag = "Pages"
)]
pub async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Water>>> {
    let water = page_service::product_detail(&state, id).await?;
    Ok(Json(ApiResponse::success("Product", water, None)))
}

#[utoipa::path(
    post,
    path = "/tinymce/upload",
    request_body(content = String, content_type = "multipart/form-data", description = "File in the `file` field"),
    responses(
        (status = 200, description = "Stored file location", body = UploadResponse),
        (status = 400, description = "No file in the request"),
    ),
    tag = "Pages"
)]
pub async fn tinymce_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let contents = field.bytes().await?;
        let resp = page_service::editor_upload(&state, &file_name, &contents).await?;
        return Ok(Json(resp));
    }
    Err(AppError::BadRequest(format!("Missing `{UPLOAD_FIELD}` field")))
}
