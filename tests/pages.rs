mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use water_store::{
    dto::ledger::CreateWarehouseRequest,
    entity::MeasureUnit,
    models::User,
    routes::create_router,
    services::{
        account_service::{self, UserFields},
        inventory_service,
    },
    state::AppState,
};

fn bearer(state: &AppState, user: &User) -> anyhow::Result<String> {
    let token = account_service::issue_token(&state.config.jwt_secret, user)?;
    Ok(format!("Bearer {token}"))
}

const BOUNDARY: &str = "water-store-boundary";

async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().uri(uri).body(Body::empty())?)
}

fn multipart(
    uri: &str,
    authorization: Option<&str>,
    field: &str,
    file_name: &str,
    contents: &str,
) -> anyhow::Result<Request<Body>> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {contents}\r\n\
         --{BOUNDARY}--\r\n"
    );
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    Ok(builder.body(Body::from(body))?)
}

fn json_request(method: &str, uri: &str, authorization: Option<&str>, body: Value) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    Ok(builder.body(Body::from(body.to_string()))?)
}

#[tokio::test]
async fn empty_catalog_renders_bare_home_page() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let app = create_router(state);

    let (status, body) = send(&app, get("/")?).await?;
    assert_eq!(status, StatusCode::OK);
    let context = body["data"].as_object().expect("context object");
    assert!(!context.contains_key("best_water_warehouse"));
    assert!(!context.contains_key("water_warehouses"));
    Ok(())
}

#[tokio::test]
async fn first_water_is_featured_on_home_page() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (_, staff) = common::create_staff(&state, "998901240001").await?;
    let water = common::create_water(&state, &staff, "Hydrolife 19").await?;
    inventory_service::add_stock(
        &state,
        &staff,
        CreateWarehouseRequest {
            water_id: water.id,
            quantity: common::dec("40"),
            unit: MeasureUnit::Piece,
        },
    )
    .await?;
    let app = create_router(state.clone());

    let (_, body) = send(&app, get("/")?).await?;
    let best = &body["data"]["best_water_warehouse"];
    assert_eq!(best["water"]["name"], "Hydrolife 19");
    assert_eq!(best["warehouse"].as_array().map(Vec::len), Some(1));
    assert_eq!(best["warehouse"][0]["quantity"], "40.00");
    assert_eq!(body["data"]["water_warehouses"], json!([]));

    for name in ["Bonaqua", "Nestle", "Hydrolife 0.5"] {
        common::create_water(&state, &staff, name).await?;
    }
    let (_, body) = send(&app, get("/")?).await?;
    let rest: Vec<_> = body["data"]["water_warehouses"]
        .as_array()
        .expect("list")
        .iter()
        .map(|pair| pair["water"]["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(body["data"]["best_water_warehouse"]["water"]["name"], "Hydrolife 19");
    assert_eq!(rest, ["Bonaqua", "Nestle"]);
    assert_eq!(body["data"]["water_warehouses"][0]["warehouse"], json!([]));
    Ok(())
}

#[tokio::test]
async fn product_detail_finds_water_by_id() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (_, staff) = common::create_staff(&state, "998901240002").await?;
    let water = common::create_water(&state, &staff, "Bonaqua 0.5").await?;
    let app = create_router(state);

    let (status, body) = send(&app, get(&format!("/product/{}", water.id))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Bonaqua 0.5");
    assert_eq!(body["data"]["price"], "4500.00");
    assert_eq!(body["data"]["unit"], "l");

    let (status, _) = send(&app, get("/product/999")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn editor_upload_stores_file_under_media_root() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let media_root = state.config.media_root.clone();
    let app = create_router(state);

    let request = multipart("/tinymce/upload", None, "file", "../label.png", "not really a png")?;
    let (status, body) = send(&app, request).await?;
    assert_eq!(status, StatusCode::OK);

    let location = body["location"].as_str().expect("location").to_string();
    assert!(location.starts_with("/media/tinymce/"));
    assert!(location.ends_with("/label.png"));

    let relative = location.trim_start_matches("/media/");
    let stored = tokio::fs::read_to_string(media_root.join(relative)).await?;
    assert_eq!(stored, "not really a png");

    let served = app.clone().oneshot(get(&location)?).await?;
    assert_eq!(served.status(), StatusCode::OK);
    let bytes = to_bytes(served.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"not really a png");

    let _ = std::fs::remove_dir_all(&media_root);
    Ok(())
}

#[tokio::test]
async fn editor_upload_without_file_is_rejected() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let app = create_router(state);

    let request = multipart("/tinymce/upload", None, "attachment", "label.png", "bytes")?;
    let (status, _) = send(&app, request).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn catalog_writes_need_a_staff_token() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    account_service::create_user(
        &state,
        "998901240003",
        None,
        Some("staff-password"),
        UserFields {
            is_staff: Some(true),
            ..Default::default()
        },
    )
    .await?;
    let app = create_router(state);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "phone": "998901240004",
                "password": "customer-pass",
                "first_name": "Malika",
                "last_name": "Karimova"
            }),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("password").is_none());

    let login = |phone: &str, password: &str| {
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "phone": phone, "password": password }),
        )
    };
    let (_, body) = send(&app, login("998901240003", "staff-password")?).await?;
    // The login response already carries the scheme.
    let staff_token = body["data"]["token"].as_str().expect("staff token").to_string();
    assert!(staff_token.starts_with("Bearer "));
    let (_, body) = send(&app, login("998901240004", "customer-pass")?).await?;
    let customer_token = body["data"]["token"].as_str().expect("customer token").to_string();

    let (status, _) = send(&app, login("998901240004", "wrong-pass")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let water = json!({
        "name": "Hydrolife 10",
        "price": "21000",
        "volume": "10",
        "description": "<p>Ten litres</p>"
    });
    let (status, _) = send(
        &app,
        json_request("POST", "/api/waters", Some(&customer_token), water.clone())?,
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        json_request("POST", "/api/waters", Some(&staff_token), water)?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["available"], true);
    assert_eq!(body["data"]["unit"], "l");

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/waters",
            Some(&staff_token),
            json!({
                "name": "Too expensive",
                "price": "1000000",
                "volume": "1",
                "description": ""
            }),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn weak_password_is_rejected_at_registration() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let app = create_router(state.clone());

    for password in ["short", "12345678901"] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/auth/register",
                None,
                json!({
                    "phone": "998901240005",
                    "password": password,
                    "first_name": "",
                    "last_name": ""
                }),
            )?,
        )
        .await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
    assert!(account_service::get_user_by_phone(&state, "998901240005").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn staff_attach_dated_product_images() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let media_root = state.config.media_root.clone();
    let (staff, staff_auth) = common::create_staff(&state, "998901240006").await?;
    let customer = account_service::create_user(
        &state,
        "998901240007",
        None,
        Some("customer-pass"),
        UserFields::default(),
    )
    .await?;
    let water = common::create_water(&state, &staff_auth, "Hydrolife 1.5").await?;
    let app = create_router(state.clone());
    let uri = format!("/api/waters/{}/image", water.id);

    let customer_auth = bearer(&state, &customer)?;
    let request = multipart(&uri, Some(&customer_auth), "image", "bottle.png", "png bytes")?;
    let (status, _) = send(&app, request).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let staff_auth_header = bearer(&state, &staff)?;
    let request = multipart(&uri, Some(&staff_auth_header), "image", "bottle.png", "png bytes")?;
    let (status, body) = send(&app, request).await?;
    assert_eq!(status, StatusCode::OK);

    let image = body["data"]["image"].as_str().expect("image path").to_string();
    let today = chrono::Utc::now().format("%Y/%m/%d").to_string();
    assert!(image.starts_with(&format!("products/{today}/")));
    assert!(image.ends_with("/bottle.png"));
    assert_eq!(tokio::fs::read_to_string(media_root.join(&image)).await?, "png bytes");

    let served = app.clone().oneshot(get(&format!("/media/{image}"))?).await?;
    assert_eq!(served.status(), StatusCode::OK);

    let request = multipart(&uri, Some(&staff_auth_header), "file", "bottle.png", "png bytes")?;
    let (status, _) = send(&app, request).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let _ = std::fs::remove_dir_all(&media_root);
    Ok(())
}

#[tokio::test]
async fn oversized_page_numbers_return_an_empty_page() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (_, staff) = common::create_staff(&state, "998901240008").await?;
    common::create_water(&state, &staff, "Bonaqua").await?;
    let app = create_router(state);

    for uri in [
        "/api/waters?page=9223372036854775807&per_page=9223372036854775807",
        "/api/warehouses?page=9223372036854775807",
        "/api/trades?page=9223372036854775807",
    ] {
        let (status, body) = send(&app, get(uri)?).await?;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["data"], json!([]), "{uri}");
    }
    Ok(())
}
