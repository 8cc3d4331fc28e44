#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr, sync::Arc};

use rust_decimal::Decimal;
use uuid::Uuid;
use water_store::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::catalog::CreateWaterRequest,
    entity::MeasureUnit,
    error::AppResult,
    hashing::PasswordHashing,
    middleware::auth::AuthUser,
    models::{User, Water},
    services::{
        account_service::{self, UserFields},
        catalog_service,
    },
    state::AppState,
};

pub const JWT_SECRET: &str = "test-secret";

/// Reversible stand-in for argon2 so tests stay fast.
pub struct PlainHashing;

impl PasswordHashing for PlainHashing {
    fn hash(&self, raw: &str) -> AppResult<String> {
        Ok(format!("plain${raw}"))
    }

    fn verify(&self, raw: &str, encoded: &str) -> bool {
        encoded.strip_prefix("plain$") == Some(raw)
    }
}

/// Fresh in-memory database with every migration applied, and a private
/// media directory.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let database_url = "sqlite::memory:";
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: JWT_SECRET.to_string(),
        media_root: temp_media_root(),
        max_body_bytes: 1024 * 1024,
    };
    Ok(AppState::new(orm, config, Arc::new(PlainHashing)))
}

pub fn temp_media_root() -> PathBuf {
    std::env::temp_dir().join(format!("water-store-test-media-{}", Uuid::new_v4()))
}

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}

pub async fn create_staff(state: &AppState, phone: &str) -> anyhow::Result<(User, AuthUser)> {
    let user = account_service::create_user(
        state,
        phone,
        None,
        Some("staff-password"),
        UserFields {
            is_staff: Some(true),
            ..Default::default()
        },
    )
    .await?;
    let auth = AuthUser {
        user_id: user.id,
        is_staff: user.is_staff,
        is_superuser: user.is_superuser,
    };
    Ok((user, auth))
}

pub fn water_request(name: &str) -> CreateWaterRequest {
    CreateWaterRequest {
        name: name.to_string(),
        price: dec("4500"),
        unit: MeasureUnit::Litre,
        description: format!("<p>{name}</p>"),
        available: None,
        volume: dec("1.5"),
    }
}

pub async fn create_water(state: &AppState, staff: &AuthUser, name: &str) -> anyhow::Result<Water> {
    let resp = catalog_service::create_water(state, staff, water_request(name)).await?;
    resp.data.ok_or_else(|| anyhow::anyhow!("water missing from response"))
}
