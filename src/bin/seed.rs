use std::{str::FromStr, sync::Arc};

use rust_decimal::Decimal;
use sea_orm::{EntityTrait, PaginatorTrait};
use water_store::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{catalog::CreateWaterRequest, ledger::CreateWarehouseRequest},
    entity::{MeasureUnit, Waters},
    hashing::Argon2Hashing,
    middleware::auth::AuthUser,
    models::User,
    services::{account_service, catalog_service, inventory_service},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let state = AppState::new(orm, config, Arc::new(Argon2Hashing));

    let phone = std::env::var("SUPERUSER_PHONE").unwrap_or_else(|_| "998901234567".to_string());
    let password = std::env::var("SUPERUSER_PASSWORD").unwrap_or_else(|_| "admin-water-123".to_string());
    let email = std::env::var("SUPERUSER_EMAIL").ok();

    let admin = account_service::ensure_superuser(&state, &phone, email.as_deref(), &password).await?;
    println!("Superuser {phone} ready");
    seed_waters(&state, &admin).await?;

    println!("Seed completed. Superuser ID: {}", admin.id);
    Ok(())
}

async fn seed_waters(state: &AppState, admin: &User) -> anyhow::Result<()> {
    if Waters::find().count(&state.orm).await? > 0 {
        println!("Catalog already seeded");
        return Ok(());
    }

    let actor = AuthUser {
        user_id: admin.id,
        is_staff: admin.is_staff,
        is_superuser: admin.is_superuser,
    };
    let waters = [
        ("Hydrolife 0.5", "2500", "0.5", "240"),
        ("Hydrolife 1.5", "4500", "1.5", "180"),
        ("Hydrolife 5", "9000", "5", "60"),
        ("Hydrolife 19", "18000", "19", "35"),
    ];

    for (name, price, volume, stock) in waters {
        let water = catalog_service::create_water(
            state,
            &actor,
            CreateWaterRequest {
                name: name.to_string(),
                price: Decimal::from_str(price)?,
                unit: MeasureUnit::Litre,
                description: format!("<p>{name} drinking water</p>"),
                available: None,
                volume: Decimal::from_str(volume)?,
            },
        )
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("water was not returned"))?;

        inventory_service::add_stock(
            state,
            &actor,
            CreateWarehouseRequest {
                water_id: water.id,
                quantity: Decimal::from_str(stock)?,
                unit: MeasureUnit::Piece,
            },
        )
        .await?;
    }

    println!("Seeded waters");
    Ok(())
}
