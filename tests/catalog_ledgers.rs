mod common;

use common::dec;
use sea_orm::{EntityTrait, PaginatorTrait};
use water_store::{
    dto::{
        catalog::{CreateWaterRequest, UpdateWaterRequest},
        ledger::{CreateTradeRequest, CreateWarehouseRequest, UpdateWarehouseRequest},
    },
    entity::{MeasureUnit, Trades, Warehouses, Waters},
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{LedgerQuery, WaterQuery},
    services::{
        account_service::{self, UserFields},
        catalog_service, inventory_service, trade_service,
    },
};

#[tokio::test]
async fn water_defaults_to_available_litres() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (staff, auth) = common::create_staff(&state, "998901230001").await?;

    let payload: CreateWaterRequest = serde_json::from_value(serde_json::json!({
        "name": "Bonaqua 1.5",
        "price": "4500",
        "volume": "1.5",
        "description": "<p>Still water</p>"
    }))?;
    let water = catalog_service::create_water(&state, &auth, payload)
        .await?
        .data
        .expect("water");

    assert!(water.available);
    assert_eq!(water.unit, MeasureUnit::Litre);
    assert_eq!(water.image, None);
    assert_eq!(water.price, dec("4500.00"));
    assert_eq!(water.volume, dec("1.50"));
    assert_eq!(water.audit.created_by, staff.id);
    assert_eq!(water.audit.last_updated_by, staff.id);
    assert_eq!(water.to_string(), "Bonaqua 1.5");
    Ok(())
}

#[tokio::test]
async fn out_of_range_amounts_are_rejected_without_writing() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (_, auth) = common::create_staff(&state, "998901230002").await?;

    let mut too_big = common::water_request("Too big");
    too_big.price = dec("1000000");
    assert!(matches!(
        catalog_service::create_water(&state, &auth, too_big).await,
        Err(AppError::Validation(_))
    ));

    let mut too_precise = common::water_request("Too precise");
    too_precise.volume = dec("1.505");
    assert!(matches!(
        catalog_service::create_water(&state, &auth, too_precise).await,
        Err(AppError::Validation(_))
    ));

    let mut unnamed = common::water_request("");
    unnamed.name = String::new();
    assert!(matches!(
        catalog_service::create_water(&state, &auth, unnamed).await,
        Err(AppError::Validation(_))
    ));

    assert_eq!(Waters::find().count(&state.orm).await?, 0);

    let water = common::create_water(&state, &auth, "Nestle").await?;
    let stock = inventory_service::add_stock(
        &state,
        &auth,
        CreateWarehouseRequest {
            water_id: water.id,
            quantity: dec("12345678"),
            unit: MeasureUnit::Piece,
        },
    )
    .await;
    assert!(matches!(stock, Err(AppError::Validation(_))));
    assert_eq!(Warehouses::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn only_staff_write_the_catalog() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let customer = account_service::create_user(
        &state,
        "998901230003",
        None,
        Some("customer-pass"),
        UserFields::default(),
    )
    .await?;
    let auth = AuthUser {
        user_id: customer.id,
        is_staff: false,
        is_superuser: false,
    };

    assert!(matches!(
        catalog_service::create_water(&state, &auth, common::water_request("Nope")).await,
        Err(AppError::Forbidden)
    ));
    Ok(())
}

#[tokio::test]
async fn update_refreshes_only_the_last_updated_half() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (creator, creator_auth) = common::create_staff(&state, "998901230004").await?;
    let (editor, editor_auth) = common::create_staff(&state, "998901230005").await?;

    let water = common::create_water(&state, &creator_auth, "Hydrolife 5").await?;
    let updated = catalog_service::update_water(
        &state,
        &editor_auth,
        water.id,
        UpdateWaterRequest {
            available: Some(false),
            price: Some(dec("9500.5")),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("water");

    assert!(!updated.available);
    assert_eq!(updated.price, dec("9500.50"));
    assert_eq!(updated.name, "Hydrolife 5");
    assert_eq!(updated.audit.created_by, creator.id);
    assert_eq!(updated.audit.created_time, water.audit.created_time);
    assert_eq!(updated.audit.last_updated_by, editor.id);
    assert!(updated.audit.last_updated_time >= water.audit.last_updated_time);

    let missing = catalog_service::update_water(&state, &editor_auth, 9999, UpdateWaterRequest::default()).await;
    assert!(matches!(missing, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn list_filters_by_name_prefix_and_availability() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (_, auth) = common::create_staff(&state, "998901230006").await?;

    for name in ["Hydrolife 0.5", "Hydrolife 19", "Bonaqua 1"] {
        common::create_water(&state, &auth, name).await?;
    }
    let mut hidden = common::water_request("Hydrolife old");
    hidden.available = Some(false);
    catalog_service::create_water(&state, &auth, hidden).await?;

    let resp = catalog_service::list_waters(
        &state,
        WaterQuery {
            q: Some("Hydro".into()),
            available: Some(true),
            ..Default::default()
        },
    )
    .await?;
    let names: Vec<_> = resp.data.expect("list").items.into_iter().map(|w| w.name).collect();
    assert_eq!(names, ["Hydrolife 0.5", "Hydrolife 19"]);
    assert_eq!(resp.meta.and_then(|m| m.total), Some(2));
    Ok(())
}

#[tokio::test]
async fn stock_rows_are_independent_lots() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (_, auth) = common::create_staff(&state, "998901230007").await?;
    let water = common::create_water(&state, &auth, "Nestle Pure Life").await?;
    let other = common::create_water(&state, &auth, "Bonaqua").await?;

    for quantity in ["120", "30.5"] {
        inventory_service::add_stock(
            &state,
            &auth,
            CreateWarehouseRequest {
                water_id: water.id,
                quantity: dec(quantity),
                unit: MeasureUnit::Piece,
            },
        )
        .await?;
    }
    inventory_service::add_stock(
        &state,
        &auth,
        CreateWarehouseRequest {
            water_id: other.id,
            quantity: dec("7"),
            unit: MeasureUnit::Piece,
        },
    )
    .await?;

    let rows = inventory_service::list_stock(
        &state,
        LedgerQuery {
            water_id: Some(water.id),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("rows")
    .items;

    let rendered: Vec<_> = rows.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        ["Nestle Pure Life - 120.00 pcs", "Nestle Pure Life - 30.50 pcs"]
    );

    let updated = inventory_service::update_stock(
        &state,
        &auth,
        rows[1].id,
        UpdateWarehouseRequest {
            quantity: Some(dec("31")),
            unit: Some(MeasureUnit::Litre),
        },
    )
    .await?
    .data
    .expect("row");
    assert_eq!(updated.to_string(), "Nestle Pure Life - 31.00 l");

    let unknown = inventory_service::add_stock(
        &state,
        &auth,
        CreateWarehouseRequest {
            water_id: 4242,
            quantity: dec("1"),
            unit: MeasureUnit::Piece,
        },
    )
    .await;
    assert!(matches!(unknown, Err(AppError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn trades_render_with_currency_and_list_newest_first() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (_, auth) = common::create_staff(&state, "998901230008").await?;
    let water = common::create_water(&state, &auth, "Hydrolife 19").await?;

    let payload: CreateTradeRequest = serde_json::from_value(serde_json::json!({
        "water_id": water.id,
        "quantity": "2",
        "price": "36000"
    }))?;
    let first = trade_service::record_trade(&state, &auth, payload)
        .await?
        .data
        .expect("trade");
    assert_eq!(first.unit, MeasureUnit::Piece);
    assert_eq!(first.to_string(), "Hydrolife 19 - 2.00 pcs - 36000.00 UZS");

    let second = trade_service::record_trade(
        &state,
        &auth,
        CreateTradeRequest {
            water_id: water.id,
            quantity: dec("1"),
            price: dec("18000"),
            unit: MeasureUnit::Piece,
        },
    )
    .await?
    .data
    .expect("trade");

    let listed: Vec<_> = trade_service::list_trades(&state, LedgerQuery::default())
        .await?
        .data
        .expect("trades")
        .items
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(listed, [second.id, first.id]);
    Ok(())
}

#[tokio::test]
async fn deleting_water_removes_its_ledgers() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (_, auth) = common::create_staff(&state, "998901230009").await?;
    let water = common::create_water(&state, &auth, "Hydrolife 1.5").await?;

    inventory_service::add_stock(
        &state,
        &auth,
        CreateWarehouseRequest {
            water_id: water.id,
            quantity: dec("50"),
            unit: MeasureUnit::Piece,
        },
    )
    .await?;
    trade_service::record_trade(
        &state,
        &auth,
        CreateTradeRequest {
            water_id: water.id,
            quantity: dec("5"),
            price: dec("22500"),
            unit: MeasureUnit::Piece,
        },
    )
    .await?;

    catalog_service::delete_water(&state, &auth, water.id).await?;

    assert_eq!(Warehouses::find().count(&state.orm).await?, 0);
    assert_eq!(Trades::find().count(&state.orm).await?, 0);
    assert!(matches!(
        catalog_service::get_water(&state, water.id).await,
        Err(AppError::NotFound)
    ));
    Ok(())
}

#[tokio::test]
async fn deleting_a_user_removes_records_they_own() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (staff, staff_auth) = common::create_staff(&state, "998901230010").await?;
    let (_, keeper_auth) = common::create_staff(&state, "998901230011").await?;

    let owned = common::create_water(&state, &staff_auth, "Owned").await?;
    let kept = common::create_water(&state, &keeper_auth, "Kept").await?;
    inventory_service::add_stock(
        &state,
        &keeper_auth,
        CreateWarehouseRequest {
            water_id: owned.id,
            quantity: dec("3"),
            unit: MeasureUnit::Piece,
        },
    )
    .await?;

    let root = AuthUser {
        user_id: 0,
        is_staff: true,
        is_superuser: true,
    };
    account_service::delete_user(&state, &root, staff.id).await?;

    let remaining: Vec<_> = Waters::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|w| w.id)
        .collect();
    assert_eq!(remaining, [kept.id]);
    // The stock row belonged to the deleted water, so it went too.
    assert_eq!(Warehouses::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn ledger_rows_need_an_existing_creator() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (_, auth) = common::create_staff(&state, "998901230012").await?;
    let water = common::create_water(&state, &auth, "Hydrolife").await?;

    let ghost = AuthUser {
        user_id: 777,
        is_staff: true,
        is_superuser: false,
    };
    let result = inventory_service::add_stock(
        &state,
        &ghost,
        CreateWarehouseRequest {
            water_id: water.id,
            quantity: dec("1"),
            unit: MeasureUnit::Piece,
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(Warehouses::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn rejected_image_update_leaves_no_file_behind() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let (_, auth) = common::create_staff(&state, "998901230013").await?;
    let water = common::create_water(&state, &auth, "Hydrolife 0.5").await?;

    let ghost = AuthUser {
        user_id: 777,
        is_staff: true,
        is_superuser: false,
    };
    let result = catalog_service::set_water_image(&state, &ghost, water.id, "bottle.png", b"png").await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let dir = state
        .config
        .media_root
        .join("products")
        .join(chrono::Utc::now().format("%Y/%m/%d").to_string());
    let leftover = std::fs::read_dir(&dir).map(|entries| entries.count()).unwrap_or(0);
    assert_eq!(leftover, 0);
    assert_eq!(catalog_service::find_water(&state, water.id).await?.image, None);

    let stored = catalog_service::set_water_image(&state, &auth, water.id, "bottle.png", b"png")
        .await?
        .data
        .expect("water");
    assert!(stored.image.as_deref().is_some_and(|p| p.ends_with("/bottle.png")));

    let _ = std::fs::remove_dir_all(&state.config.media_root);
    Ok(())
}
