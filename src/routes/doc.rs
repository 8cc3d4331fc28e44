use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    audit::AuditStamp,
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        catalog::{CreateWaterRequest, UpdateWaterRequest, WaterList},
        ledger::{
            CreateTradeRequest, CreateWarehouseRequest, TradeList, UpdateWarehouseRequest,
            WarehouseList,
        },
        pages::{HomeContext, UploadResponse, WaterWarehouse},
    },
    entity::MeasureUnit,
    models::{Trade, User, Warehouse, Water},
    response::{ApiResponse, Meta},
    routes::{auth, health, pages, params, trades, users, warehouses, waters},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        pages::home_page,
        pages::product_detail,
        pages::tinymce_upload,
        auth::login,
        auth::register,
        users::delete_user,
        waters::list_waters,
        waters::get_water,
        waters::create_water,
        waters::update_water,
        waters::delete_water,
        waters::upload_image,
        warehouses::list_stock,
        warehouses::get_stock,
        warehouses::add_stock,
        warehouses::update_stock,
        warehouses::remove_stock,
        trades::list_trades,
        trades::get_trade,
        trades::record_trade,
        trades::delete_trade
    ),
    components(
        schemas(
            User,
            Water,
            Warehouse,
            Trade,
            AuditStamp,
            MeasureUnit,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateWaterRequest,
            UpdateWaterRequest,
            CreateWarehouseRequest,
            UpdateWarehouseRequest,
            CreateTradeRequest,
            WaterList,
            WarehouseList,
            TradeList,
            HomeContext,
            WaterWarehouse,
            UploadResponse,
            params::Pagination,
            params::WaterQuery,
            params::LedgerQuery,
            Meta,
            ApiResponse<Water>,
            ApiResponse<WaterList>,
            ApiResponse<HomeContext>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Pages", description = "Storefront pages and editor uploads"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Users", description = "Account management"),
        (name = "Waters", description = "Catalog endpoints"),
        (name = "Warehouses", description = "Stock ledger endpoints"),
        (name = "Trades", description = "Sales ledger endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
