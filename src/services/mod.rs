pub mod account_service;
pub mod catalog_service;
pub mod inventory_service;
pub mod page_service;
pub mod trade_service;
