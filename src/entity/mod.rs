pub mod measure_unit;
pub mod trades;
pub mod users;
pub mod warehouses;
pub mod waters;

pub use measure_unit::MeasureUnit;
pub use trades::Entity as Trades;
pub use users::Entity as Users;
pub use warehouses::Entity as Warehouses;
pub use waters::Entity as Waters;
