pub mod chart;
pub mod crypto;
pub mod holding;
pub mod price;
pub mod settings;
pub mod tax;
pub mod transaction;
