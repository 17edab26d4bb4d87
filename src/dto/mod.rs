pub mod customers;
pub mod repair_orders;
pub mod services;
pub mod vehicles;
