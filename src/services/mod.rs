pub mod catalog_service;
pub mod customer_service;
pub mod repair_order_service;
pub mod vehicle_service;
