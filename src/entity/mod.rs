pub mod customers;
pub mod repair_order_services;
pub mod repair_orders;
pub mod services;
pub mod vehicles;

pub use customers::Entity as Customers;
pub use repair_order_services::Entity as RepairOrderServices;
pub use repair_orders::{Entity as RepairOrders, RepairStatus};
pub use services::Entity as Services;
pub use vehicles::Entity as Vehicles;
