use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        customers::{CustomerInput, CustomerList},
        repair_orders::{OrderTotal, RepairOrderInput, RepairOrderList, SetServicesRequest},
        services::{ServiceInput, ServiceList},
        vehicles::{VehicleInput, VehicleList},
    },
    entity::RepairStatus,
    error::ErrorData,
    models::{Customer, RepairOrder, Service, Vehicle},
    response::{ApiResponse, Meta},
    routes::{customers, health, params, repair_orders, services, vehicles},
    validation::FieldError,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        services::list_services,
        services::get_service,
        services::create_service,
        services::update_service,
        services::delete_service,
        repair_orders::list_repair_orders,
        repair_orders::get_repair_order,
        repair_orders::create_repair_order,
        repair_orders::update_repair_order,
        repair_orders::delete_repair_order,
        repair_orders::set_services,
        repair_orders::recalculate
    ),
    components(
        schemas(
            Customer,
            Vehicle,
            Service,
            RepairOrder,
            RepairStatus,
            CustomerInput,
            VehicleInput,
            ServiceInput,
            RepairOrderInput,
            SetServicesRequest,
            CustomerList,
            VehicleList,
            ServiceList,
            RepairOrderList,
            OrderTotal,
            FieldError,
            ErrorData,
            params::Pagination,
            params::SortOrder,
            Meta,
            ApiResponse<Customer>,
            ApiResponse<Vehicle>,
            ApiResponse<Service>,
            ApiResponse<RepairOrder>,
            ApiResponse<OrderTotal>,
            ApiResponse<ErrorData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Customers", description = "Shop customers"),
        (name = "Vehicles", description = "Customer vehicles"),
        (name = "Services", description = "Billable service catalog"),
        (name = "Repair orders", description = "Repair orders and their totals"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
