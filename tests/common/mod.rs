#![allow(dead_code)]

use chrono::NaiveDate;
use repair_shop_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        customers::CustomerInput, repair_orders::RepairOrderInput, services::ServiceInput,
        vehicles::VehicleInput,
    },
    entity::RepairStatus,
    models::{Customer, RepairOrder, Service, Vehicle},
    services::{catalog_service, customer_service, repair_order_service, vehicle_service},
    state::AppState,
};
use uuid::Uuid;

/// Fresh in-memory database with the schema applied.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn create_customer(
    state: &AppState,
    first: &str,
    last: &str,
) -> anyhow::Result<Customer> {
    let resp = customer_service::create_customer(
        state,
        CustomerInput {
            first_name: first.into(),
            last_name: last.into(),
            phone: "123456789".into(),
            email: None,
        },
    )
    .await?;
    Ok(resp.data.expect("customer data"))
}

pub async fn create_vehicle(
    state: &AppState,
    plate: &str,
    owner_id: Uuid,
) -> anyhow::Result<Vehicle> {
    let resp = vehicle_service::create_vehicle(state, vehicle_input(plate, owner_id)).await?;
    Ok(resp.data.expect("vehicle data"))
}

pub fn vehicle_input(plate: &str, owner_id: Uuid) -> VehicleInput {
    VehicleInput {
        plate: plate.into(),
        make: "Toyota".into(),
        model: "Corolla".into(),
        year: Some(2020),
        owner_id: Some(owner_id),
    }
}

pub async fn create_service(state: &AppState, name: &str, price: i64) -> anyhow::Result<Service> {
    let resp = catalog_service::create_service(
        state,
        ServiceInput {
            name: name.into(),
            price: Some(price),
        },
    )
    .await?;
    Ok(resp.data.expect("service data"))
}

pub async fn create_order(
    state: &AppState,
    vehicle_id: Uuid,
    service_ids: Vec<Uuid>,
    entry_date: NaiveDate,
) -> anyhow::Result<RepairOrder> {
    let resp = repair_order_service::create_repair_order(
        state,
        RepairOrderInput {
            vehicle_id: Some(vehicle_id),
            service_ids,
            entry_date: Some(entry_date),
            exit_date: None,
            status: Some(RepairStatus::Received),
        },
    )
    .await?;
    Ok(resp.data.expect("repair order data"))
}
