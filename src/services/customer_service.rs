use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::customers::{CustomerInput, CustomerList},
    entity::{
        customers::{ActiveModel, Column, Entity as Customers, Model as CustomerModel},
        vehicles::{Column as VehicleCol, Entity as Vehicles},
    },
    error::{AppError, AppResult},
    models::Customer,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::repair_order_service::delete_orders_for_vehicles,
    state::AppState,
    validation::validate_customer,
};

/// Customers ordered by last name, then first name.
pub async fn list_customers(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CustomerList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Customers::find()
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(customer_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Customers",
        CustomerList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_customer(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Customer>> {
    let customer = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(customer_from_entity)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Customer", customer, None))
}

pub async fn create_customer(
    state: &AppState,
    payload: CustomerInput,
) -> AppResult<ApiResponse<Customer>> {
    let valid = validate_customer(payload).map_err(AppError::Validation)?;

    let customer = ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(valid.first_name),
        last_name: Set(valid.last_name),
        phone: Set(valid.phone),
        email: Set(valid.email),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(customer_id = %customer.id, "customer created");

    Ok(ApiResponse::success(
        "Customer created",
        customer_from_entity(customer),
        Some(Meta::empty()),
    ))
}

pub async fn update_customer(
    state: &AppState,
    id: Uuid,
    payload: CustomerInput,
) -> AppResult<ApiResponse<Customer>> {
    let existing = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let valid = validate_customer(payload).map_err(AppError::Validation)?;

    let mut active: ActiveModel = existing.into();
    active.first_name = Set(valid.first_name);
    active.last_name = Set(valid.last_name);
    active.phone = Set(valid.phone);
    active.email = Set(valid.email);
    let customer = active.update(&state.orm).await?;

    tracing::info!(customer_id = %customer.id, "customer updated");

    Ok(ApiResponse::success(
        "Updated",
        customer_from_entity(customer),
        Some(Meta::empty()),
    ))
}

/// Deletes the customer together with its vehicles and their repair orders.
pub async fn delete_customer(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    if Customers::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let vehicle_ids: Vec<Uuid> = Vehicles::find()
        .select_only()
        .column(VehicleCol::Id)
        .filter(VehicleCol::OwnerId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;

    let orders_deleted = delete_orders_for_vehicles(&txn, &vehicle_ids).await?;
    let vehicles_deleted = if vehicle_ids.is_empty() {
        0
    } else {
        Vehicles::delete_many()
            .filter(VehicleCol::Id.is_in(vehicle_ids))
            .exec(&txn)
            .await?
            .rows_affected
    };
    Customers::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        customer_id = %id,
        vehicles_deleted,
        orders_deleted,
        "customer deleted"
    );

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({
            "vehicles_deleted": vehicles_deleted,
            "repair_orders_deleted": orders_deleted,
        }),
        Some(Meta::empty()),
    ))
}

fn customer_from_entity(model: CustomerModel) -> Customer {
    Customer {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        phone: model.phone,
        email: model.email,
    }
}
