use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::vehicles::{VehicleInput, VehicleList},
    entity::{
        customers::Entity as Customers,
        vehicles::{ActiveModel, Column, Entity as Vehicles, Model as VehicleModel},
    },
    error::{AppError, AppResult},
    models::Vehicle,
    response::{ApiResponse, Meta},
    routes::params::VehicleListQuery,
    services::repair_order_service::delete_orders_for_vehicles,
    state::AppState,
    validation::{ValidVehicle, validate_vehicle},
};

/// Vehicles ordered by plate.
pub async fn list_vehicles(
    state: &AppState,
    query: VehicleListQuery,
) -> AppResult<ApiResponse<VehicleList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(owner_id) = query.owner_id {
        condition = condition.add(Column::OwnerId.eq(owner_id));
    }

    let finder = Vehicles::find()
        .filter(condition)
        .order_by_asc(Column::Plate);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(vehicle_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Vehicles",
        VehicleList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_vehicle(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Vehicle>> {
    let vehicle = Vehicles::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(vehicle_from_entity)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Vehicle", vehicle, None))
}

pub async fn create_vehicle(
    state: &AppState,
    payload: VehicleInput,
) -> AppResult<ApiResponse<Vehicle>> {
    let valid = validate_vehicle(payload).map_err(AppError::Validation)?;

    let txn = state.orm.begin().await?;
    check_integrity(&txn, &valid, None).await?;

    let vehicle = ActiveModel {
        id: Set(Uuid::new_v4()),
        plate: Set(valid.plate),
        make: Set(valid.make),
        model: Set(valid.model),
        year: Set(valid.year),
        owner_id: Set(valid.owner_id),
    }
    .insert(&txn)
    .await
    .map_err(|err| AppError::from_constraint(err, "plate"))?;

    txn.commit().await?;

    tracing::info!(vehicle_id = %vehicle.id, plate = %vehicle.plate, "vehicle created");

    Ok(ApiResponse::success(
        "Vehicle created",
        vehicle_from_entity(vehicle),
        Some(Meta::empty()),
    ))
}

pub async fn update_vehicle(
    state: &AppState,
    id: Uuid,
    payload: VehicleInput,
) -> AppResult<ApiResponse<Vehicle>> {
    let txn = state.orm.begin().await?;

    let existing = Vehicles::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let valid = validate_vehicle(payload).map_err(AppError::Validation)?;
    check_integrity(&txn, &valid, Some(id)).await?;

    let mut active: ActiveModel = existing.into();
    active.plate = Set(valid.plate);
    active.make = Set(valid.make);
    active.model = Set(valid.model);
    active.year = Set(valid.year);
    active.owner_id = Set(valid.owner_id);
    let vehicle = active
        .update(&txn)
        .await
        .map_err(|err| AppError::from_constraint(err, "plate"))?;

    txn.commit().await?;

    tracing::info!(vehicle_id = %vehicle.id, "vehicle updated");

    Ok(ApiResponse::success(
        "Updated",
        vehicle_from_entity(vehicle),
        Some(Meta::empty()),
    ))
}

/// Deletes the vehicle and every repair order recorded for it.
pub async fn delete_vehicle(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    if Vehicles::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let orders_deleted = delete_orders_for_vehicles(&txn, &[id]).await?;
    Vehicles::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(vehicle_id = %id, orders_deleted, "vehicle deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "repair_orders_deleted": orders_deleted }),
        Some(Meta::empty()),
    ))
}

/// Owner must exist and the plate must not belong to another vehicle.
async fn check_integrity<C>(conn: &C, valid: &ValidVehicle, current: Option<Uuid>) -> AppResult<()>
where
    C: ConnectionTrait,
{
    if Customers::find_by_id(valid.owner_id).one(conn).await?.is_none() {
        return Err(AppError::reference("owner_id", "owner does not exist"));
    }

    let mut duplicate = Condition::all().add(Column::Plate.eq(valid.plate.as_str()));
    if let Some(id) = current {
        duplicate = duplicate.add(Column::Id.ne(id));
    }
    if Vehicles::find().filter(duplicate).count(conn).await? > 0 {
        return Err(AppError::unique(
            "plate",
            format!("plate {} is already registered", valid.plate),
        ));
    }

    Ok(())
}

fn vehicle_from_entity(model: VehicleModel) -> Vehicle {
    Vehicle {
        id: model.id,
        plate: model.plate,
        make: model.make,
        model: model.model,
        year: model.year,
        owner_id: model.owner_id,
    }
}
