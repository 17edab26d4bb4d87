//! Repair orders and their totals.
//!
//! An order's `total_amount` is the sum of the prices of its services at the
//! moment of the last recalculation. Every operation that changes the service
//! set (create, update, [`set_services`]) recalculates inside the same
//! transaction, so a committed order never carries a total for a service set it
//! no longer has. Later catalog changes (price edits, service deletion) do not
//! touch stored totals until [`recalculate`] is called.

use std::collections::HashMap;

use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::repair_orders::{OrderTotal, RepairOrderInput, RepairOrderList, SetServicesRequest},
    entity::{
        repair_order_services::{
            ActiveModel as LinkActive, Column as LinkCol, Entity as RepairOrderServices,
        },
        repair_orders::{ActiveModel, Column, Entity as RepairOrders, Model as RepairOrderModel},
        services::{Column as ServiceCol, Entity as Services},
        vehicles::Entity as Vehicles,
    },
    error::{AppError, AppResult},
    models::RepairOrder,
    response::{ApiResponse, Meta},
    routes::params::{RepairOrderListQuery, SortOrder},
    state::AppState,
    validation::{FieldError, ValidRepairOrder, dedup_ids, validate_repair_order},
};

/// Orders by entry date, newest first by default.
pub async fn list_repair_orders(
    state: &AppState,
    query: RepairOrderListQuery,
) -> AppResult<ApiResponse<RepairOrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(Column::Status.eq(status));
    }
    if let Some(vehicle_id) = query.vehicle_id {
        condition = condition.add(Column::VehicleId.eq(vehicle_id));
    }

    let mut finder = RepairOrders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(Column::EntryDate),
        SortOrder::Desc => finder.order_by_desc(Column::EntryDate),
    };
    finder = finder.order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let mut services = service_ids_by_order(&state.orm, &order_ids).await?;

    let items = orders
        .into_iter()
        .map(|order| {
            let service_ids = services.remove(&order.id).unwrap_or_default();
            repair_order_from_entity(order, service_ids)
        })
        .collect();

    Ok(ApiResponse::success(
        "Repair orders",
        RepairOrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_repair_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<RepairOrder>> {
    let order = load_order(&state.orm, id).await?;
    Ok(ApiResponse::success("Repair order", order, None))
}

pub async fn create_repair_order(
    state: &AppState,
    payload: RepairOrderInput,
) -> AppResult<ApiResponse<RepairOrder>> {
    let valid = validate_repair_order(payload).map_err(AppError::Validation)?;

    let txn = state.orm.begin().await?;
    check_references(&txn, &valid).await?;

    let order = ActiveModel {
        id: Set(Uuid::new_v4()),
        vehicle_id: Set(valid.vehicle_id),
        entry_date: Set(valid.entry_date),
        exit_date: Set(valid.exit_date),
        status: Set(valid.status),
        total_amount: Set(0),
    }
    .insert(&txn)
    .await
    .map_err(|err| AppError::from_constraint(err, "vehicle_id"))?;

    replace_services(&txn, order.id, &valid.service_ids).await?;
    let total = recalculate_total(&txn, order.id).await?;
    let order = load_order(&txn, order.id).await?;

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        vehicle_id = %order.vehicle_id,
        total,
        "repair order created"
    );

    Ok(ApiResponse::success(
        "Repair order created",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn update_repair_order(
    state: &AppState,
    id: Uuid,
    payload: RepairOrderInput,
) -> AppResult<ApiResponse<RepairOrder>> {
    let txn = state.orm.begin().await?;

    let existing = RepairOrders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let valid = validate_repair_order(payload).map_err(AppError::Validation)?;
    check_references(&txn, &valid).await?;

    let mut active: ActiveModel = existing.into();
    active.vehicle_id = Set(valid.vehicle_id);
    active.entry_date = Set(valid.entry_date);
    active.exit_date = Set(valid.exit_date);
    active.status = Set(valid.status);
    active
        .update(&txn)
        .await
        .map_err(|err| AppError::from_constraint(err, "vehicle_id"))?;

    replace_services(&txn, id, &valid.service_ids).await?;
    let total = recalculate_total(&txn, id).await?;
    let order = load_order(&txn, id).await?;

    txn.commit().await?;

    tracing::info!(order_id = %id, total, "repair order updated");

    Ok(ApiResponse::success("Updated", order, Some(Meta::empty())))
}

pub async fn delete_repair_order(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    if RepairOrders::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound);
    }

    RepairOrderServices::delete_many()
        .filter(LinkCol::RepairOrderId.eq(id))
        .exec(&txn)
        .await?;
    RepairOrders::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(order_id = %id, "repair order deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Replace the order's service set and recalculate its total atomically.
pub async fn set_services(
    state: &AppState,
    id: Uuid,
    payload: SetServicesRequest,
) -> AppResult<ApiResponse<OrderTotal>> {
    let service_ids = dedup_ids(payload.service_ids);

    let txn = state.orm.begin().await?;

    if RepairOrders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }
    ensure_services_exist(&txn, &service_ids).await?;
    replace_services(&txn, id, &service_ids).await?;
    let total_amount = recalculate_total(&txn, id).await?;

    txn.commit().await?;

    tracing::info!(
        order_id = %id,
        services = service_ids.len(),
        total_amount,
        "repair order services set"
    );

    Ok(ApiResponse::success(
        "Services updated",
        OrderTotal { id, total_amount },
        Some(Meta::empty()),
    ))
}

/// Re-derive the order's total from its current services and persist it.
pub async fn recalculate(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderTotal>> {
    let txn = state.orm.begin().await?;
    let total_amount = recalculate_total(&txn, id).await?;
    txn.commit().await?;

    tracing::debug!(order_id = %id, total_amount, "repair order recalculated");

    Ok(ApiResponse::success(
        "Recalculated",
        OrderTotal { id, total_amount },
        Some(Meta::empty()),
    ))
}

/// Sum the prices of the order's current services into `total_amount`.
pub async fn recalculate_total<C>(conn: &C, order_id: Uuid) -> AppResult<i64>
where
    C: ConnectionTrait,
{
    let order = RepairOrders::find_by_id(order_id)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;

    let total = order
        .find_related(Services)
        .all(conn)
        .await?
        .iter()
        .try_fold(0i64, |acc, service| acc.checked_add(service.price))
        .ok_or_else(|| {
            AppError::Validation(vec![FieldError::new(
                "service_ids",
                "total_overflow",
                "order total is out of range",
            )])
        })?;

    let mut active: ActiveModel = order.into();
    active.total_amount = Set(total);
    active.update(conn).await?;

    Ok(total)
}

/// Delete every repair order for the given vehicles, join rows first.
/// Returns the number of orders removed.
pub async fn delete_orders_for_vehicles<C>(conn: &C, vehicle_ids: &[Uuid]) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    if vehicle_ids.is_empty() {
        return Ok(0);
    }

    let order_ids: Vec<Uuid> = RepairOrders::find()
        .select_only()
        .column(Column::Id)
        .filter(Column::VehicleId.is_in(vehicle_ids.to_vec()))
        .into_tuple()
        .all(conn)
        .await?;
    if order_ids.is_empty() {
        return Ok(0);
    }

    RepairOrderServices::delete_many()
        .filter(LinkCol::RepairOrderId.is_in(order_ids.clone()))
        .exec(conn)
        .await?;
    let result = RepairOrders::delete_many()
        .filter(Column::Id.is_in(order_ids))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

async fn check_references<C>(conn: &C, valid: &ValidRepairOrder) -> AppResult<()>
where
    C: ConnectionTrait,
{
    if Vehicles::find_by_id(valid.vehicle_id).one(conn).await?.is_none() {
        return Err(AppError::reference("vehicle_id", "vehicle does not exist"));
    }
    ensure_services_exist(conn, &valid.service_ids).await
}

async fn ensure_services_exist<C>(conn: &C, service_ids: &[Uuid]) -> AppResult<()>
where
    C: ConnectionTrait,
{
    if service_ids.is_empty() {
        return Ok(());
    }

    let found = Services::find()
        .filter(ServiceCol::Id.is_in(service_ids.to_vec()))
        .count(conn)
        .await?;
    if found != service_ids.len() as u64 {
        return Err(AppError::reference(
            "service_ids",
            "one or more services do not exist",
        ));
    }
    Ok(())
}

async fn replace_services<C>(conn: &C, order_id: Uuid, service_ids: &[Uuid]) -> AppResult<()>
where
    C: ConnectionTrait,
{
    RepairOrderServices::delete_many()
        .filter(LinkCol::RepairOrderId.eq(order_id))
        .exec(conn)
        .await?;

    if service_ids.is_empty() {
        return Ok(());
    }

    let links = service_ids.iter().map(|service_id| LinkActive {
        repair_order_id: Set(order_id),
        service_id: Set(*service_id),
    });
    RepairOrderServices::insert_many(links)
        .exec_without_returning(conn)
        .await
        .map_err(|err| AppError::from_constraint(err, "service_ids"))?;

    Ok(())
}

async fn load_order<C>(conn: &C, id: Uuid) -> AppResult<RepairOrder>
where
    C: ConnectionTrait,
{
    let order = RepairOrders::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;
    let service_ids = service_ids_by_order(conn, &[id])
        .await?
        .remove(&id)
        .unwrap_or_default();
    Ok(repair_order_from_entity(order, service_ids))
}

async fn service_ids_by_order<C>(
    conn: &C,
    order_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Uuid>>, DbErr>
where
    C: ConnectionTrait,
{
    let mut grouped: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    if order_ids.is_empty() {
        return Ok(grouped);
    }

    let links = RepairOrderServices::find()
        .filter(LinkCol::RepairOrderId.is_in(order_ids.to_vec()))
        .order_by_asc(LinkCol::ServiceId)
        .all(conn)
        .await?;
    for link in links {
        grouped
            .entry(link.repair_order_id)
            .or_default()
            .push(link.service_id);
    }
    Ok(grouped)
}

fn repair_order_from_entity(model: RepairOrderModel, service_ids: Vec<Uuid>) -> RepairOrder {
    RepairOrder {
        id: model.id,
        vehicle_id: model.vehicle_id,
        service_ids,
        entry_date: model.entry_date,
        exit_date: model.exit_date,
        status: model.status,
        total_amount: model.total_amount,
    }
}
