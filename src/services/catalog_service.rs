use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::services::{ServiceInput, ServiceList},
    entity::{
        repair_order_services::{Column as LinkCol, Entity as RepairOrderServices},
        services::{ActiveModel, Column, Entity as Services, Model as ServiceModel},
    },
    error::{AppError, AppResult},
    models::Service,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
    validation::validate_service,
};

/// Catalog services ordered by name.
pub async fn list_services(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ServiceList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Services::find().order_by_asc(Column::Name);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(service_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Services",
        ServiceList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_service(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Service>> {
    let service = Services::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(service_from_entity)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Service", service, None))
}

pub async fn create_service(
    state: &AppState,
    payload: ServiceInput,
) -> AppResult<ApiResponse<Service>> {
    let valid = validate_service(payload).map_err(AppError::Validation)?;

    let txn = state.orm.begin().await?;
    ensure_unique_name(&txn, &valid.name, None).await?;

    let service = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(valid.name),
        price: Set(valid.price),
    }
    .insert(&txn)
    .await
    .map_err(|err| AppError::from_constraint(err, "name"))?;

    txn.commit().await?;

    tracing::info!(service_id = %service.id, price = service.price, "service created");

    Ok(ApiResponse::success(
        "Service created",
        service_from_entity(service),
        Some(Meta::empty()),
    ))
}

/// Updates name and price. Orders that already include the service keep the
/// total computed at their last recalculation.
pub async fn update_service(
    state: &AppState,
    id: Uuid,
    payload: ServiceInput,
) -> AppResult<ApiResponse<Service>> {
    let txn = state.orm.begin().await?;

    let existing = Services::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let valid = validate_service(payload).map_err(AppError::Validation)?;
    ensure_unique_name(&txn, &valid.name, Some(id)).await?;

    let previous_price = existing.price;
    let mut active: ActiveModel = existing.into();
    active.name = Set(valid.name);
    active.price = Set(valid.price);
    let service = active
        .update(&txn)
        .await
        .map_err(|err| AppError::from_constraint(err, "name"))?;

    txn.commit().await?;

    if previous_price != service.price {
        tracing::debug!(
            service_id = %service.id,
            previous_price,
            price = service.price,
            "service price changed; existing order totals left as recorded"
        );
    }

    Ok(ApiResponse::success(
        "Updated",
        service_from_entity(service),
        Some(Meta::empty()),
    ))
}

/// Removes the service from the catalog and from every order that lists it.
/// The orders themselves, and their stored totals, are left untouched.
pub async fn delete_service(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    if Services::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let detached = RepairOrderServices::delete_many()
        .filter(LinkCol::ServiceId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    Services::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(service_id = %id, orders_detached = detached, "service deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "repair_orders_detached": detached }),
        Some(Meta::empty()),
    ))
}

async fn ensure_unique_name<C>(conn: &C, name: &str, current: Option<Uuid>) -> AppResult<()>
where
    C: ConnectionTrait,
{
    let mut duplicate = Condition::all().add(Column::Name.eq(name));
    if let Some(id) = current {
        duplicate = duplicate.add(Column::Id.ne(id));
    }
    if Services::find().filter(duplicate).count(conn).await? > 0 {
        return Err(AppError::unique(
            "name",
            format!("a service named {name} already exists"),
        ));
    }
    Ok(())
}

fn service_from_entity(model: ServiceModel) -> Service {
    Service {
        id: model.id,
        name: model.name,
        price: model.price,
    }
}
