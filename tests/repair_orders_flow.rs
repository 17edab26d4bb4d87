mod common;

use common::{create_customer, create_order, create_service, create_vehicle, date, setup_state};
use repair_shop_api::{
    dto::{
        repair_orders::{RepairOrderInput, SetServicesRequest},
        services::{MAX_PRICE, ServiceInput},
    },
    entity::{
        RepairOrderServices, RepairOrders, RepairStatus, Services, Vehicles,
        repair_orders::Column as OrderCol, services::ActiveModel as ServiceRow,
        vehicles::Column as VehicleCol,
    },
    error::AppError,
    routes::params::RepairOrderListQuery,
    services::{catalog_service, customer_service, repair_order_service, vehicle_service},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

// Shop flow: customer -> vehicle -> services -> order; edit the service set; delete the customer.
#[tokio::test]
async fn order_total_follows_service_set_and_customer_delete_cascades() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let juan = create_customer(&state, "Juan", "Perez").await?;
    let corolla = create_vehicle(&state, "ABC123", juan.id).await?;
    let oil = create_service(&state, "Oil Change", 35000).await?;
    let brakes = create_service(&state, "Brakes", 120000).await?;

    let order = create_order(
        &state,
        corolla.id,
        vec![oil.id, brakes.id],
        date(2025, 9, 1),
    )
    .await?;
    assert_eq!(order.status, RepairStatus::Received);
    assert_eq!(order.total_amount, 155000);

    let recalculated = repair_order_service::recalculate(&state, order.id)
        .await?
        .data
        .expect("total");
    assert_eq!(recalculated.total_amount, 155000);

    // Drop the brakes.
    let total = repair_order_service::set_services(
        &state,
        order.id,
        SetServicesRequest {
            service_ids: vec![oil.id],
        },
    )
    .await?
    .data
    .expect("total");
    assert_eq!(total.total_amount, 35000);

    let stored = repair_order_service::get_repair_order(&state, order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(stored.service_ids, vec![oil.id]);
    assert_eq!(stored.total_amount, 35000);

    // A second vehicle with the same plate is rejected.
    let duplicate =
        vehicle_service::create_vehicle(&state, common::vehicle_input("ABC123", juan.id)).await;
    match duplicate {
        Err(AppError::UniquenessViolation(err)) => assert_eq!(err.field, "plate"),
        other => panic!("expected uniqueness violation, got {other:?}"),
    }
    let with_plate = Vehicles::find()
        .filter(VehicleCol::Plate.eq("ABC123"))
        .count(&state.orm)
        .await?;
    assert_eq!(with_plate, 1);

    customer_service::delete_customer(&state, juan.id).await?;

    assert!(Vehicles::find_by_id(corolla.id).one(&state.orm).await?.is_none());
    assert!(RepairOrders::find_by_id(order.id).one(&state.orm).await?.is_none());
    assert_eq!(RepairOrderServices::find().count(&state.orm).await?, 0);
    // Services are not owned by orders.
    assert!(catalog_service::get_service(&state, oil.id).await.is_ok());

    Ok(())
}

#[tokio::test]
async fn empty_service_set_totals_zero_and_recalculation_is_idempotent() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_customer(&state, "Ana", "Rojas").await?;
    let vehicle = create_vehicle(&state, "XYZ987", owner.id).await?;

    let order = create_order(&state, vehicle.id, Vec::new(), date(2025, 9, 2)).await?;
    assert!(order.service_ids.is_empty());
    assert_eq!(order.total_amount, 0);

    let alignment = create_service(&state, "Alignment", 45000).await?;
    let balancing = create_service(&state, "Balancing", 30000).await?;
    repair_order_service::set_services(
        &state,
        order.id,
        SetServicesRequest {
            service_ids: vec![alignment.id, balancing.id, alignment.id],
        },
    )
    .await?;

    let first = repair_order_service::recalculate(&state, order.id).await?.data.expect("total");
    let after_first = repair_order_service::get_repair_order(&state, order.id)
        .await?
        .data
        .expect("order");
    let second = repair_order_service::recalculate(&state, order.id).await?.data.expect("total");
    let after_second = repair_order_service::get_repair_order(&state, order.id)
        .await?
        .data
        .expect("order");

    assert_eq!(first.total_amount, 75000);
    assert_eq!(first.total_amount, second.total_amount);
    assert_eq!(after_first, after_second);
    assert_eq!(after_second.service_ids.len(), 2);
    Ok(())
}

#[tokio::test]
async fn catalog_changes_leave_totals_stale_until_recalculated() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_customer(&state, "Luis", "Soto").await?;
    let vehicle = create_vehicle(&state, "LMN456", owner.id).await?;
    let battery = create_service(&state, "Battery", 70000).await?;
    let wash = create_service(&state, "Wash", 40000).await?;

    let order = create_order(
        &state,
        vehicle.id,
        vec![battery.id, wash.id],
        date(2025, 9, 3),
    )
    .await?;
    assert_eq!(order.total_amount, 110000);

    catalog_service::update_service(
        &state,
        battery.id,
        ServiceInput {
            name: "Battery".into(),
            price: Some(90000),
        },
    )
    .await?;
    let stale = repair_order_service::get_repair_order(&state, order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(stale.total_amount, 110000);

    let fresh = repair_order_service::recalculate(&state, order.id).await?.data.expect("total");
    assert_eq!(fresh.total_amount, 130000);

    // Deleting a service detaches it but keeps the recorded total.
    catalog_service::delete_service(&state, wash.id).await?;
    let detached = repair_order_service::get_repair_order(&state, order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(detached.service_ids, vec![battery.id]);
    assert_eq!(detached.total_amount, 130000);

    let fresh = repair_order_service::recalculate(&state, order.id).await?.data.expect("total");
    assert_eq!(fresh.total_amount, 90000);
    Ok(())
}

#[tokio::test]
async fn duplicate_service_name_is_rejected_without_writing() -> anyhow::Result<()> {
    let state = setup_state().await?;
    create_service(&state, "Oil Change", 35000).await?;

    let err = catalog_service::create_service(
        &state,
        ServiceInput {
            name: "Oil Change".into(),
            price: Some(1),
        },
    )
    .await
    .expect_err("duplicate name");
    assert!(matches!(err, AppError::UniquenessViolation(ref e) if e.field == "name"));

    let listed = catalog_service::list_services(&state, Default::default())
        .await?
        .data
        .expect("services");
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].price, 35000);

    // Names are compared exactly.
    create_service(&state, "oil change", 20000).await?;
    Ok(())
}

#[tokio::test]
async fn updating_a_record_to_its_own_unique_value_is_allowed() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_customer(&state, "Eva", "Diaz").await?;
    let vehicle = create_vehicle(&state, "KEEP01", owner.id).await?;
    let other = create_vehicle(&state, "TAKEN1", owner.id).await?;

    let mut input = common::vehicle_input("KEEP01", owner.id);
    input.year = Some(2021);
    let updated = vehicle_service::update_vehicle(&state, vehicle.id, input)
        .await?
        .data
        .expect("vehicle");
    assert_eq!(updated.year, 2021);

    let err = vehicle_service::update_vehicle(
        &state,
        vehicle.id,
        common::vehicle_input("TAKEN1", owner.id),
    )
    .await
    .expect_err("plate belongs to another vehicle");
    assert!(matches!(err, AppError::UniquenessViolation(_)));

    let untouched = vehicle_service::get_vehicle(&state, other.id).await?.data.expect("vehicle");
    assert_eq!(untouched.plate, "TAKEN1");
    Ok(())
}

#[tokio::test]
async fn dangling_references_are_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let err =
        vehicle_service::create_vehicle(&state, common::vehicle_input("NOPE01", Uuid::new_v4()))
            .await
            .expect_err("unknown owner");
    assert!(matches!(err, AppError::ReferenceViolation(ref e) if e.field == "owner_id"));
    assert_eq!(Vehicles::find().count(&state.orm).await?, 0);

    let owner = create_customer(&state, "Rosa", "Mora").await?;
    let vehicle = create_vehicle(&state, "REF001", owner.id).await?;

    let err = repair_order_service::create_repair_order(
        &state,
        RepairOrderInput {
            vehicle_id: Some(Uuid::new_v4()),
            entry_date: Some(date(2025, 9, 1)),
            ..Default::default()
        },
    )
    .await
    .expect_err("unknown vehicle");
    assert!(matches!(err, AppError::ReferenceViolation(ref e) if e.field == "vehicle_id"));

    let err = repair_order_service::create_repair_order(
        &state,
        RepairOrderInput {
            vehicle_id: Some(vehicle.id),
            service_ids: vec![Uuid::new_v4()],
            entry_date: Some(date(2025, 9, 1)),
            ..Default::default()
        },
    )
    .await
    .expect_err("unknown service");
    assert!(matches!(err, AppError::ReferenceViolation(ref e) if e.field == "service_ids"));
    assert_eq!(RepairOrders::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
async fn repair_orders_are_listed_newest_entry_first() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_customer(&state, "Pia", "Vera").await?;
    let vehicle = create_vehicle(&state, "ORD001", owner.id).await?;

    create_order(&state, vehicle.id, Vec::new(), date(2025, 9, 5)).await?;
    create_order(&state, vehicle.id, Vec::new(), date(2025, 9, 1)).await?;
    create_order(&state, vehicle.id, Vec::new(), date(2025, 9, 10)).await?;

    let listed = repair_order_service::list_repair_orders(&state, RepairOrderListQuery::default())
        .await?
        .data
        .expect("orders");
    let dates: Vec<_> = listed.items.iter().map(|o| o.entry_date).collect();
    assert_eq!(
        dates,
        vec![date(2025, 9, 10), date(2025, 9, 5), date(2025, 9, 1)]
    );
    Ok(())
}

#[tokio::test]
async fn status_moves_freely_and_update_recalculates() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_customer(&state, "Tom", "Lagos").await?;
    let vehicle = create_vehicle(&state, "STS001", owner.id).await?;
    let diagnostics = create_service(&state, "Diagnostics", 80000).await?;
    let order = create_order(&state, vehicle.id, Vec::new(), date(2025, 9, 1)).await?;

    let completed = repair_order_service::update_repair_order(
        &state,
        order.id,
        RepairOrderInput {
            vehicle_id: Some(vehicle.id),
            service_ids: vec![diagnostics.id],
            entry_date: Some(date(2025, 9, 1)),
            exit_date: Some(date(2025, 9, 4)),
            status: Some(RepairStatus::Completed),
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(completed.status, RepairStatus::Completed);
    assert_eq!(completed.total_amount, 80000);

    // Back to received while keeping the exit date.
    let reopened = repair_order_service::update_repair_order(
        &state,
        order.id,
        RepairOrderInput {
            vehicle_id: Some(vehicle.id),
            service_ids: vec![diagnostics.id],
            entry_date: Some(date(2025, 9, 1)),
            exit_date: Some(date(2025, 9, 4)),
            status: Some(RepairStatus::Received),
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(reopened.status, RepairStatus::Received);
    assert_eq!(reopened.exit_date, Some(date(2025, 9, 4)));

    let received = RepairOrders::find()
        .filter(OrderCol::Status.eq(RepairStatus::Received))
        .count(&state.orm)
        .await?;
    assert_eq!(received, 1);
    Ok(())
}

#[tokio::test]
async fn operations_on_missing_records_report_not_found() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let missing = Uuid::new_v4();

    assert!(matches!(
        customer_service::delete_customer(&state, missing).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        vehicle_service::get_vehicle(&state, missing).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        catalog_service::delete_service(&state, missing).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        repair_order_service::recalculate(&state, missing).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        repair_order_service::set_services(&state, missing, SetServicesRequest::default()).await,
        Err(AppError::NotFound)
    ));
    Ok(())
}

#[tokio::test]
async fn deleting_a_vehicle_removes_only_its_orders() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_customer(&state, "Ines", "Paz").await?;
    let first = create_vehicle(&state, "DEL001", owner.id).await?;
    let second = create_vehicle(&state, "DEL002", owner.id).await?;
    let service = create_service(&state, "Inspection", 60000).await?;

    let gone = create_order(&state, first.id, vec![service.id], date(2025, 9, 1)).await?;
    let kept = create_order(&state, second.id, vec![service.id], date(2025, 9, 2)).await?;

    vehicle_service::delete_vehicle(&state, first.id).await?;

    assert!(RepairOrders::find_by_id(gone.id).one(&state.orm).await?.is_none());
    let kept = repair_order_service::get_repair_order(&state, kept.id).await?.data.expect("order");
    assert_eq!(kept.service_ids, vec![service.id]);
    assert!(customer_service::get_customer(&state, owner.id).await.is_ok());
    Ok(())
}

#[tokio::test]
async fn service_price_is_capped_at_ten_digits() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_customer(&state, "Rosa", "Diaz").await?;
    let vehicle = create_vehicle(&state, "MAX001", owner.id).await?;

    let err = catalog_service::create_service(
        &state,
        ServiceInput {
            name: "Engine Swap".into(),
            price: Some(MAX_PRICE + 1),
        },
    )
    .await
    .expect_err("price above the cap");
    assert!(matches!(err, AppError::Validation(ref errs) if errs[0].field == "price"));

    let first = create_service(&state, "Engine Swap", MAX_PRICE).await?;
    let second = create_service(&state, "Gearbox Swap", MAX_PRICE).await?;
    let order = create_order(
        &state,
        vehicle.id,
        vec![first.id, second.id],
        date(2025, 9, 1),
    )
    .await?;
    assert_eq!(order.total_amount, 2 * MAX_PRICE);
    Ok(())
}

#[tokio::test]
async fn totals_that_do_not_fit_are_rejected_and_rolled_back() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_customer(&state, "Rosa", "Diaz").await?;
    let vehicle = create_vehicle(&state, "BIG001", owner.id).await?;

    // Rows written straight to the table skip the form's price cap.
    let mut huge = Vec::new();
    for name in ["Big1", "Big2"] {
        let service = ServiceRow {
            id: Set(Uuid::new_v4()),
            name: Set(name.into()),
            price: Set(i64::MAX),
        }
        .insert(&state.orm)
        .await?;
        huge.push(service.id);
    }

    let err = repair_order_service::create_repair_order(
        &state,
        RepairOrderInput {
            vehicle_id: Some(vehicle.id),
            service_ids: huge.clone(),
            entry_date: Some(date(2025, 9, 1)),
            ..Default::default()
        },
    )
    .await
    .expect_err("sum does not fit");
    assert!(matches!(err, AppError::Validation(ref errs) if errs[0].field == "service_ids"));
    assert_eq!(RepairOrders::find().count(&state.orm).await?, 0);
    assert_eq!(RepairOrderServices::find().count(&state.orm).await?, 0);

    let order = create_order(&state, vehicle.id, vec![huge[0]], date(2025, 9, 2)).await?;
    assert_eq!(order.total_amount, i64::MAX);

    let err = repair_order_service::set_services(
        &state,
        order.id,
        SetServicesRequest {
            service_ids: huge.clone(),
        },
    )
    .await
    .expect_err("sum does not fit");
    assert!(matches!(err, AppError::Validation(_)));

    let kept = repair_order_service::get_repair_order(&state, order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(kept.service_ids, vec![huge[0]]);
    assert_eq!(kept.total_amount, i64::MAX);
    Ok(())
}

#[tokio::test]
async fn plate_and_service_name_uniqueness_is_case_sensitive() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_customer(&state, "Rosa", "Diaz").await?;

    let upper = create_vehicle(&state, "ABC123", owner.id).await?;
    let lower = create_vehicle(&state, "abc123", owner.id).await?;
    assert_ne!(upper.id, lower.id);
    assert_eq!(lower.plate, "abc123");
    assert_eq!(Vehicles::find().count(&state.orm).await?, 2);

    create_service(&state, "Oil Change", 35000).await?;
    create_service(&state, "oil change", 30000).await?;
    assert_eq!(Services::find().count(&state.orm).await?, 2);
    Ok(())
}
