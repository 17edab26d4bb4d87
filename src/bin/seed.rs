use chrono::{Days, NaiveDate};
use rand::{Rng, seq::SliceRandom};
use repair_shop_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        customers::CustomerInput,
        repair_orders::{RepairOrderInput, SetServicesRequest},
        services::ServiceInput,
        vehicles::VehicleInput,
    },
    entity::{Customers, RepairOrderServices, RepairOrders, RepairStatus, Services, Vehicles},
    services::{catalog_service, customer_service, repair_order_service, vehicle_service},
    state::AppState,
};
use sea_orm::EntityTrait;
use uuid::Uuid;

const MAKES: [&str; 5] = ["Toyota", "Nissan", "Ford", "Chevrolet", "BMW"];
const MODELS: [&str; 5] = ["Corolla", "Versa", "Focus", "Cruze", "X5"];
const CATALOG: [(&str, i64); 10] = [
    ("Oil Change", 35000),
    ("General Inspection", 60000),
    ("Brake Replacement", 120000),
    ("Wheel Alignment", 45000),
    ("Wheel Balancing", 30000),
    ("Tire Replacement", 200000),
    ("Engine Diagnostics", 80000),
    ("Electrical Repair", 150000),
    ("Battery Replacement", 70000),
    ("Detailed Wash", 40000),
];
const STATUSES: [RepairStatus; 3] = [
    RepairStatus::Received,
    RepairStatus::InProgress,
    RepairStatus::Completed,
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    let state = AppState::new(orm);

    clear(&state).await?;
    let vehicles = seed_customers_and_vehicles(&state).await?;
    let services = seed_services(&state).await?;
    seed_repair_orders(&state, &vehicles, &services).await?;

    println!("Sample data generated");
    Ok(())
}

async fn clear(state: &AppState) -> anyhow::Result<()> {
    RepairOrderServices::delete_many().exec(&state.orm).await?;
    RepairOrders::delete_many().exec(&state.orm).await?;
    Vehicles::delete_many().exec(&state.orm).await?;
    Customers::delete_many().exec(&state.orm).await?;
    Services::delete_many().exec(&state.orm).await?;
    println!("Existing data removed");
    Ok(())
}

async fn seed_customers_and_vehicles(state: &AppState) -> anyhow::Result<Vec<Uuid>> {
    let mut vehicles = Vec::with_capacity(10);
    for i in 1..=10 {
        // Drop the generator before awaiting; it is not Send.
        let (phone, make, model, year) = {
            let mut rng = rand::thread_rng();
            (
                format!("9{}", rng.gen_range(10_000_000..=99_999_999)),
                *MAKES.choose(&mut rng).unwrap_or(&MAKES[0]),
                *MODELS.choose(&mut rng).unwrap_or(&MODELS[0]),
                rng.gen_range(2010..=2023),
            )
        };

        let customer = customer_service::create_customer(
            state,
            CustomerInput {
                first_name: format!("Cliente{i}"),
                last_name: format!("Apellido{i}"),
                phone,
                email: (i % 2 == 0).then(|| format!("cliente{i}@example.com")),
            },
        )
        .await?
        .into_data()
        .ok_or_else(|| anyhow::anyhow!("customer {i} was not returned"))?;

        let vehicle = vehicle_service::create_vehicle(
            state,
            VehicleInput {
                plate: format!("PAT{i:02}00"),
                make: make.to_string(),
                model: model.to_string(),
                year: Some(year),
                owner_id: Some(customer.id),
            },
        )
        .await?
        .into_data()
        .ok_or_else(|| anyhow::anyhow!("vehicle {i} was not returned"))?;
        vehicles.push(vehicle.id);
    }
    println!("10 customers and 10 vehicles generated");
    Ok(vehicles)
}

async fn seed_services(state: &AppState) -> anyhow::Result<Vec<Uuid>> {
    let mut services = Vec::with_capacity(CATALOG.len());
    for (name, price) in CATALOG {
        let service = catalog_service::create_service(
            state,
            ServiceInput {
                name: name.to_string(),
                price: Some(price),
            },
        )
        .await?
        .into_data()
        .ok_or_else(|| anyhow::anyhow!("service {name} was not returned"))?;
        services.push(service.id);
    }
    println!("{} services generated", services.len());
    Ok(services)
}

async fn seed_repair_orders(
    state: &AppState,
    vehicles: &[Uuid],
    services: &[Uuid],
) -> anyhow::Result<()> {
    let first_entry = NaiveDate::from_ymd_opt(2025, 9, 1)
        .ok_or_else(|| anyhow::anyhow!("invalid base date"))?;

    for i in 0..10u64 {
        let entry_date = first_entry + Days::new(i);
        let (vehicle_id, status, exit_date, service_ids) = {
            let mut rng = rand::thread_rng();
            let vehicle_id = *vehicles
                .choose(&mut rng)
                .ok_or_else(|| anyhow::anyhow!("no vehicles to attach orders to"))?;
            let status = *STATUSES.choose(&mut rng).unwrap_or(&RepairStatus::Received);
            let exit_date = (status == RepairStatus::Completed)
                .then(|| entry_date + Days::new(rng.gen_range(1..=7)));
            let count = rng.gen_range(1..=3);
            let service_ids: Vec<Uuid> =
                services.choose_multiple(&mut rng, count).copied().collect();
            (vehicle_id, status, exit_date, service_ids)
        };

        let order = repair_order_service::create_repair_order(
            state,
            RepairOrderInput {
                vehicle_id: Some(vehicle_id),
                service_ids: Vec::new(),
                entry_date: Some(entry_date),
                exit_date,
                status: Some(status),
            },
        )
        .await?
        .into_data()
        .ok_or_else(|| anyhow::anyhow!("repair order {i} was not returned"))?;

        repair_order_service::set_services(state, order.id, SetServicesRequest { service_ids })
            .await?;
    }
    println!("10 repair orders generated");
    Ok(())
}
