//! Pure input validation.
//!
//! Each `validate_*` function normalizes a form payload (trimming text, treating
//! a blank email as absent) and either returns a record ready to persist or the
//! complete list of field errors. Nothing here touches the database; uniqueness
//! and reference checks belong to the services.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    dto::{
        customers::CustomerInput, repair_orders::RepairOrderInput, services::ServiceInput,
        vehicles::VehicleInput,
    },
    entity::RepairStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, "required", format!("{field} is required"))
    }
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("this field is required".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidCustomer {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidVehicle {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidService {
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidRepairOrder {
    pub vehicle_id: Uuid,
    pub service_ids: Vec<Uuid>,
    pub entry_date: NaiveDate,
    pub exit_date: Option<NaiveDate>,
    pub status: RepairStatus,
}

pub fn validate_customer(input: CustomerInput) -> Result<ValidCustomer, Vec<FieldError>> {
    let input = CustomerInput {
        first_name: input.first_name.trim().to_string(),
        last_name: input.last_name.trim().to_string(),
        phone: input.phone.trim().to_string(),
        email: non_blank(input.email),
    };
    let errors = collect(input.validate());
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidCustomer {
        first_name: input.first_name,
        last_name: input.last_name,
        phone: input.phone,
        email: input.email,
    })
}

pub fn validate_vehicle(input: VehicleInput) -> Result<ValidVehicle, Vec<FieldError>> {
    let input = VehicleInput {
        plate: input.plate.trim().to_string(),
        make: input.make.trim().to_string(),
        model: input.model.trim().to_string(),
        ..input
    };
    let mut errors = collect(input.validate());
    let year = require(input.year, "year", &mut errors);
    let owner_id = require(input.owner_id, "owner_id", &mut errors);

    match (year, owner_id) {
        (Some(year), Some(owner_id)) if errors.is_empty() => Ok(ValidVehicle {
            plate: input.plate,
            make: input.make,
            model: input.model,
            year,
            owner_id,
        }),
        _ => Err(sorted(errors)),
    }
}

pub fn validate_service(input: ServiceInput) -> Result<ValidService, Vec<FieldError>> {
    let input = ServiceInput {
        name: input.name.trim().to_string(),
        ..input
    };
    let mut errors = collect(input.validate());
    let price = require(input.price, "price", &mut errors);

    match price {
        Some(price) if errors.is_empty() => Ok(ValidService {
            name: input.name,
            price,
        }),
        _ => Err(sorted(errors)),
    }
}

/// Status defaults to `received`; exit date and status are not cross-checked.
pub fn validate_repair_order(input: RepairOrderInput) -> Result<ValidRepairOrder, Vec<FieldError>> {
    let mut errors = Vec::new();
    let vehicle_id = require(input.vehicle_id, "vehicle_id", &mut errors);
    let entry_date = require(input.entry_date, "entry_date", &mut errors);

    match (vehicle_id, entry_date) {
        (Some(vehicle_id), Some(entry_date)) => Ok(ValidRepairOrder {
            vehicle_id,
            service_ids: dedup_ids(input.service_ids),
            entry_date,
            exit_date: input.exit_date,
            status: input.status.unwrap_or_default(),
        }),
        _ => Err(sorted(errors)),
    }
}

/// Collapse a list of ids into a set, keeping first-seen order.
pub fn dedup_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require<T>(value: Option<T>, field: &str, errors: &mut Vec<FieldError>) -> Option<T> {
    if value.is_none() {
        errors.push(FieldError::required(field));
    }
    value
}

fn collect(result: Result<(), ValidationErrors>) -> Vec<FieldError> {
    let Err(errors) = result else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| default_message(&err.code, &field));
            out.push(FieldError::new(&field, &err.code, message));
        }
    }
    sorted(out)
}

fn default_message(code: &str, field: &str) -> String {
    match code {
        "email" => format!("{field} must be a valid email address"),
        "length" => format!("{field} is too long"),
        "range" => format!("{field} is out of range"),
        _ => format!("{field} is invalid"),
    }
}

fn sorted(mut errors: Vec<FieldError>) -> Vec<FieldError> {
    errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    errors
}
