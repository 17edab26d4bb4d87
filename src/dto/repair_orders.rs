use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{entity::RepairStatus, models::RepairOrder};

/// Repair order form payload. `total_amount` is never accepted from clients.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RepairOrderInput {
    pub vehicle_id: Option<Uuid>,
    pub service_ids: Vec<Uuid>,
    pub entry_date: Option<NaiveDate>,
    pub exit_date: Option<NaiveDate>,
    pub status: Option<RepairStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SetServicesRequest {
    #[serde(default)]
    pub service_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RepairOrderList {
    pub items: Vec<RepairOrder>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderTotal {
    pub id: Uuid,
    pub total_amount: i64,
}
