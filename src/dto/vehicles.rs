use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{models::Vehicle, validation::not_blank};

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct VehicleInput {
    #[validate(custom(function = "not_blank"), length(max = 10))]
    pub plate: String,
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub make: String,
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub model: String,
    pub year: Option<i32>,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleList {
    pub items: Vec<Vehicle>,
}
