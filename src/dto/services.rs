use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{models::Service, validation::not_blank};

/// Ten whole digits, the widest price the catalog accepts.
pub const MAX_PRICE: i64 = 9_999_999_999;

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct ServiceInput {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    #[validate(range(
        min = 0,
        max = MAX_PRICE,
        message = "price must be between 0 and 9999999999"
    ))]
    pub price: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceList {
    pub items: Vec<Service>,
}
