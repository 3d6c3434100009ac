//! Client (building / customer) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Client record. Owns zero or more equipment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: i32,
    pub nombre: String,
    /// Postal address of the site
    pub direccion: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Short client representation for selectors
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClientShort {
    pub id: i32,
    pub nombre: String,
}

/// Create client request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClient {
    #[validate(length(min = 1, max = 100, message = "nombre is required (max 100 characters)"))]
    pub nombre: String,
    #[validate(length(max = 200, message = "direccion is limited to 200 characters"))]
    pub direccion: Option<String>,
}

/// Client selection query (`?cliente_id=`)
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientFilter {
    /// Empty or non-numeric values select every client
    #[serde(default, deserialize_with = "lenient_id")]
    pub cliente_id: Option<i32>,
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}
