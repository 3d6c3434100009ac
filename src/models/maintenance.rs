//! Maintenance event model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Maintenance log entry. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Maintenance {
    pub id: i32,
    pub equipo_id: i32,
    /// Civil time of the event in the configured time zone
    pub fecha: NaiveDateTime,
    pub descripcion: String,
    /// Display name of whoever logged the event (snapshot, not a reference)
    pub usuario: String,
}

/// Create maintenance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenance {
    pub equipo_id: i32,
    #[validate(length(min = 1, message = "descripcion is required"))]
    pub descripcion: String,
}

impl CreateMaintenance {
    /// Trim the description so a blank one fails validation
    pub fn normalize(&mut self) {
        self.descripcion = self.descripcion.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_description_rejected() {
        let mut data = CreateMaintenance {
            equipo_id: 1,
            descripcion: "   ".to_string(),
        };
        data.normalize();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_description_is_trimmed() {
        let mut data = CreateMaintenance {
            equipo_id: 1,
            descripcion: "  Limpieza de filtros\n".to_string(),
        };
        data.normalize();
        assert!(data.validate().is_ok());
        assert_eq!(data.descripcion, "Limpieza de filtros");
    }
}
