//! Equipment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

/// Operating status of an asset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EquipmentStatus {
    #[default]
    Operativo,
    Falla,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Operativo => "Operativo",
            EquipmentStatus::Falla => "Falla",
        }
    }

    pub fn is_faulty(&self) -> bool {
        *self == EquipmentStatus::Falla
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Operativo" => Ok(EquipmentStatus::Operativo),
            "Falla" => Ok(EquipmentStatus::Falla),
            _ => Err(format!("Invalid equipment status: {}", s)),
        }
    }
}

// Stored as TEXT, constrained by a CHECK in the schema
impl sqlx::Type<Postgres> for EquipmentStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for EquipmentStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as Decode<Postgres>>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for EquipmentStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Owning client
    pub cliente_id: i32,
    pub nombre: String,
    /// Category tag (printer, UPS, air conditioner...)
    pub tipo: String,
    /// Globally unique serial code
    pub serial: String,
    pub ubicacion: String,
    pub estado: EquipmentStatus,
    pub observaciones: Option<String>,
    /// Embedded photo as a `data:image/...;base64,` URL
    pub foto: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    pub cliente_id: i32,
    #[validate(length(min = 1, max = 100, message = "nombre is required (max 100 characters)"))]
    pub nombre: String,
    #[validate(length(min = 1, max = 50, message = "tipo is required (max 50 characters)"))]
    pub tipo: String,
    #[validate(length(min = 1, max = 50, message = "serial is required (max 50 characters)"))]
    pub serial: String,
    #[validate(length(max = 100, message = "ubicacion is limited to 100 characters"))]
    pub ubicacion: String,
    #[validate(length(max = 300, message = "observaciones is limited to 300 characters"))]
    pub observaciones: Option<String>,
    pub foto: Option<String>,
}

/// Update equipment request. Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    pub cliente_id: Option<i32>,
    #[validate(length(min = 1, max = 100, message = "nombre cannot be empty (max 100 characters)"))]
    pub nombre: Option<String>,
    #[validate(length(min = 1, max = 50, message = "tipo cannot be empty (max 50 characters)"))]
    pub tipo: Option<String>,
    #[validate(length(min = 1, max = 50, message = "serial cannot be empty (max 50 characters)"))]
    pub serial: Option<String>,
    #[validate(length(max = 100, message = "ubicacion is limited to 100 characters"))]
    pub ubicacion: Option<String>,
    pub estado: Option<EquipmentStatus>,
    #[validate(length(max = 300, message = "observaciones is limited to 300 characters"))]
    pub observaciones: Option<String>,
    pub foto: Option<String>,
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

impl CreateEquipment {
    /// Trim text fields so blank values fail validation
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.nombre);
        trim_in_place(&mut self.tipo);
        trim_in_place(&mut self.serial);
        trim_in_place(&mut self.ubicacion);
        if let Some(obs) = self.observaciones.as_mut() {
            trim_in_place(obs);
        }
    }
}

impl UpdateEquipment {
    /// Trim supplied text fields so blank values fail validation
    pub fn normalize(&mut self) {
        for field in [
            &mut self.nombre,
            &mut self.tipo,
            &mut self.serial,
            &mut self.ubicacion,
            &mut self.observaciones,
        ] {
            if let Some(value) = field.as_mut() {
                trim_in_place(value);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cliente_id.is_none()
            && self.nombre.is_none()
            && self.tipo.is_none()
            && self.serial.is_none()
            && self.ubicacion.is_none()
            && self.estado.is_none()
            && self.observaciones.is_none()
            && self.foto.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_value(EquipmentStatus::Falla).unwrap(), json!("Falla"));
        let parsed: EquipmentStatus = serde_json::from_value(json!("Operativo")).unwrap();
        assert_eq!(parsed, EquipmentStatus::Operativo);
        assert!("Roto".parse::<EquipmentStatus>().is_err());
    }

    #[test]
    fn test_create_requires_fields() {
        let missing = serde_json::from_value::<CreateEquipment>(json!({
            "cliente_id": 1,
            "nombre": "UPS",
            "tipo": "Energia"
        }));
        assert!(missing.is_err());
    }

    #[test]
    fn test_create_rejects_empty_serial() {
        let data: CreateEquipment = serde_json::from_value(json!({
            "cliente_id": 1,
            "nombre": "UPS",
            "tipo": "Energia",
            "serial": "",
            "ubicacion": "Piso 3"
        }))
        .unwrap();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let mut data: CreateEquipment = serde_json::from_value(json!({
            "cliente_id": 1,
            "nombre": "  ",
            "tipo": " ",
            "serial": " ",
            "ubicacion": "Piso 3"
        }))
        .unwrap();
        data.normalize();
        let errors = data.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("nombre"));
        assert!(fields.contains_key("tipo"));
        assert!(fields.contains_key("serial"));
    }

    #[test]
    fn test_create_trims_serial() {
        let mut data: CreateEquipment = serde_json::from_value(json!({
            "cliente_id": 1,
            "nombre": " UPS ",
            "tipo": "Energia",
            "serial": " AC-1 ",
            "ubicacion": " Piso 3"
        }))
        .unwrap();
        data.normalize();
        assert!(data.validate().is_ok());
        assert_eq!(data.serial, "AC-1");
        assert_eq!(data.nombre, "UPS");
        assert_eq!(data.ubicacion, "Piso 3");
    }

    #[test]
    fn test_update_rejects_blank_serial() {
        let mut data: UpdateEquipment =
            serde_json::from_value(json!({ "serial": "   ", "nombre": " Aire " })).unwrap();
        data.normalize();
        assert_eq!(data.nombre.as_deref(), Some("Aire"));
        assert!(data.validate().unwrap_err().field_errors().contains_key("serial"));
    }

    #[test]
    fn test_partial_update_leaves_fields_unset() {
        let data: UpdateEquipment = serde_json::from_value(json!({ "nombre": "X" })).unwrap();
        assert_eq!(data.nombre.as_deref(), Some("X"));
        assert!(data.observaciones.is_none());
        assert!(data.estado.is_none());
        assert!(!data.is_empty());
        assert!(UpdateEquipment::default().is_empty());
    }
}
