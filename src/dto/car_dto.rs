use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::{CarWithManufacturer, Driver, Manufacturer};
use crate::utils::validation::validate_not_blank;

// Formulario de búsqueda de cars (?model=)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CarSearchForm {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub model: String,
}

impl CarSearchForm {
    pub fn search_term(&self) -> Option<&str> {
        super::search_term(&self.model)
    }
}

// Formulario para crear o actualizar un car.
// manufacturer y drivers llegan sin tipar: un valor que no es un id
// es un error de campo al limpiar el formulario.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CarForm {
    #[serde(default)]
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub model: String,

    #[validate(required)]
    pub manufacturer: Option<Value>,

    #[serde(default)]
    pub drivers: Value,
}

/// Interpretar una opción como id: número entero o string numérico
pub fn choice_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Texto de una opción para los mensajes de error
pub fn choice_label(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// CarForm con los ids ya resueltos a registros
#[derive(Debug, Clone)]
pub struct CleanedCarForm {
    pub model: String,
    pub manufacturer: Manufacturer,
    pub drivers: Vec<Driver>,
}

// Car con su manufacturer, para listados
#[derive(Debug, Clone, Serialize)]
pub struct CarListItem {
    pub id: i64,
    pub model: String,
    pub manufacturer: Manufacturer,
    pub absolute_url: String,
}

impl From<CarWithManufacturer> for CarListItem {
    fn from(row: CarWithManufacturer) -> Self {
        let (car, manufacturer) = row.into_parts();
        Self {
            absolute_url: car.absolute_url(),
            id: car.id,
            model: car.model,
            manufacturer,
        }
    }
}

// Contexto de la vista car-list
#[derive(Debug, Serialize)]
pub struct CarListResponse {
    pub car_list: Vec<CarListItem>,
    pub search_form: CarSearchForm,
}

// Contexto de la vista car-detail
#[derive(Debug, Clone, Serialize)]
pub struct CarDetailResponse {
    pub id: i64,
    pub model: String,
    pub manufacturer: Manufacturer,
    pub drivers: Vec<Driver>,
}

// Resultado de toggle-car-assign
#[derive(Debug, Serialize)]
pub struct ToggleAssignResponse {
    pub assigned: bool,
    pub car: CarDetailResponse,
}
