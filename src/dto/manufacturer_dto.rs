use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Manufacturer;
use crate::utils::validation::validate_not_blank;

// Formulario de búsqueda de manufacturers (?name=)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ManufacturerSearchForm {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: String,
}

impl ManufacturerSearchForm {
    pub fn search_term(&self) -> Option<&str> {
        super::search_term(&self.name)
    }
}

// Formulario para crear o actualizar un manufacturer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ManufacturerForm {
    #[serde(default)]
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub country: String,
}

// Contexto de la vista manufacturer-list
#[derive(Debug, Serialize)]
pub struct ManufacturerListResponse {
    pub manufacturer_list: Vec<Manufacturer>,
    pub search_form: ManufacturerSearchForm,
}
