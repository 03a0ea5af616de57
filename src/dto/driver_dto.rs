use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Driver;
use crate::utils::validation::{license_number_rule, USERNAME_REGEX};

use super::car_dto::CarListItem;

// Formulario de búsqueda de drivers (?username=)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DriverSearchForm {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub username: String,
}

impl DriverSearchForm {
    pub fn search_term(&self) -> Option<&str> {
        super::search_term(&self.username)
    }
}

// Formulario de alta de conductor
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DriverCreationForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 150), regex = "USERNAME_REGEX")]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 8), must_match = "password2")]
    pub password1: String,

    #[serde(default)]
    pub password2: String,

    #[serde(default)]
    #[validate(custom = "license_number_rule")]
    pub license_number: String,

    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
}

// Formulario de actualización del número de licencia
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DriverLicenseUpdateForm {
    #[serde(default)]
    #[validate(custom = "license_number_rule")]
    pub license_number: String,
}

// Contexto de la vista driver-list
#[derive(Debug, Serialize)]
pub struct DriverListResponse {
    pub driver_list: Vec<Driver>,
    pub search_form: DriverSearchForm,
}

// Contexto de la vista driver-detail
#[derive(Debug, Serialize)]
pub struct DriverDetailResponse {
    pub driver: Driver,
    pub absolute_url: String,
    pub cars: Vec<CarListItem>,
}
