//! Modelo de Car

use std::fmt;

use serde::Serialize;
use sqlx::FromRow;

use super::manufacturer::Manufacturer;

/// Car - mapea a la tabla cars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Car {
    pub id: i64,
    pub model: String,
    pub manufacturer_id: i64,
}

impl Car {
    pub fn absolute_url(&self) -> String {
        format!("/cars/{}", self.id)
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.model)
    }
}

/// Fila de cars unida con su manufacturer (un solo SELECT con JOIN)
#[derive(Debug, Clone, FromRow)]
pub struct CarWithManufacturer {
    pub id: i64,
    pub model: String,
    pub manufacturer_id: i64,
    pub manufacturer_name: String,
    pub manufacturer_country: String,
}

impl CarWithManufacturer {
    pub fn into_parts(self) -> (Car, Manufacturer) {
        (
            Car {
                id: self.id,
                model: self.model,
                manufacturer_id: self.manufacturer_id,
            },
            Manufacturer {
                id: self.manufacturer_id,
                name: self.manufacturer_name,
                country: self.manufacturer_country,
            },
        )
    }
}
