//! Modelo de Manufacturer

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Manufacturer - mapea a la tabla manufacturers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
    pub country: String,
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manufacturer_display() {
        let manufacturer = Manufacturer {
            id: 1,
            name: "Toyota".to_string(),
            country: "Japan".to_string(),
        };
        assert_eq!(manufacturer.to_string(), "Toyota Japan");
    }
}
