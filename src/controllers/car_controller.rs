use std::collections::BTreeSet;

use serde_json::Value;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::dto::car_dto::{
    choice_id, choice_label, CarDetailResponse, CarForm, CarListResponse, CarSearchForm,
    CleanedCarForm, ToggleAssignResponse,
};
use crate::dto::common_dto::ApiResponse;
use crate::models::Driver;
use crate::repositories::{CarRepository, DriverRepository, ManufacturerRepository};
use crate::utils::errors::{not_found_error, validation_error, AppError};

fn invalid_driver_choice(label: String) -> AppError {
    validation_error(
        "drivers",
        format!("Select a valid choice. {} is not one of the available choices.", label),
    )
}

pub struct CarController {
    cars: CarRepository,
    manufacturers: ManufacturerRepository,
    drivers: DriverRepository,
}

impl CarController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            cars: CarRepository::new(pool.clone()),
            manufacturers: ManufacturerRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
        }
    }

    pub async fn list(&self, search_form: CarSearchForm) -> Result<CarListResponse, AppError> {
        search_form.validate()?;

        let car_list = self
            .cars
            .list(search_form.search_term())
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(CarListResponse {
            car_list,
            search_form,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> Result<CarDetailResponse, AppError> {
        let (car, manufacturer) = self
            .cars
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", id))?
            .into_parts();

        let drivers = self.drivers.list_by_car(car.id).await?;

        Ok(CarDetailResponse {
            id: car.id,
            model: car.model,
            manufacturer,
            drivers,
        })
    }

    /// Validar el formulario y resolver manufacturer y conductores
    pub async fn clean(&self, form: CarForm) -> Result<CleanedCarForm, AppError> {
        form.validate()?;

        let manufacturer_id = form
            .manufacturer
            .as_ref()
            .ok_or_else(|| validation_error("manufacturer", "This field is required."))?;

        let manufacturer = match choice_id(manufacturer_id) {
            Some(id) => self.manufacturers.find_by_id(id).await?,
            None => None,
        }
        .ok_or_else(|| {
            validation_error(
                "manufacturer",
                "Select a valid choice. That choice is not one of the available choices.",
            )
        })?;

        let choices: &[Value] = match &form.drivers {
            Value::Null => &[],
            Value::Array(values) => values,
            _ => return Err(validation_error("drivers", "Enter a list of values.")),
        };

        let mut requested = BTreeSet::new();
        for choice in choices {
            let id = choice_id(choice)
                .ok_or_else(|| invalid_driver_choice(choice_label(choice)))?;
            requested.insert(id);
        }

        let ids: Vec<i64> = requested.iter().copied().collect();
        let drivers: Vec<Driver> = self.drivers.find_by_ids(&ids).await?;

        if let Some(missing) = requested
            .iter()
            .find(|id| !drivers.iter().any(|driver| driver.id == **id))
        {
            return Err(invalid_driver_choice(missing.to_string()));
        }

        Ok(CleanedCarForm {
            model: form.model.trim().to_string(),
            manufacturer,
            drivers,
        })
    }

    pub async fn create(&self, form: CarForm) -> Result<ApiResponse<CarDetailResponse>, AppError> {
        let cleaned = self.clean(form).await?;
        let driver_ids: Vec<i64> = cleaned.drivers.iter().map(|d| d.id).collect();

        let car = self
            .cars
            .create(&cleaned.model, cleaned.manufacturer.id, &driver_ids)
            .await?;

        info!("🚕 Car creado: {} ({})", car, cleaned.manufacturer);
        Ok(ApiResponse::success_with_message(
            CarDetailResponse {
                id: car.id,
                model: car.model,
                manufacturer: cleaned.manufacturer,
                drivers: cleaned.drivers,
            },
            "Car created successfully",
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        form: CarForm,
    ) -> Result<ApiResponse<CarDetailResponse>, AppError> {
        let cleaned = self.clean(form).await?;
        let driver_ids: Vec<i64> = cleaned.drivers.iter().map(|d| d.id).collect();

        let car = self
            .cars
            .update(id, &cleaned.model, cleaned.manufacturer.id, &driver_ids)
            .await?
            .ok_or_else(|| not_found_error("Car", id))?;

        Ok(ApiResponse::success_with_message(
            CarDetailResponse {
                id: car.id,
                model: car.model,
                manufacturer: cleaned.manufacturer,
                drivers: cleaned.drivers,
            },
            "Car updated successfully",
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.cars.delete(id).await? {
            return Err(not_found_error("Car", id));
        }

        info!("🗑️ Car {} eliminado", id);
        Ok(())
    }

    /// Asignar o quitar al conductor actual del car
    pub async fn toggle_assign(
        &self,
        car_id: i64,
        driver: &Driver,
    ) -> Result<ToggleAssignResponse, AppError> {
        if self.cars.find_by_id(car_id).await?.is_none() {
            return Err(not_found_error("Car", car_id));
        }

        let assigned = self.cars.toggle_driver(car_id, driver.id).await?;
        info!(
            "🔁 {} {} car {}",
            driver.username,
            if assigned { "asignado a" } else { "retirado de" },
            car_id
        );

        Ok(ToggleAssignResponse {
            assigned,
            car: self.get_by_id(car_id).await?,
        })
    }
}
