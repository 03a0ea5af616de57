use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::driver_dto::{
    DriverCreationForm, DriverDetailResponse, DriverLicenseUpdateForm, DriverListResponse,
    DriverSearchForm,
};
use crate::models::Driver;
use crate::repositories::{CarRepository, DriverRepository, NewDriver};
use crate::services::auth_service::hash_password;
use crate::utils::errors::{conflict_error, not_found_error, AppError};

pub struct DriverController {
    drivers: DriverRepository,
    cars: CarRepository,
    password_hash_cost: u32,
}

impl DriverController {
    pub fn new(pool: SqlitePool, password_hash_cost: u32) -> Self {
        Self {
            drivers: DriverRepository::new(pool.clone()),
            cars: CarRepository::new(pool),
            password_hash_cost,
        }
    }

    pub async fn list(&self, search_form: DriverSearchForm) -> Result<DriverListResponse, AppError> {
        search_form.validate()?;

        let driver_list = self.drivers.list(search_form.search_term()).await?;

        Ok(DriverListResponse {
            driver_list,
            search_form,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> Result<DriverDetailResponse, AppError> {
        let driver = self
            .drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))?;

        let cars = self
            .cars
            .list_by_driver(driver.id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(DriverDetailResponse {
            absolute_url: driver.absolute_url(),
            driver,
            cars,
        })
    }

    pub async fn create(
        &self,
        form: DriverCreationForm,
    ) -> Result<ApiResponse<Driver>, AppError> {
        form.validate()?;

        if self.drivers.username_exists(&form.username).await? {
            return Err(conflict_error("Driver", "username", &form.username));
        }

        if self
            .drivers
            .license_number_exists(&form.license_number, None)
            .await?
        {
            return Err(conflict_error(
                "Driver",
                "license number",
                &form.license_number,
            ));
        }

        let password_hash = hash_password(form.password1, self.password_hash_cost).await?;

        let driver = self
            .drivers
            .create(NewDriver {
                username: form.username,
                password_hash,
                first_name: form.first_name.trim().to_string(),
                last_name: form.last_name.trim().to_string(),
                license_number: Some(form.license_number),
            })
            .await?;

        info!("👤 Driver creado: {}", driver);
        Ok(ApiResponse::success_with_message(
            driver,
            "Driver created successfully",
        ))
    }

    pub async fn update_license(
        &self,
        id: i64,
        form: DriverLicenseUpdateForm,
    ) -> Result<ApiResponse<Driver>, AppError> {
        form.validate()?;

        if self
            .drivers
            .license_number_exists(&form.license_number, Some(id))
            .await?
        {
            return Err(conflict_error(
                "Driver",
                "license number",
                &form.license_number,
            ));
        }

        let driver = self
            .drivers
            .update_license_number(id, &form.license_number)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))?;

        Ok(ApiResponse::success_with_message(
            driver,
            "License number updated successfully",
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.drivers.delete(id).await? {
            return Err(not_found_error("Driver", id));
        }

        info!("🗑️ Driver {} eliminado", id);
        Ok(())
    }
}
