use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::manufacturer_dto::{
    ManufacturerForm, ManufacturerListResponse, ManufacturerSearchForm,
};
use crate::models::Manufacturer;
use crate::repositories::ManufacturerRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct ManufacturerController {
    repository: ManufacturerRepository,
}

impl ManufacturerController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: ManufacturerRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        search_form: ManufacturerSearchForm,
    ) -> Result<ManufacturerListResponse, AppError> {
        search_form.validate()?;

        let manufacturer_list = self.repository.list(search_form.search_term()).await?;

        Ok(ManufacturerListResponse {
            manufacturer_list,
            search_form,
        })
    }

    pub async fn create(
        &self,
        form: ManufacturerForm,
    ) -> Result<ApiResponse<Manufacturer>, AppError> {
        form.validate()?;

        let manufacturer = self
            .repository
            .create(form.name.trim(), form.country.trim())
            .await?;

        info!("🏭 Manufacturer creado: {}", manufacturer);
        Ok(ApiResponse::success_with_message(
            manufacturer,
            "Manufacturer created successfully",
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        form: ManufacturerForm,
    ) -> Result<ApiResponse<Manufacturer>, AppError> {
        form.validate()?;

        let manufacturer = self
            .repository
            .update(id, form.name.trim(), form.country.trim())
            .await?
            .ok_or_else(|| not_found_error("Manufacturer", id))?;

        Ok(ApiResponse::success_with_message(
            manufacturer,
            "Manufacturer updated successfully",
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Manufacturer", id));
        }

        info!("🗑️ Manufacturer {} eliminado", id);
        Ok(())
    }
}
