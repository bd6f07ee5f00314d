use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::AppError;
use crate::core::http::ApiClient;
use crate::features::regions::dtos::RegionResponseDto;
use crate::features::regions::error::{RegionError, RegionResult};
use crate::features::regions::models::Region;
use crate::features::regions::services::RegionDirectory;

/// Region directory served by the travel-note API
pub struct HttpRegionDirectory {
    api: Arc<ApiClient>,
}

impl HttpRegionDirectory {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    async fn fetch_list(&self, path: &str, missing: &str) -> RegionResult<Vec<Region>> {
        let regions: Vec<RegionResponseDto> = self
            .api
            .get_json(path)
            .await
            .map_err(|e| into_region_error(e, missing))?;
        Ok(regions.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl RegionDirectory for HttpRegionDirectory {
    async fn list_provinces(&self) -> RegionResult<Vec<Region>> {
        tracing::debug!("Fetching provinces from {}", self.api.base_url());
        self.fetch_list("/regions/provinces", "Province list not found")
            .await
    }

    async fn list_districts(&self, province_code: &str) -> RegionResult<Vec<Region>> {
        let path = format!(
            "/regions/provinces/{}/districts",
            urlencoding::encode(province_code)
        );
        tracing::debug!("Fetching districts for province {}", province_code);

        let districts = self
            .fetch_list(
                &path,
                &format!("Province not found for code: {}", province_code),
            )
            .await?;

        // Districts sent without a parent still belong to the requested province
        Ok(districts
            .into_iter()
            .map(|mut district| {
                district
                    .parent_code
                    .get_or_insert_with(|| province_code.to_string());
                district
            })
            .collect())
    }

    async fn resolve(&self, code: &str) -> RegionResult<Region> {
        let path = format!("/regions/{}", urlencoding::encode(code));
        tracing::debug!("Resolving region code {}", code);

        let region: RegionResponseDto = self.api.get_json(&path).await.map_err(|e| {
            into_region_error(e, &format!("Region not found for code: {}", code))
        })?;
        Ok(region.into())
    }
}

fn into_region_error(error: AppError, missing: &str) -> RegionError {
    match error {
        AppError::NotFound(_) => RegionError::NotFound(missing.to_string()),
        other => {
            tracing::warn!("Region directory request failed: {}", other);
            RegionError::Unavailable(other.to_string())
        }
    }
}
