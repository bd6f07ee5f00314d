use serde::{Deserialize, Serialize};

use crate::features::regions::models::Region;

/// Region as returned by the `/regions` API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionResponseDto {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<String>,
}

impl From<RegionResponseDto> for Region {
    fn from(dto: RegionResponseDto) -> Self {
        Self {
            code: dto.code,
            name: dto.name,
            // Some backends send "" instead of omitting the field for provinces
            parent_code: dto.parent_code.filter(|p| !p.is_empty()),
        }
    }
}

impl From<Region> for RegionResponseDto {
    fn from(region: Region) -> Self {
        Self {
            code: region.code,
            name: region.name,
            parent_code: region.parent_code,
        }
    }
}
