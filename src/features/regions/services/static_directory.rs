use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;

use crate::features::regions::error::{RegionError, RegionResult};
use crate::features::regions::models::{Province, Region};
use crate::features::regions::services::RegionDirectory;
use crate::shared::validation::REGION_CODE_REGEX;

/// In-memory region directory.
///
/// The table is validated once at construction, so lookups never have to deal
/// with dangling parents or duplicate codes.
#[derive(Debug, Clone)]
pub struct StaticRegionDirectory {
    provinces: Vec<Region>,
    districts: HashMap<String, Vec<Region>>,
    index: HashMap<String, Region>,
    latency: Duration,
}

impl StaticRegionDirectory {
    /// Build a directory from a flat list of regions in insertion order.
    ///
    /// Rejects empty or malformed codes, duplicate codes, districts whose
    /// parent is missing, and districts parented by another district.
    pub fn from_regions(regions: impl IntoIterator<Item = Region>) -> RegionResult<Self> {
        let regions: Vec<Region> = regions.into_iter().collect();

        let mut seen = HashSet::new();
        for region in &regions {
            if !REGION_CODE_REGEX.is_match(&region.code) {
                return Err(RegionError::InvalidDirectory(format!(
                    "Invalid region code '{}'",
                    region.code
                )));
            }
            if !seen.insert(region.code.as_str()) {
                return Err(RegionError::InvalidDirectory(format!(
                    "Duplicate region code '{}'",
                    region.code
                )));
            }
        }

        let province_codes: HashSet<&str> = regions
            .iter()
            .filter(|r| r.is_province())
            .map(|r| r.code.as_str())
            .collect();

        let mut provinces = Vec::new();
        let mut districts: HashMap<String, Vec<Region>> = HashMap::new();
        let mut index = HashMap::with_capacity(regions.len());

        for region in &regions {
            match region.parent_code.as_deref() {
                None => {
                    provinces.push(region.clone());
                    districts.entry(region.code.clone()).or_default();
                }
                Some(parent) if parent == region.code => {
                    return Err(RegionError::InvalidDirectory(format!(
                        "Region '{}' is its own parent",
                        region.code
                    )));
                }
                Some(parent) if !province_codes.contains(parent) => {
                    return Err(RegionError::InvalidDirectory(format!(
                        "District '{}' references unknown province '{}'",
                        region.code, parent
                    )));
                }
                Some(parent) => {
                    districts
                        .entry(parent.to_string())
                        .or_default()
                        .push(region.clone());
                }
            }
            index.insert(region.code.clone(), region.clone());
        }

        Ok(Self {
            provinces,
            districts,
            index,
            latency: Duration::ZERO,
        })
    }

    pub fn from_provinces(provinces: impl IntoIterator<Item = Province>) -> RegionResult<Self> {
        let regions = provinces.into_iter().flat_map(|province| {
            let head = province.to_region();
            std::iter::once(head).chain(province.districts.into_iter().map(Region::from))
        });
        Self::from_regions(regions)
    }

    /// Built-in sample table of Korean provinces and districts
    pub fn korea_sample() -> Self {
        let provinces = vec![
            Province::new("SEOUL", "서울특별시")
                .with_district("SEOUL-GANGNAM", "강남구")
                .with_district("SEOUL-GANGDONG", "강동구")
                .with_district("SEOUL-MAPO", "마포구")
                .with_district("SEOUL-JUNGGU", "중구"),
            Province::new("Gyeonggi-DO", "경기도")
                .with_district("Gyeonggi-Suwon", "수원시")
                .with_district("Gyeonggi-Yongin", "용인시")
                .with_district("Gyeonggi-Seongnam", "성남시"),
            Province::new("Busan", "부산광역시")
                .with_district("Busan-Haeundae", "해운대구")
                .with_district("Busan-Busanjin", "부산진구"),
            Province::new("Jeju-DO", "제주특별자치도")
                .with_district("Jeju-JejuSi", "제주시")
                .with_district("Jeju-SeogwipoSi", "서귀포시"),
        ];

        Self::from_provinces(provinces).expect("Built-in region table must be valid")
    }

    /// Delay every lookup, mimicking a remote directory
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl RegionDirectory for StaticRegionDirectory {
    async fn list_provinces(&self) -> RegionResult<Vec<Region>> {
        self.simulate_latency().await;
        Ok(self.provinces.clone())
    }

    async fn list_districts(&self, province_code: &str) -> RegionResult<Vec<Region>> {
        self.simulate_latency().await;
        self.districts.get(province_code).cloned().ok_or_else(|| {
            RegionError::NotFound(format!("Province not found for code: {}", province_code))
        })
    }

    async fn resolve(&self, code: &str) -> RegionResult<Region> {
        self.simulate_latency().await;
        self.index
            .get(code)
            .cloned()
            .ok_or_else(|| RegionError::NotFound(format!("Region not found for code: {}", code)))
    }
}
