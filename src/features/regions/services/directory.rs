use async_trait::async_trait;

use crate::features::regions::error::RegionResult;
use crate::features::regions::models::Region;

/// Read-only access to the province/district directory.
///
/// Implementations fail with `RegionError::NotFound` for unknown codes and
/// `RegionError::Unavailable` when the backing store cannot be reached.
#[async_trait]
pub trait RegionDirectory: Send + Sync {
    /// All provinces in directory order, districts omitted
    async fn list_provinces(&self) -> RegionResult<Vec<Region>>;

    /// Districts of one province in directory order.
    ///
    /// A known province without districts yields an empty list, not an error.
    async fn list_districts(&self, province_code: &str) -> RegionResult<Vec<Region>>;

    /// Look up a code of either level. Callers classify the result by `parent_code`.
    async fn resolve(&self, code: &str) -> RegionResult<Region>;
}
