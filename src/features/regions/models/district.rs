use crate::features::regions::models::Region;

/// District (군/구), always scoped to exactly one province
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct District {
    pub code: String,
    pub name: String,
    pub parent_code: String,
}

impl From<District> for Region {
    fn from(district: District) -> Self {
        Region::district(district.code, district.name, district.parent_code)
    }
}
