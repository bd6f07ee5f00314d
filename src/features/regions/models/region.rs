use serde::{Deserialize, Serialize};

/// A node of the two-level region directory.
///
/// A region without `parent_code` is a province; one with a parent is a
/// district of that province.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<String>,
}

impl Region {
    pub fn province(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            parent_code: None,
        }
    }

    pub fn district(
        code: impl Into<String>,
        name: impl Into<String>,
        parent_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            parent_code: Some(parent_code.into()),
        }
    }

    pub fn is_province(&self) -> bool {
        self.parent_code.is_none()
    }

    pub fn is_district(&self) -> bool {
        self.parent_code.is_some()
    }

    /// Whether this region is a district of `province_code`
    pub fn belongs_to(&self, province_code: &str) -> bool {
        self.parent_code.as_deref() == Some(province_code)
    }
}
