use crate::features::regions::models::{District, Region};

/// Province (시/도) with its districts in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Province {
    pub code: String,
    pub name: String,
    pub districts: Vec<District>,
}

impl Province {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            districts: Vec::new(),
        }
    }

    /// Append a district owned by this province
    pub fn with_district(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        let district = District {
            code: code.into(),
            name: name.into(),
            parent_code: self.code.clone(),
        };
        self.districts.push(district);
        self
    }

    /// The province itself as a directory entry, districts omitted
    pub fn to_region(&self) -> Region {
        Region::province(self.code.clone(), self.name.clone())
    }
}
