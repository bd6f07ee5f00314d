use std::fmt;

use crate::features::regions::resolver::SelectionResolver;

pub const PROVINCE_PLACEHOLDER: &str = "시/도 선택";
pub const DISTRICT_PLACEHOLDER: &str = "군/구 선택";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// One dropdown: a placeholder entry (value `""`) followed by `options`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectControl {
    pub placeholder: &'static str,
    pub options: Vec<SelectOption>,
    pub selected: String,
    pub disabled: bool,
}

impl SelectControl {
    /// Label shown for the current value
    pub fn selected_label(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.value == self.selected)
            .map(|o| o.label.as_str())
            .unwrap_or(self.placeholder)
    }
}

/// User interaction with the selector, forwarded to the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorInput {
    ProvinceChanged(String),
    DistrictChanged(String),
}

/// Province and district dropdowns rendered from the resolver's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorView {
    pub province: SelectControl,
    pub district: SelectControl,
}

impl SelectorView {
    pub fn render(resolver: &SelectionResolver) -> Self {
        let selection = resolver.selection();

        let province = SelectControl {
            placeholder: PROVINCE_PLACEHOLDER,
            options: resolver
                .provinces()
                .iter()
                .map(|p| SelectOption {
                    value: p.code.clone(),
                    label: p.name.clone(),
                })
                .collect(),
            selected: selection.province_code.clone(),
            disabled: resolver.is_disposed(),
        };

        // Disabled until a province with at least one loaded district is selected
        let district = SelectControl {
            placeholder: DISTRICT_PLACEHOLDER,
            options: resolver
                .districts()
                .iter()
                .map(|d| SelectOption {
                    value: d.code.clone(),
                    label: d.name.clone(),
                })
                .collect(),
            selected: selection.district_code.clone(),
            disabled: selection.province_code.is_empty() || resolver.districts().is_empty(),
        };

        Self { province, district }
    }
}

impl fmt::Display for SelectControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.selected_label())?;
        if self.disabled {
            write!(f, " (disabled)")?;
        }
        for option in &self.options {
            let marker = if option.value == self.selected { '*' } else { ' ' };
            write!(f, "\n  {} {} ({})", marker, option.label, option.value)?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.province)?;
        write!(f, "{}", self.district)
    }
}
