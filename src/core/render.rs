use crate::models::CompanyProfile;
use std::fmt;

pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";
pub const EMPTY_LIST_PLACEHOLDER: &str = "None found";

/// One labelled field of a rendered profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: &'static str,
    pub values: Vec<String>,
    /// True when `values` holds the placeholder rather than real data
    pub placeholder: bool,
}

impl FieldView {
    fn text(label: &'static str, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => Self {
                label,
                values: vec![v.to_string()],
                placeholder: false,
            },
            None => Self {
                label,
                values: vec![UNKNOWN_PLACEHOLDER.to_string()],
                placeholder: true,
            },
        }
    }

    fn list(label: &'static str, items: &[String]) -> Self {
        let values: Vec<String> = items
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .map(str::to_string)
            .collect();

        if values.is_empty() {
            Self {
                label,
                values: vec![EMPTY_LIST_PLACEHOLDER.to_string()],
                placeholder: true,
            }
        } else {
            Self {
                label,
                values,
                placeholder: false,
            }
        }
    }
}

/// Placeholder-aware view of a [`CompanyProfile`]
///
/// Every field renders to at least one value, so the view never shows an
/// empty slot, `null` or `undefined`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub fields: Vec<FieldView>,
}

impl ProfileView {
    pub fn field(&self, label: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.label == label)
    }
}

impl From<&CompanyProfile> for ProfileView {
    fn from(profile: &CompanyProfile) -> Self {
        Self {
            fields: vec![
                FieldView::text("Company name", profile.company_name.as_deref()),
                FieldView::text("Description", profile.company_description.as_deref()),
                FieldView::list("Service lines", &profile.service_lines),
                FieldView::list("Tier 1 keywords", &profile.tier1_keywords),
                FieldView::list("Tier 2 keywords", &profile.tier2_keywords),
                FieldView::list("Emails", &profile.emails),
                FieldView::list("Point of contact", &profile.point_of_contact),
            ],
        }
    }
}

impl fmt::Display for ProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            if field.values.len() == 1 {
                writeln!(f, "{}: {}", field.label, field.values[0])?;
            } else {
                writeln!(f, "{}:", field.label)?;
                for value in &field.values {
                    writeln!(f, "  - {}", value)?;
                }
            }
        }
        Ok(())
    }
}
