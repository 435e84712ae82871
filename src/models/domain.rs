use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Structured business profile returned by the analyze endpoint
///
/// Every field is optional at the producer boundary. Text fields are omitted
/// from the JSON when absent and list fields default to empty, so a bare `{}`
/// decodes into a valid (empty) profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_description: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub service_lines: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub tier1_keywords: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub tier2_keywords: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub emails: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub point_of_contact: Vec<String>,
}

impl CompanyProfile {
    /// True when no field carries any information
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.company_description.is_none()
            && self.service_lines.is_empty()
            && self.tier1_keywords.is_empty()
            && self.tier2_keywords.is_empty()
            && self.emails.is_empty()
            && self.point_of_contact.is_empty()
    }
}

/// Accepts `null`, a bare string or a list of strings and always yields a list.
///
/// A bare string becomes a single entry (blank strings become an empty list);
/// anything else is a decode error.
pub fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<StringOrList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(StringOrList::One(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
        Some(StringOrList::Many(items)) => items,
    })
}

/// Loosely-typed profile as produced by the analysis collaborator
///
/// Field values may be strings, lists, numbers or null; they are coerced into
/// a [`CompanyProfile`] by [`crate::core::normalize_profile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProfile(pub Map<String, Value>);

impl RawProfile {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Set a field, replacing any previous value
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Build from any JSON value; non-objects become an empty profile
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_decodes_to_empty_profile() {
        let profile: CompanyProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.is_empty());
    }

    #[test]
    fn test_point_of_contact_shape_invariance() {
        let scalar: CompanyProfile =
            serde_json::from_str(r#"{"point_of_contact": "Jane Doe"}"#).unwrap();
        let list: CompanyProfile =
            serde_json::from_str(r#"{"point_of_contact": ["Jane Doe"]}"#).unwrap();
        assert_eq!(scalar, list);
        assert_eq!(scalar.point_of_contact, vec!["Jane Doe".to_string()]);
    }

    #[test]
    fn test_null_lists_default_to_empty() {
        let profile: CompanyProfile =
            serde_json::from_str(r#"{"emails": null, "service_lines": ""}"#).unwrap();
        assert!(profile.emails.is_empty());
        assert!(profile.service_lines.is_empty());
    }

    #[test]
    fn test_non_string_list_items_rejected() {
        let result: Result<CompanyProfile, _> = serde_json::from_str(r#"{"emails": [1, 2]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_absent_text_fields_are_omitted() {
        let json = serde_json::to_value(CompanyProfile::default()).unwrap();
        assert!(json.get("company_name").is_none());
        assert_eq!(json["point_of_contact"], serde_json::json!([]));
    }

    #[test]
    fn test_raw_profile_from_non_object() {
        assert_eq!(RawProfile::from_value(Value::Null), RawProfile::new());
    }
}
