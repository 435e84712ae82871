use crate::models::{CompanyProfile, RawProfile};
use serde_json::Value;

/// Sentinel the analysis collaborator uses for "could not determine"
pub const UNKNOWN_SENTINEL: &str = "Unknown";

const LIST_BULLETS: &[char] = &['-', '*', '•'];

/// Brackets and quotes left over from list-syntax answers
const LIST_WRAPPERS: &[char] = &['[', ']', '"', '\''];

/// How a string value is split when a list is expected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Split {
    /// Commas and newlines (keyword and service-line answers)
    Items,
    /// Newlines and semicolons only, so "Jane Doe, CEO" stays one entry
    People,
}

impl Split {
    fn is_delimiter(self, c: char) -> bool {
        match self {
            Split::Items => c == ',' || c == '\n' || c == '\r',
            Split::People => c == ';' || c == '\n' || c == '\r',
        }
    }
}

/// Coerce a loosely-typed collaborator payload into a [`CompanyProfile`]
///
/// Missing fields become absent/empty, never null. Strings supplied where a
/// list is expected are split, lists supplied where text is expected are
/// joined, and the `Unknown` sentinel is treated as absent.
pub fn normalize_profile(raw: &RawProfile) -> CompanyProfile {
    CompanyProfile {
        company_name: normalize_text(raw.get("company_name")),
        company_description: normalize_text(raw.get("company_description")),
        service_lines: normalize_list(raw.get("service_lines"), Split::Items),
        tier1_keywords: normalize_list(raw.get("tier1_keywords"), Split::Items),
        tier2_keywords: normalize_list(raw.get("tier2_keywords"), Split::Items),
        emails: normalize_emails(raw.get("emails")),
        point_of_contact: normalize_list(raw.get("point_of_contact"), Split::People),
    }
}

fn is_placeholder(value: &str) -> bool {
    value.eq_ignore_ascii_case(UNKNOWN_SENTINEL)
        || value.eq_ignore_ascii_case("none")
        || value.eq_ignore_ascii_case("n/a")
        || value == "[]"
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn clean_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || is_placeholder(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(scalar_to_string)
                .filter_map(|s| clean_text(&s))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        other => scalar_to_string(other).and_then(|s| clean_text(&s)),
    }
}

fn clean_item(item: &str) -> Option<String> {
    let stripped = item
        .trim()
        .trim_matches(LIST_WRAPPERS)
        .trim()
        .trim_start_matches(LIST_BULLETS)
        .trim();
    clean_text(stripped)
}

fn split_items(value: &str, split: Split) -> Vec<String> {
    // Models sometimes answer with a JSON list instead of plain text
    if let Ok(items) = serde_json::from_str::<Vec<String>>(value.trim()) {
        return items.iter().filter_map(|item| clean_item(item)).collect();
    }

    value
        .split(|c: char| split.is_delimiter(c))
        .filter_map(clean_item)
        .collect()
}

fn normalize_list(value: Option<&Value>, split: Split) -> Vec<String> {
    let items: Vec<String> = match value {
        Some(Value::String(s)) => split_items(s, split),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(scalar_to_string)
            .filter_map(|s| clean_item(&s))
            .collect(),
        Some(other) => scalar_to_string(other)
            .map(|s| split_items(&s, split))
            .unwrap_or_default(),
        None => Vec::new(),
    };

    dedupe(items, |s| s.to_string())
}

fn normalize_emails(value: Option<&Value>) -> Vec<String> {
    let candidates = normalize_list(value, Split::Items);
    let emails = candidates
        .into_iter()
        .map(|entry| {
            let lowered = entry.to_ascii_lowercase();
            if lowered.starts_with("mailto:") {
                entry["mailto:".len()..].trim().to_string()
            } else {
                entry
            }
        })
        .filter(|entry| entry.contains('@') && !entry.contains(char::is_whitespace))
        .collect();

    dedupe(emails, |s| s.to_ascii_lowercase())
}

/// Remove duplicates while keeping first-seen order
fn dedupe<F>(items: Vec<String>, key: F) -> Vec<String>
where
    F: Fn(&str) -> String,
{
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawProfile {
        RawProfile::from_value(value)
    }

    #[test]
    fn test_empty_payload_yields_empty_profile() {
        let profile = normalize_profile(&RawProfile::new());
        assert!(profile.is_empty());
    }

    #[test]
    fn test_unknown_sentinel_becomes_absent() {
        let profile = normalize_profile(&raw(json!({
            "company_name": "Unknown",
            "company_description": "  unknown ",
            "service_lines": "Unknown",
            "emails": "Unknown",
            "point_of_contact": "Unknown",
        })));
        assert!(profile.is_empty());
    }

    #[test]
    fn test_comma_separated_strings_are_split() {
        let profile = normalize_profile(&raw(json!({
            "service_lines": "Solar installation, Battery storage ,\n- Energy audits",
            "tier1_keywords": "solar,solar,photovoltaic",
        })));
        assert_eq!(
            profile.service_lines,
            vec!["Solar installation", "Battery storage", "Energy audits"]
        );
        assert_eq!(profile.tier1_keywords, vec!["solar", "photovoltaic"]);
    }

    #[test]
    fn test_point_of_contact_scalar_and_list_agree() {
        let scalar = normalize_profile(&raw(json!({"point_of_contact": "Jane Doe"})));
        let list = normalize_profile(&raw(json!({"point_of_contact": ["Jane Doe"]})));
        assert_eq!(scalar.point_of_contact, vec!["Jane Doe"]);
        assert_eq!(scalar, list);
    }

    #[test]
    fn test_point_of_contact_keeps_commas() {
        let profile = normalize_profile(&raw(json!({
            "point_of_contact": "Jane Doe, CEO; John Roe, CTO"
        })));
        assert_eq!(profile.point_of_contact, vec!["Jane Doe, CEO", "John Roe, CTO"]);
    }

    #[test]
    fn test_list_where_text_expected_is_joined() {
        let profile = normalize_profile(&raw(json!({
            "company_name": ["Acme", "Corp"],
            "company_description": null,
        })));
        assert_eq!(profile.company_name.as_deref(), Some("Acme, Corp"));
        assert!(profile.company_description.is_none());
    }

    #[test]
    fn test_list_syntax_answers_lose_brackets_and_quotes() {
        let profile = normalize_profile(&raw(json!({
            "emails": r#"["a@b.com", "c@d.com"]"#,
            "service_lines": "[Solar, 'Wind']",
            "point_of_contact": r#"["Jane Doe, CEO"]"#,
            "tier1_keywords": "[]",
        })));
        assert_eq!(profile.emails, vec!["a@b.com", "c@d.com"]);
        assert_eq!(profile.service_lines, vec!["Solar", "Wind"]);
        assert_eq!(profile.point_of_contact, vec!["Jane Doe, CEO"]);
        assert!(profile.tier1_keywords.is_empty());
    }

    #[test]
    fn test_emails_are_filtered_and_deduplicated() {
        let profile = normalize_profile(&raw(json!({
            "emails": "mailto:info@acme.com, INFO@acme.com, not an email, sales@acme.com"
        })));
        assert_eq!(profile.emails, vec!["info@acme.com", "sales@acme.com"]);
    }

    #[test]
    fn test_unexpected_types_become_empty() {
        let profile = normalize_profile(&raw(json!({
            "service_lines": {"nested": true},
            "tier2_keywords": 42,
        })));
        assert!(profile.service_lines.is_empty());
        assert_eq!(profile.tier2_keywords, vec!["42"]);
    }
}
