use serde::{Deserialize, Deserializer};

/// HTML checkboxes only send a value when checked, a missing field means unchecked.
pub fn deserialize_checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| value.is_some_and(|v| v != "off"))
}

/// Empty form inputs become `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
