use serde::{Deserialize, Serialize};

/// Address fields exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddress {
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl RawAddress {
    /// Single line rendering used until the backend returns the normalized USPS form.
    pub fn one_line(&self) -> String {
        let street = match self.unit.as_deref().map(str::trim) {
            Some(unit) if !unit.is_empty() => format!("{} {}", self.street.trim(), unit),
            _ => self.street.trim().to_string(),
        };

        format!(
            "{}, {}, {} {}",
            street,
            self.city.trim(),
            self.state.trim(),
            self.zip.trim()
        )
    }

    pub fn is_blank(&self) -> bool {
        self.street.trim().is_empty() && self.city.trim().is_empty() && self.zip.trim().is_empty()
    }
}

/// Jurisdiction metadata for a resolved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    pub state: String,
    pub county: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Successful answer of the locate call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressLocation {
    pub id: String,
    pub usps_address: String,
    pub locale: Locale,
}
