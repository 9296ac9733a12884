use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$").expect("phone pattern is valid")
});

/// States with a registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    Florida,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 1] = [Jurisdiction::Florida];

    pub fn name(self) -> &'static str {
        match self {
            Jurisdiction::Florida => "Florida",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Jurisdiction::Florida => "FL",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported jurisdiction: {0}")]
pub struct UnsupportedJurisdiction(pub String);

impl FromStr for Jurisdiction {
    type Err = UnsupportedJurisdiction;

    /// Accepts the full state name or its postal abbreviation, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Jurisdiction::ALL
            .into_iter()
            .find(|j| s.eq_ignore_ascii_case(j.name()) || s.eq_ignore_ascii_case(j.abbreviation()))
            .ok_or_else(|| UnsupportedJurisdiction(s.to_string()))
    }
}

/// Payload of the register call, tagged by state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum RegistrationInfo {
    Florida(FloridaInfo),
}

impl RegistrationInfo {
    pub fn jurisdiction(&self) -> Jurisdiction {
        match self {
            RegistrationInfo::Florida(_) => Jurisdiction::Florida,
        }
    }

    pub fn address_id(&self) -> &str {
        match self {
            RegistrationInfo::Florida(info) => &info.address_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloridaInfo {
    pub name: String,
    pub birthdate: String,
    pub email: String,
    pub address_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub usps_address: String,
    pub county: String,
}

impl FloridaInfo {
    pub fn builder() -> FloridaInfoBuilder {
        FloridaInfoBuilder::default()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Mailing address is required when a separate mailing address is selected")]
    EmptyMailingAddress,

    #[error("Phone number must look like 123-456-7890")]
    InvalidPhone,
}

/// Assembles a [`FloridaInfo`], enforcing the same rules as the form widgets.
#[derive(Debug, Clone, Default)]
pub struct FloridaInfoBuilder {
    name: Option<String>,
    birthdate: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address_id: Option<String>,
    usps_address: Option<String>,
    county: Option<String>,
    mailing_address: Option<String>,
    separate_mailing: bool,
}

impl FloridaInfoBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn birthdate(mut self, birthdate: impl Into<String>) -> Self {
        self.birthdate = Some(birthdate.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Blank input means no phone.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn address(mut self, id: impl Into<String>, usps_address: impl Into<String>) -> Self {
        self.address_id = Some(id.into());
        self.usps_address = Some(usps_address.into());
        self
    }

    pub fn county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }

    /// The value is only kept when `checked` is set.
    pub fn mailing_address(mut self, checked: bool, value: impl Into<String>) -> Self {
        self.separate_mailing = checked;
        self.mailing_address = checked.then(|| value.into());
        self
    }

    pub fn build(self) -> Result<FloridaInfo, PayloadError> {
        let phone = match self.phone.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(phone) if PHONE.is_match(phone) => Some(phone.to_string()),
            Some(_) => return Err(PayloadError::InvalidPhone),
        };

        let mailing_address = if self.separate_mailing {
            match self.mailing_address.as_deref().map(str::trim) {
                Some(value) if !value.is_empty() => Some(value.to_string()),
                _ => return Err(PayloadError::EmptyMailingAddress),
            }
        } else {
            None
        };

        Ok(FloridaInfo {
            name: required(self.name, "name")?,
            birthdate: required(self.birthdate, "birthdate")?,
            email: required(self.email, "email")?,
            address_id: required(self.address_id, "addressId")?,
            mailing_address,
            phone,
            usps_address: required(self.usps_address, "uspsAddress")?,
            county: required(self.county, "county")?,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, PayloadError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(PayloadError::MissingField(field))
}
