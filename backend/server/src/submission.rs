//! # Registration Submission
//!
//! 1. Check the session has a located address, otherwise nothing is sent
//! 2. Refuse while another submission of the same session is in flight
//! 3. Read the form values and the mailing checkbox as they are now
//! 4. Assemble the state payload
//! 5. Call `register` once, no retries
//!
//! A `data` answer navigates to the success page with the id as fragment. An `error` answer
//! keeps the user on the form and shows the message.
use common::{
    FloridaInfo, Jurisdiction, Locale, PayloadError, RegistrationClient, RegistrationInfo,
    RpcResult,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    container::{FormScope, ResolvedAddress, SessionScope},
    path::success_url,
    utils::deserialize_checkbox,
};

/// Values of the state form, as posted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub birthdate: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(rename = "mailing", deserialize_with = "deserialize_checkbox", default)]
    pub separate_mailing: bool,
    #[serde(default)]
    pub mailing_address: String,
}

/// Jurisdiction specific values that do not come from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JurisdictionExtras {
    Florida { county: String },
}

impl JurisdictionExtras {
    pub fn from_locale(jurisdiction: Jurisdiction, locale: &Locale) -> Self {
        match jurisdiction {
            Jurisdiction::Florida => JurisdictionExtras::Florida {
                county: locale.county.clone(),
            },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotSubmitted {
    #[error("Please enter your address before registering")]
    MissingAddress,

    #[error("Your registration is already being sent")]
    InFlight,

    #[error(transparent)]
    Invalid(#[from] PayloadError),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Registered { id: String, redirect: String },
    NotSubmitted(NotSubmitted),
    Failed(String),
}

impl SubmitOutcome {
    pub fn warning(&self) -> Option<String> {
        match self {
            SubmitOutcome::Registered { .. } => None,
            SubmitOutcome::NotSubmitted(reason) => Some(reason.to_string()),
            SubmitOutcome::Failed(error) => Some(format!("Registration failed: {error}")),
        }
    }
}

pub fn build_payload(
    fields: &RegistrationFields,
    separate_mailing: bool,
    address: ResolvedAddress<'_>,
    extras: &JurisdictionExtras,
) -> Result<RegistrationInfo, PayloadError> {
    match extras {
        JurisdictionExtras::Florida { county } => FloridaInfo::builder()
            .name(&fields.name)
            .birthdate(&fields.birthdate)
            .email(&fields.email)
            .phone(&fields.phone)
            .address(address.id, address.usps_address)
            .county(county)
            .mailing_address(separate_mailing, &fields.mailing_address)
            .build()
            .map(RegistrationInfo::Florida),
    }
}

pub async fn submit(
    client: &dyn RegistrationClient,
    session: &SessionScope,
    form: &FormScope,
    fields: &RegistrationFields,
    extras: &JurisdictionExtras,
) -> SubmitOutcome {
    let address = form.address().get();
    let Some(resolved) = address.resolved() else {
        warn!("Registration attempted without a located address");
        return SubmitOutcome::NotSubmitted(NotSubmitted::MissingAddress);
    };

    let Some(_guard) = session.begin_submission() else {
        warn!("Registration already in flight for this session");
        return SubmitOutcome::NotSubmitted(NotSubmitted::InFlight);
    };

    let separate_mailing = form.checkbox().get().checked;
    let info = match build_payload(fields, separate_mailing, resolved, extras) {
        Ok(info) => info,
        Err(e) => return SubmitOutcome::NotSubmitted(e.into()),
    };

    #[cfg(feature = "verbose")]
    info!("Registration payload: {info:?}");

    match client.register(&info).await {
        RpcResult::Data { data } => {
            info!(
                "Registered {} voter for address {}",
                info.jurisdiction(),
                info.address_id()
            );
            SubmitOutcome::Registered {
                redirect: success_url(&data),
                id: data,
            }
        }
        RpcResult::Error { error } => {
            warn!("Registration rejected: {error}");
            SubmitOutcome::Failed(error)
        }
    }
}
