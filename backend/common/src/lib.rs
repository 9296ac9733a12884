//! # Registration Wire Types
//!
//! Structures shared between the web client and the registration backend.
//!
//! ## Overall Payloads
//!
//! ### Locate
//! To backend
//! - JSON [`RawAddress`] as typed by the user
//!
//! From backend
//! - `{"type": "data", "data": {id, uspsAddress, locale}}` or `{"type": "error", "error": "..."}`
//!
//! ### Register
//! To backend
//! - JSON [`RegistrationInfo`], tagged by `state`
//! - `addressId` refers to the id returned by locate, the backend owns the address itself
//! - `mailingAddress` is only present when the user asked for a separate mailing address
//!
//! From backend
//! - `{"type": "data", "data": "<registration id>"}` or `{"type": "error", "error": "..."}`
//!
//!
//!
//! ## Notes
//! - Transport failures never surface as Rust errors to callers of [`RegistrationClient`],
//!   they are folded into the `error` branch so the form can show a single kind of warning.
//! - Florida is the only jurisdiction with a form so far. New states get a variant in
//!   [`RegistrationInfo`] and [`Jurisdiction`].
pub mod address;
pub mod florida;
pub mod registration;
pub mod remote;
pub mod rpc;

pub use address::{AddressLocation, Locale, RawAddress};
pub use florida::{CountyInfo, florida_county};
pub use registration::{
    FloridaInfo, FloridaInfoBuilder, Jurisdiction, PayloadError, RegistrationInfo,
    UnsupportedJurisdiction,
};
pub use remote::{RegistrationClient, RemoteClient, RpcError};
pub use rpc::{RegistrationResult, RpcResult};
