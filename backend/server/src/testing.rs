//! In-process backends for tests.
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use common::{
    AddressLocation, Locale, RawAddress, RegistrationClient, RegistrationInfo, RegistrationResult,
    RpcResult,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

pub fn leon_location() -> AddressLocation {
    AddressLocation {
        id: "42".to_string(),
        usps_address: "500 S BRONOUGH ST, TALLAHASSEE, FL 32399".to_string(),
        locale: Locale {
            state: "Florida".to_string(),
            county: "Leon".to_string(),
            city: Some("Tallahassee".to_string()),
        },
    }
}

/// Records every call and answers with fixed results.
pub struct RecordingClient {
    register_result: RegistrationResult,
    locate_result: RpcResult<AddressLocation>,
    registrations: Mutex<Vec<RegistrationInfo>>,
    locates: Mutex<Vec<RawAddress>>,
}

impl RecordingClient {
    pub fn registering(id: &str) -> Self {
        Self::new(RpcResult::data(id.to_string()), RpcResult::data(leon_location()))
    }

    pub fn rejecting(error: &str) -> Self {
        Self::new(RpcResult::error(error), RpcResult::error(error))
    }

    pub fn new(
        register_result: RegistrationResult,
        locate_result: RpcResult<AddressLocation>,
    ) -> Self {
        Self {
            register_result,
            locate_result,
            registrations: Mutex::new(Vec::new()),
            locates: Mutex::new(Vec::new()),
        }
    }

    pub fn registrations(&self) -> Vec<RegistrationInfo> {
        self.registrations.lock().clone()
    }

    pub fn register_calls(&self) -> usize {
        self.registrations.lock().len()
    }

    pub fn locate_calls(&self) -> usize {
        self.locates.lock().len()
    }
}

#[async_trait]
impl RegistrationClient for RecordingClient {
    async fn register(&self, info: &RegistrationInfo) -> RegistrationResult {
        self.registrations.lock().push(info.clone());
        self.register_result.clone()
    }

    async fn locate(&self, address: &RawAddress) -> RpcResult<AddressLocation> {
        self.locates.lock().push(address.clone());
        self.locate_result.clone()
    }
}

/// Holds `register` open until `release` is notified.
pub struct GatedClient {
    id: String,
    calls: AtomicUsize,
    pub entered: Notify,
    pub release: Notify,
}

impl GatedClient {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            calls: AtomicUsize::new(0),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistrationClient for GatedClient {
    async fn register(&self, _info: &RegistrationInfo) -> RegistrationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        RpcResult::data(self.id.clone())
    }

    async fn locate(&self, _address: &RawAddress) -> RpcResult<AddressLocation> {
        RpcResult::data(leon_location())
    }
}
