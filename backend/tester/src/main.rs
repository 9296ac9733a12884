//! Mock registration backend for local runs.
//!
//! - `locate` places every address in Leon County, Florida, zip `00000` is reported as not found
//! - `register` answers with a fresh UUID, a name of `error` is rejected
use std::env;

use axum::{Json, Router, routing::post};
use common::{
    AddressLocation, Locale, RawAddress, RegistrationInfo, RegistrationResult, RpcResult,
    remote::{LOCATE_METHOD, REGISTER_METHOD},
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let port = env::var("TESTER_PORT").unwrap_or_else(|_| "2222".to_string());
    let address = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route(&format!("/{LOCATE_METHOD}"), post(locate))
        .route(&format!("/{REGISTER_METHOD}"), post(register));

    let listener = TcpListener::bind(&address).await?;
    info!("Mock backend running on {address}");

    axum::serve(listener, app).await
}

async fn locate(Json(address): Json<RawAddress>) -> Json<RpcResult<AddressLocation>> {
    info!("Locate {}", address.one_line());

    if address.zip.trim() == "00000" {
        return Json(RpcResult::error("Address not found"));
    }

    Json(RpcResult::data(AddressLocation {
        id: Uuid::new_v4().to_string(),
        usps_address: address.one_line().to_uppercase(),
        locale: Locale {
            state: "Florida".to_string(),
            county: "Leon".to_string(),
            city: Some(address.city.trim().to_string()).filter(|c| !c.is_empty()),
        },
    }))
}

async fn register(Json(info): Json<RegistrationInfo>) -> Json<RegistrationResult> {
    let RegistrationInfo::Florida(florida) = &info;
    info!(
        "Register {} in {} county for address {}",
        florida.name,
        florida.county,
        info.address_id()
    );

    if florida.name.eq_ignore_ascii_case("error") {
        return Json(RpcResult::error("Registration rejected by mock backend"));
    }

    Json(RpcResult::data(Uuid::new_v4().to_string()))
}
