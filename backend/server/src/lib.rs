//! Vote by mail registration web client.
//!
//! Server rendered pages walking a voter from their address to the application form of their
//! state. The registration backend is only reached through the JSON procedures in `common`.
//!
//!
//!
//! # Flow
//! - `/` and any unknown path redirect to `/start`
//! - `/address` posts the typed address, the backend locates it and the session keeps the result
//! - `/state` looks at the located address and redirects to `/state/<state>`
//! - `/state/<state>` renders the state form, posting it calls `register`
//! - A located address in another state sends `/state/<state>` to that state's form instead
//! - Success redirects to `/success#<id>`, the id only lives in the fragment
//!
//!
//!
//! # Sessions
//!
//! **Goal**: share the located address between pages without a database.
//!
//! - A `session` cookie holds a random UUID, the address lives in memory next to it
//! - Idle sessions are dropped after `SESSION_TTL_SECS`
//! - Restarting the server forgets every address, users simply enter it again
//! - One registration per session can be in flight, double clicks do not send twice
//!
//!
//!
//! # Failures
//! - No located address: the state form is shown again with a warning, nothing is sent
//! - Backend error or timeout: the form is shown again with the message, nothing is retried
//! - Unknown page: redirect, never an error page
//!
//!
//!
//! # Setup
//!
//! Environment.
//! ```sh
//! RUST_PORT=1111
//! REGISTER_RPC_URL=http://localhost:2222
//! RPC_TIMEOUT_MS=5000
//! SESSION_TTL_SECS=3600
//! MOCK_ENABLED=false
//! DEV_INFO=false
//! RUST_LOG=info
//! ```
//!
//! The backend token is read from `/run/secrets/REGISTER_RPC_TOKEN`, falling back to the
//! environment variable of the same name.
//!
//! Run against the mock backend.
//! ```sh
//! cargo run -p tester
//! MOCK_ENABLED=true cargo run -p register
//! ```
use std::sync::Arc;

use axum::{Router, routing::get};
use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod container;
pub mod error;
pub mod layout;
pub mod locate;
pub mod pages;
pub mod path;
pub mod routes;
pub mod session;
pub mod state;
pub mod submission;
pub mod utils;

#[cfg(test)]
mod testing;

use config::Config;
use path::Page;
use routes::{address_handler, page_handler, register_handler};
use state::AppState;

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config)?;

    info!("Starting server...");

    let app = app(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            Page::Address.path(),
            get(page_handler).post(address_handler),
        )
        .route(Page::State.path(), get(page_handler).post(register_handler))
        .fallback(page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use common::{AddressLocation, Locale, RawAddress, RegistrationInfo};

    use super::*;
    use crate::{
        container::AddressState,
        testing::{RecordingClient, leon_location},
    };

    fn test_app(client: Arc<RecordingClient>, config: Config) -> (Router, Arc<AppState>) {
        let state = AppState::with_client(config, client);
        (app(state.clone()), state)
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn location(response: &axum::response::Response) -> Option<&str> {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// `name=value` part of the session cookie set by the response.
    fn session_cookie(response: &axum::response::Response) -> String {
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Opens a session whose address is already located in Leon County and returns its cookie.
    async fn located_session(app: &Router, state: &AppState) -> String {
        session_at(app, state, leon_location()).await
    }

    async fn session_at(app: &Router, state: &AppState, location: AddressLocation) -> String {
        let response = app
            .clone()
            .oneshot(get_request("/start", None))
            .await
            .unwrap();
        let cookie = session_cookie(&response);

        let id = cookie.trim_start_matches("session=");
        let scope = state.sessions.get(id.parse().unwrap()).unwrap();
        scope
            .address()
            .set(AddressState::located(RawAddress::default(), location));

        cookie
    }

    #[tokio::test]
    async fn root_redirects_to_default() {
        let (app, _) = test_app(Arc::new(RecordingClient::registering("x")), Config::default());

        let response = app.oneshot(get_request("/", None)).await.unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(location(&response), Some(path::DEFAULT_URL));
    }

    #[tokio::test]
    async fn unknown_paths_redirect_to_default() {
        let (app, _) = test_app(Arc::new(RecordingClient::registering("x")), Config::default());

        for uri in ["/nowhere", "/start/nested", "/mock/deep", "/favicon.ico"] {
            let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
            assert!(response.status().is_redirection(), "{uri}");
            assert_eq!(location(&response), Some(path::DEFAULT_URL), "{uri}");
        }
    }

    #[tokio::test]
    async fn start_page_renders_and_sets_cookie() {
        let (app, _) = test_app(Arc::new(RecordingClient::registering("x")), Config::default());

        let response = app.oneshot(get_request("/start", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).starts_with("session="));
        assert!(body_text(response).await.contains(r#"data-scroll-page="start""#));
    }

    #[tokio::test]
    async fn state_redirect_without_address_goes_to_address_form() {
        let (app, _) = test_app(Arc::new(RecordingClient::registering("x")), Config::default());

        let response = app.oneshot(get_request("/state", None)).await.unwrap();

        assert_eq!(location(&response), Some(Page::Address.path()));
    }

    #[tokio::test]
    async fn address_flow_routes_to_state_form() {
        let client = Arc::new(RecordingClient::registering("x"));
        let (app, _) = test_app(client.clone(), Config::default());

        let response = app
            .clone()
            .oneshot(post_form(
                "/address",
                None,
                "street=500+S+Bronough+St&city=Tallahassee&state=FL&zip=32399",
            ))
            .await
            .unwrap();
        assert_eq!(location(&response), Some(Page::StateRedirect.path()));
        assert_eq!(client.locate_calls(), 1);

        let cookie = session_cookie(&response);
        let response = app
            .clone()
            .oneshot(get_request("/state", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(location(&response), Some("/state/Florida"));

        let response = app
            .oneshot(get_request("/state/Florida", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Leon County Supervisor of Elections"));
    }

    fn fulton_location() -> AddressLocation {
        AddressLocation {
            id: "77".to_string(),
            usps_address: "1 PEACHTREE ST, ATLANTA, GA 30303".to_string(),
            locale: Locale {
                state: "Georgia".to_string(),
                county: "Fulton".to_string(),
                city: Some("Atlanta".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn state_form_follows_located_state() {
        let (app, state) = test_app(Arc::new(RecordingClient::registering("x")), Config::default());
        let cookie = session_at(&app, &state, fulton_location()).await;

        let response = app
            .clone()
            .oneshot(get_request("/state/Florida", Some(&cookie)))
            .await
            .unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(location(&response), Some("/state/Georgia"));

        let response = app
            .oneshot(get_request("/state/Georgia", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("not available yet"));
    }

    #[tokio::test]
    async fn florida_form_rejects_address_in_other_state() {
        let client = Arc::new(RecordingClient::registering("xyz"));
        let (app, state) = test_app(client.clone(), Config::default());
        let cookie = session_at(&app, &state, fulton_location()).await;

        let response = app
            .oneshot(post_form(
                "/state/Florida",
                Some(&cookie),
                "name=Ada&birthdate=1990-12-10&email=ada%40example.com",
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), Some("/state/Georgia"));
        assert_eq!(client.register_calls(), 0);
    }

    #[tokio::test]
    async fn abbreviation_matches_located_state() {
        let (app, state) = test_app(Arc::new(RecordingClient::registering("x")), Config::default());
        let cookie = located_session(&app, &state).await;

        let response = app
            .oneshot(get_request("/state/FL", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn submit_without_address_stays_on_form() {
        let client = Arc::new(RecordingClient::registering("x"));
        let (app, _) = test_app(client.clone(), Config::default());

        let response = app
            .oneshot(post_form(
                "/state/Florida",
                None,
                "name=Ada&birthdate=1990-12-10&email=ada%40example.com",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(location(&response), None);
        assert_eq!(client.register_calls(), 0);
        assert!(body_text(response).await.contains("Please enter your address"));
    }

    #[tokio::test]
    async fn florida_submission_redirects_to_success() {
        let client = Arc::new(RecordingClient::registering("xyz"));
        let (app, state) = test_app(client.clone(), Config::default());
        let cookie = located_session(&app, &state).await;

        let response = app
            .oneshot(post_form(
                "/state/Florida",
                Some(&cookie),
                concat!(
                    "name=Ada+Lovelace&birthdate=1990-12-10&email=ada%40example.com",
                    "&phone=&mailingAddress=",
                ),
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), Some("/success#xyz"));

        let sent = client.registrations();
        assert_eq!(sent.len(), 1);
        let payload = serde_json::to_value(&sent[0]).unwrap();
        assert_eq!(payload["addressId"], "42");
        assert!(payload.get("mailingAddress").is_none());
        let RegistrationInfo::Florida(info) = &sent[0];
        assert_eq!(info.county, "Leon");
    }

    #[tokio::test]
    async fn checked_mailing_requires_value() {
        let client = Arc::new(RecordingClient::registering("xyz"));
        let (app, state) = test_app(client.clone(), Config::default());
        let cookie = located_session(&app, &state).await;

        let response = app
            .oneshot(post_form(
                "/state/Florida",
                Some(&cookie),
                "name=Ada&birthdate=1990-12-10&email=ada%40example.com&mailing=on&mailingAddress=",
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), None);
        assert_eq!(client.register_calls(), 0);
    }

    #[tokio::test]
    async fn backend_error_is_shown() {
        let client = Arc::new(RecordingClient::rejecting("county offline"));
        let (app, state) = test_app(client.clone(), Config::default());
        let cookie = located_session(&app, &state).await;

        let response = app
            .oneshot(post_form(
                "/state/Florida",
                Some(&cookie),
                "name=Ada&birthdate=1990-12-10&email=ada%40example.com",
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), None);
        assert_eq!(client.register_calls(), 1);
        assert!(body_text(response).await.contains("county offline"));
    }

    #[tokio::test]
    async fn mock_page_seeds_address_when_enabled() {
        let config = Config {
            mock_enabled: true,
            ..Config::default()
        };
        let (app, _) = test_app(Arc::new(RecordingClient::registering("x")), config);

        let response = app.clone().oneshot(get_request("/mock", None)).await.unwrap();
        let cookie = session_cookie(&response);

        let response = app
            .oneshot(get_request("/state", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(location(&response), Some("/state/Florida"));
    }
}
