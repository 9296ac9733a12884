use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use common::{AddressLocation, Jurisdiction, Locale, RawAddress};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    container::{AddressState, CheckboxState, SessionScope},
    error::AppError,
    layout::{Resolution, RouteMatch},
    locate::{LocateOutcome, locate},
    pages::{
        AboutPage, AddressFormView, AddressPage, Chrome, FloridaForm, MockPage, StartPage,
        StatePage, StatusPage, SuccessPage, render,
    },
    path::{DEFAULT_URL, Page, state_url},
    state::AppState,
    submission::{JurisdictionExtras, RegistrationFields, SubmitOutcome, submit},
    utils::non_empty,
};

#[derive(Debug, Deserialize)]
pub struct AddressForm {
    street: String,
    #[serde(default)]
    unit: Option<String>,
    city: String,
    state: String,
    zip: String,
}

impl From<AddressForm> for RawAddress {
    fn from(form: AddressForm) -> Self {
        RawAddress {
            street: form.street.trim().to_string(),
            unit: non_empty(form.unit),
            city: form.city.trim().to_string(),
            state: form.state.trim().to_string(),
            zip: form.zip.trim().to_string(),
        }
    }
}

/// Renders whatever the layout maps the URL to.
pub async fn page_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    uri: Uri,
) -> Result<Response, AppError> {
    let route = match state.layout.resolve(uri.path()) {
        Resolution::Render(route) => route,
        Resolution::Redirect(to) => {
            debug!("Redirecting {} to {to}", uri.path());
            return Ok(Redirect::temporary(&to).into_response());
        }
    };

    let (jar, session) = state.sessions.open(jar);
    let response = render_page(&state, &session, &route)?;

    Ok((jar, response).into_response())
}

fn render_page(
    state: &AppState,
    session: &SessionScope,
    route: &RouteMatch,
) -> Result<Response, AppError> {
    let chrome = Chrome::new(route).dev_info(dev_info(state, session));

    let html = match route.page {
        Page::Status => render(StatusPage {
            chrome,
            version: env!("CARGO_PKG_VERSION"),
            backend: state.config.rpc_url.clone(),
            sessions: state.sessions.len(),
        })?,
        Page::About => render(AboutPage { chrome })?,
        Page::Mock => {
            if state.config.mock_enabled {
                info!("Seeding session with mock address");
                session.address().set(mock_address());
            }
            render(MockPage {
                chrome,
                enabled: state.config.mock_enabled,
                state_redirect_url: Page::StateRedirect.path(),
            })?
        }
        Page::Start => render(StartPage {
            chrome,
            address_url: Page::Address.path(),
        })?,
        Page::Success => render(SuccessPage {
            chrome,
            start_url: DEFAULT_URL,
        })?,
        Page::Address => render(AddressPage::new(chrome, &session.address().get()))?,
        Page::StateRedirect => return Ok(state_redirect(session).into_response()),
        Page::State => {
            let state_name = route.param("state").unwrap_or_default();
            if let Some(url) = misplaced(session, state_name) {
                debug!("Address is not in {state_name}, redirecting to {url}");
                return Ok(Redirect::temporary(&url).into_response());
            }
            render(state_page(
                chrome,
                session,
                state_name,
                &RegistrationFields::default(),
                false,
            ))?
        }
    };

    Ok(html.into_response())
}

/// State of the session's located address, if there is one.
fn located_state(session: &SessionScope) -> Option<String> {
    session.address().with(|address| {
        address
            .resolved()
            .and_then(|resolved| resolved.locale)
            .map(|locale| locale.state.clone())
    })
}

/// Sends the user to the form of the state their address is in.
fn state_redirect(session: &SessionScope) -> Redirect {
    match located_state(session) {
        Some(located) => Redirect::temporary(&state_url(&located)),
        None => Redirect::temporary(Page::Address.path()),
    }
}

/// URL of the right state form when the located address is outside `state_name`.
fn misplaced(session: &SessionScope, state_name: &str) -> Option<String> {
    let located = located_state(session)?;
    (!same_state(&located, state_name)).then(|| state_url(&located))
}

fn same_state(a: &str, b: &str) -> bool {
    match (a.parse::<Jurisdiction>(), b.parse::<Jurisdiction>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.trim().eq_ignore_ascii_case(b.trim()),
    }
}

fn state_page(
    chrome: Chrome,
    session: &SessionScope,
    state_name: &str,
    fields: &RegistrationFields,
    checked: bool,
) -> StatePage {
    let address = session.address().get();
    let county = address
        .locale
        .as_ref()
        .map(|locale| locale.county.as_str())
        .unwrap_or_default();

    let (florida, unsupported) = match state_name.parse::<Jurisdiction>() {
        Ok(Jurisdiction::Florida) => (
            Some(FloridaForm::new(
                state_url(Jurisdiction::Florida.name()),
                county,
                fields,
                checked,
            )),
            None,
        ),
        Err(_) => (None, Some(state_name.to_string())),
    };

    StatePage {
        chrome,
        address_form: AddressFormView::new(&address.raw),
        located: address.usps_address.clone(),
        florida,
        unsupported,
    }
}

pub async fn address_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    uri: Uri,
    Form(form): Form<AddressForm>,
) -> Result<Response, AppError> {
    let (jar, session) = state.sessions.open(jar);

    let warning = match locate(state.client.as_ref(), &session, form.into()).await {
        LocateOutcome::Located => {
            let redirect = Redirect::to(Page::StateRedirect.path());
            return Ok((jar, redirect).into_response());
        }
        LocateOutcome::Blank => "Please enter your address".to_string(),
        LocateOutcome::Failed(error) => format!("We could not find that address: {error}"),
    };

    let chrome = chrome_for(&state, &session, uri.path()).warning(Some(warning));
    let html = render(AddressPage::new(chrome, &session.address().get()))?;

    Ok((jar, html).into_response())
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    uri: Uri,
    Path(state_name): Path<String>,
    Form(fields): Form<RegistrationFields>,
) -> Result<Response, AppError> {
    let (jar, session) = state.sessions.open(jar);

    if let Some(url) = misplaced(&session, &state_name) {
        warn!("Refusing {state_name} application for an address located elsewhere");
        return Ok((jar, Redirect::to(&url)).into_response());
    }

    let chrome = chrome_for(&state, &session, uri.path());

    let Ok(jurisdiction) = state_name.parse::<Jurisdiction>() else {
        let page = state_page(chrome, &session, &state_name, &fields, fields.separate_mailing);
        return Ok((jar, render(page)?).into_response());
    };

    let form = session.form_scope();
    form.checkbox().set(CheckboxState {
        checked: fields.separate_mailing,
    });

    let extras = session.address().with(|address| match &address.locale {
        Some(locale) => JurisdictionExtras::from_locale(jurisdiction, locale),
        None => JurisdictionExtras::from_locale(jurisdiction, &unknown_locale(jurisdiction)),
    });

    let outcome = submit(state.client.as_ref(), &session, &form, &fields, &extras).await;
    if let SubmitOutcome::Registered { redirect, .. } = &outcome {
        return Ok((jar, Redirect::to(redirect)).into_response());
    }

    let checked = form.checkbox().get().checked;
    let page = state_page(
        chrome.warning(outcome.warning()),
        &session,
        &state_name,
        &fields,
        checked,
    );

    Ok((jar, render(page)?).into_response())
}

fn chrome_for(state: &AppState, session: &SessionScope, path: &str) -> Chrome {
    let chrome = match state.layout.resolve(path) {
        Resolution::Render(route) => Chrome::new(&route),
        Resolution::Redirect(_) => Chrome::new(&RouteMatch {
            page: Page::Start,
            params: Default::default(),
            scroll: None,
        }),
    };

    chrome.dev_info(dev_info(state, session))
}

fn dev_info(state: &AppState, session: &SessionScope) -> Option<String> {
    if !state.config.dev_info {
        return None;
    }

    let address = session.address().get();
    Some(format!(
        "backend: {}\naddress id: {}\nlocale: {:?}\nsubmitting: {}",
        state.config.rpc_url,
        address.id.as_deref().unwrap_or("none"),
        address.locale,
        session.is_submitting(),
    ))
}

fn unknown_locale(jurisdiction: Jurisdiction) -> Locale {
    Locale {
        state: jurisdiction.name().to_string(),
        county: String::new(),
        city: None,
    }
}

fn mock_address() -> AddressState {
    AddressState::located(
        RawAddress {
            street: "500 S Bronough St".to_string(),
            unit: None,
            city: "Tallahassee".to_string(),
            state: "FL".to_string(),
            zip: "32399".to_string(),
        },
        AddressLocation {
            id: "mock".to_string(),
            usps_address: "500 S BRONOUGH ST, TALLAHASSEE, FL 32399".to_string(),
            locale: Locale {
                state: Jurisdiction::Florida.name().to_string(),
                county: "Leon".to_string(),
                city: Some("Tallahassee".to_string()),
            },
        },
    )
}
