//! # Pages
//!
//! Askama view models. Every page extends `base.html`, which draws the shared chrome:
//! blurb, scroll hook wrapper, warning message, dev info and footer.
use askama::Template;
use axum::response::Html;
use common::{CountyInfo, RawAddress};

use crate::{
    container::AddressState,
    error::AppError,
    layout::{RouteMatch, ScrollHook},
    path::Page,
    submission::RegistrationFields,
};

pub struct ScrollView {
    pub page: &'static str,
    pub page_start: bool,
}

impl From<ScrollHook> for ScrollView {
    fn from(hook: ScrollHook) -> Self {
        Self {
            page: hook.page.name(),
            page_start: hook.page_start,
        }
    }
}

pub struct Chrome {
    pub title: &'static str,
    pub blurb: bool,
    pub scroll: Option<ScrollView>,
    pub warning: Option<String>,
    pub dev_info: Option<String>,
}

impl Chrome {
    pub fn new(route: &RouteMatch) -> Self {
        Self {
            title: title(route.page),
            blurb: matches!(route.page, Page::Start | Page::Address | Page::State),
            scroll: route.scroll.map(ScrollView::from),
            warning: None,
            dev_info: None,
        }
    }

    pub fn warning(mut self, warning: Option<String>) -> Self {
        self.warning = warning;
        self
    }

    pub fn dev_info(mut self, dev_info: Option<String>) -> Self {
        self.dev_info = dev_info;
        self
    }
}

fn title(page: Page) -> &'static str {
    match page {
        Page::Status => "Status",
        Page::About => "About",
        Page::Mock => "Mock",
        Page::Start => "Vote by Mail",
        Page::Success => "Success",
        Page::Address => "Your Address",
        Page::StateRedirect | Page::State => "Apply",
    }
}

#[derive(Template)]
#[template(path = "start.html")]
pub struct StartPage {
    pub chrome: Chrome,
    pub address_url: &'static str,
}

#[derive(Template)]
#[template(path = "status.html")]
pub struct StatusPage {
    pub chrome: Chrome,
    pub version: &'static str,
    pub backend: String,
    pub sessions: usize,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub chrome: Chrome,
}

#[derive(Template)]
#[template(path = "mock.html")]
pub struct MockPage {
    pub chrome: Chrome,
    pub enabled: bool,
    pub state_redirect_url: &'static str,
}

#[derive(Template)]
#[template(path = "success.html")]
pub struct SuccessPage {
    pub chrome: Chrome,
    pub start_url: &'static str,
}

/// Address form prefilled with what the session last typed, shared by the address and state
/// pages.
pub struct AddressFormView {
    pub action: &'static str,
    pub street: String,
    pub unit: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl AddressFormView {
    pub fn new(raw: &RawAddress) -> Self {
        Self {
            action: Page::Address.path(),
            street: raw.street.clone(),
            unit: raw.unit.clone().unwrap_or_default(),
            city: raw.city.clone(),
            state: raw.state.clone(),
            zip: raw.zip.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "address.html")]
pub struct AddressPage {
    pub chrome: Chrome,
    pub address_form: AddressFormView,
    pub located: Option<String>,
}

impl AddressPage {
    pub fn new(chrome: Chrome, state: &AddressState) -> Self {
        Self {
            chrome,
            address_form: AddressFormView::new(&state.raw),
            located: state.usps_address.clone(),
        }
    }
}

pub struct FloridaForm {
    pub action: String,
    pub county_name: String,
    pub county: Option<&'static CountyInfo>,
    pub name: String,
    pub birthdate: String,
    pub email: String,
    pub phone: String,
    pub mailing_checked: bool,
    pub mailing_address: String,
}

impl FloridaForm {
    pub fn new(
        action: String,
        county_name: &str,
        fields: &RegistrationFields,
        checked: bool,
    ) -> Self {
        Self {
            action,
            county_name: county_name.to_string(),
            county: common::florida_county(county_name),
            name: fields.name.clone(),
            birthdate: fields.birthdate.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            mailing_checked: checked,
            mailing_address: fields.mailing_address.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "state.html")]
pub struct StatePage {
    pub chrome: Chrome,
    pub address_form: AddressFormView,
    pub located: Option<String>,
    pub florida: Option<FloridaForm>,
    pub unsupported: Option<String>,
}

pub fn render(template: impl Template) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}
