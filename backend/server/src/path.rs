//! # Paths
//!
//! Logical pages and their URL templates. Used both when declaring routes in
//! [`crate::layout::Layout`] and when navigating programmatically.
//!
//! Templates may contain `:param` segments, filled in with [`fill`].
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Status,
    About,
    Mock,
    Start,
    Success,
    Address,
    StateRedirect,
    State,
}

pub const DEFAULT_URL: &str = Page::Start.path();

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown page: {0}")]
pub struct UnknownPageError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEntry {
    pub page: Page,
    pub template: &'static str,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Status,
        Page::About,
        Page::Mock,
        Page::Start,
        Page::Success,
        Page::Address,
        Page::StateRedirect,
        Page::State,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Page::Status => "status",
            Page::About => "about",
            Page::Mock => "mock",
            Page::Start => "start",
            Page::Success => "success",
            Page::Address => "address",
            Page::StateRedirect => "stateRedirect",
            Page::State => "state",
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Page::Status => "/status",
            Page::About => "/about",
            Page::Mock => "/mock",
            Page::Start => "/start",
            Page::Success => "/success",
            Page::Address => "/address",
            Page::StateRedirect => "/state",
            Page::State => "/state/:state",
        }
    }

    pub fn from_name(name: &str) -> Result<Page, UnknownPageError> {
        Page::ALL
            .into_iter()
            .find(|page| page.name() == name)
            .ok_or_else(|| UnknownPageError(name.to_string()))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn resolve(name: &str) -> Result<&'static str, UnknownPageError> {
    Page::from_name(name).map(Page::path)
}

pub fn entries() -> impl Iterator<Item = PathEntry> {
    Page::ALL.into_iter().map(|page| PathEntry {
        page,
        template: page.path(),
    })
}

/// Replaces `:name` segments with the matching value, leaving unknown parameters untouched.
pub fn fill(template: &str, params: &[(&str, &str)]) -> String {
    template
        .split('/')
        .map(|segment| {
            segment
                .strip_prefix(':')
                .and_then(|key| params.iter().find(|(k, _)| *k == key))
                .map_or(segment, |(_, value)| *value)
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn state_url(state: &str) -> String {
    fill(Page::State.path(), &[("state", state)])
}

pub fn success_url(id: &str) -> String {
    format!("{}#{id}", Page::Success.path())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_name_resolves() {
        for entry in entries() {
            let template = resolve(entry.page.name()).unwrap();
            assert!(!template.is_empty());
            assert!(template.starts_with('/'));
            assert_eq!(template, entry.template);
            assert_eq!(resolve(entry.page.name()).unwrap(), template);
        }
    }

    #[test]
    fn names_and_templates_are_unique() {
        let names: HashSet<_> = entries().map(|e| e.page.name()).collect();
        let templates: HashSet<_> = entries().map(|e| e.template).collect();

        assert_eq!(names.len(), Page::ALL.len());
        assert_eq!(templates.len(), Page::ALL.len());
    }

    #[test]
    fn default_url_is_start() {
        assert_eq!(resolve("start").unwrap(), DEFAULT_URL);
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            resolve("checkout"),
            Err(UnknownPageError("checkout".to_string()))
        );
    }

    #[test]
    fn fill_params() {
        assert_eq!(state_url("Florida"), "/state/Florida");
        assert_eq!(fill("/state/:state", &[]), "/state/:state");
    }

    #[test]
    fn success_carries_fragment() {
        assert_eq!(success_url("abc123"), "/success#abc123");
    }
}
