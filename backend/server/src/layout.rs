//! # Layout
//!
//! Ordered route table deciding which page renders for a URL.
//!
//! - First matching route wins, so more specific routes must come first
//! - Exact routes only match their own path, prefix routes also match sub-paths
//! - Matching works on whole segments: `/about/team` matches `/about`, `/aboutx` does not
//! - Nothing matched means a redirect to [`DEFAULT_URL`], checked after the whole table
//!
//! Routes may be wrapped by a [`ScrollHook`] which resets the scroll position when the page is
//! entered. `page_start` marks the first page of the scroll tracked sequence.
use std::collections::HashMap;

use crate::path::{DEFAULT_URL, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    Exact,
    Prefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollHook {
    pub page: Page,
    pub page_start: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Page(Page),
    Redirect(&'static str),
}

#[derive(Debug, Clone)]
pub struct Route {
    pub pattern: &'static str,
    pub matching: Match,
    pub target: Target,
    pub scroll: Option<ScrollHook>,
}

impl Route {
    fn page(page: Page, matching: Match) -> Self {
        Self {
            pattern: page.path(),
            matching,
            target: Target::Page(page),
            scroll: None,
        }
    }

    fn redirect(pattern: &'static str, matching: Match, to: &'static str) -> Self {
        Self {
            pattern,
            matching,
            target: Target::Redirect(to),
            scroll: None,
        }
    }

    fn scroll(mut self, page_start: bool) -> Self {
        if let Target::Page(page) = self.target {
            self.scroll = Some(ScrollHook { page, page_start });
        }
        self
    }

    /// Captured parameters when the route matches the path.
    fn matches(&self, path: &[&str]) -> Option<HashMap<String, String>> {
        let pattern = segments(self.pattern);

        let fits = match self.matching {
            Match::Exact => path.len() == pattern.len(),
            Match::Prefix => path.len() >= pattern.len(),
        };
        if !fits {
            return None;
        }

        let mut params = HashMap::new();
        for (expected, actual) in pattern.iter().zip(path) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    params.insert(name.to_string(), actual.to_string());
                }
                None if expected == actual => {}
                None => return None,
            }
        }

        Some(params)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub page: Page,
    pub params: HashMap<String, String>,
    pub scroll: Option<ScrollHook>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(RouteMatch),
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct Layout {
    routes: Vec<Route>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    pub fn new() -> Self {
        Self {
            routes: vec![
                Route::page(Page::Status, Match::Prefix),
                Route::page(Page::About, Match::Prefix),
                Route::redirect("/", Match::Exact, DEFAULT_URL),
                Route::page(Page::Mock, Match::Exact),
                Route::page(Page::Start, Match::Exact).scroll(false),
                Route::page(Page::Success, Match::Prefix).scroll(false),
                Route::page(Page::Address, Match::Prefix).scroll(true),
                Route::page(Page::StateRedirect, Match::Exact),
                Route::page(Page::State, Match::Prefix).scroll(false),
            ],
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn resolve(&self, path: &str) -> Resolution {
        let path = segments(path);

        for route in &self.routes {
            let Some(params) = route.matches(&path) else {
                continue;
            };

            return match route.target {
                Target::Page(page) => Resolution::Render(RouteMatch {
                    page,
                    params,
                    scroll: route.scroll,
                }),
                Target::Redirect(to) => Resolution::Redirect(to.to_string()),
            };
        }

        Resolution::Redirect(DEFAULT_URL.to_string())
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('?')
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}
