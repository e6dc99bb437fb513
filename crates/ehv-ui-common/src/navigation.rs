//! Dashboard routes and detail-page payloads.
//!
//! Detail pages (asset details, maintenance log) are entered with the full
//! record handed across the navigation boundary. When that payload is
//! missing the page resolves to a [`Fallback`] with a single recovery route
//! instead of failing.

use std::fmt;
use std::str::FromStr;

use ehv_core::{Equipment, FaultLog, Substation};

use crate::error::Error;

/// Every page of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Home,
    GridMap,
    NationalGrid,
    /// Substation detail; the id is resolved against the grid on render.
    Substation(String),
    Dashboard,
    Monitoring,
    DigitalTwin,
    AssetHealth,
    AssetDetails,
    MaintenanceLog,
    AiAnalytics,
    Simulator,
    FaultSimulator,
    Reports,
    Settings,
    Profile,
    UserManagement,
    /// Any path no page claims; keeps the requested path.
    NotFound(String),
}

const STATIC_ROUTES: &[(&str, Route)] = &[
    ("/login", Route::Login),
    ("/register", Route::Register),
    ("/", Route::Home),
    ("/grid-map", Route::GridMap),
    ("/national-grid", Route::NationalGrid),
    ("/dashboard", Route::Dashboard),
    ("/monitoring", Route::Monitoring),
    ("/digital-twin", Route::DigitalTwin),
    ("/asset-health", Route::AssetHealth),
    ("/asset-details", Route::AssetDetails),
    ("/maintenance-log", Route::MaintenanceLog),
    ("/ai-analytics", Route::AiAnalytics),
    ("/simulator", Route::Simulator),
    ("/fault-simulator", Route::FaultSimulator),
    ("/reports", Route::Reports),
    ("/settings", Route::Settings),
    ("/profile", Route::Profile),
    ("/user-management", Route::UserManagement),
];

impl Route {
    /// Resolve a path. Query strings and fragments are ignored; unknown paths
    /// map to [`Route::NotFound`].
    pub fn parse(path: &str) -> Route {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        if let Some(id) = trimmed.strip_prefix("/substation/") {
            if !id.is_empty() && !id.contains('/') {
                return Route::Substation(id.to_string());
            }
            return Route::NotFound(path.to_string());
        }

        STATIC_ROUTES
            .iter()
            .find(|(p, _)| *p == trimmed)
            .map(|(_, r)| r.clone())
            .unwrap_or_else(|| Route::NotFound(path.to_string()))
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Substation(id) => format!("/substation/{id}"),
            Route::NotFound(path) => path.clone(),
            other => STATIC_ROUTES
                .iter()
                .find(|(_, r)| r == other)
                .map(|(p, _)| p.to_string())
                .unwrap_or_default(),
        }
    }

    /// Page heading.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Home => "Home",
            Route::GridMap => "Grid Map",
            Route::NationalGrid => "National Grid",
            Route::Substation(_) => "Substation Details",
            Route::Dashboard => "Dashboard",
            Route::Monitoring => "Monitoring",
            Route::DigitalTwin => "Digital Twin",
            Route::AssetHealth => "Asset Health",
            Route::AssetDetails => "Asset Details",
            Route::MaintenanceLog => "Maintenance Log",
            Route::AiAnalytics => "AI Analytics",
            Route::Simulator => "Simulator",
            Route::FaultSimulator => "Fault Simulator",
            Route::Reports => "Reports",
            Route::Settings => "Settings",
            Route::Profile => "Profile",
            Route::UserManagement => "User Management",
            Route::NotFound(_) => "404 - Page Not Found",
        }
    }

    /// Pages rendered inside the sidebar/header shell.
    pub fn uses_main_layout(&self) -> bool {
        matches!(
            self,
            Route::Dashboard
                | Route::Monitoring
                | Route::DigitalTwin
                | Route::AssetHealth
                | Route::AssetDetails
                | Route::MaintenanceLog
                | Route::AiAnalytics
                | Route::Simulator
                | Route::FaultSimulator
                | Route::Reports
                | Route::Settings
                | Route::Profile
                | Route::UserManagement
        )
    }

    /// Pages that cannot render without a record payload.
    pub fn requires_payload(&self) -> bool {
        matches!(self, Route::AssetDetails | Route::MaintenanceLog)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Route::parse(s))
    }
}

/// Record handed to the next page along with the route.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Asset(Equipment),
    Substation(Substation),
    Fault(FaultLog),
}

/// A route plus its optional navigation state.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub route: Route,
    pub state: Option<Payload>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self { route, state: None }
    }

    pub fn with_state(route: Route, state: Payload) -> Self {
        Self {
            route,
            state: Some(state),
        }
    }

    /// The asset payload, if one was passed.
    pub fn asset(&self) -> Option<&Equipment> {
        match &self.state {
            Some(Payload::Asset(asset)) => Some(asset),
            _ => None,
        }
    }
}

/// The "no data" page shown in place of a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    /// Page that was requested.
    pub page: Route,
    pub title: String,
    /// The only action offered.
    pub recovery: Route,
    pub recovery_label: String,
}

impl Fallback {
    /// Asset pages entered without an asset.
    pub fn no_asset_data(page: Route) -> Self {
        Self {
            page,
            title: "No Asset Data".to_string(),
            recovery: Route::AssetHealth,
            recovery_label: "Back to Asset Health".to_string(),
        }
    }

    /// Substation page for an id the grid does not have.
    pub fn unknown_substation(id: &str) -> Self {
        Self {
            page: Route::Substation(id.to_string()),
            title: "Substation Not Found".to_string(),
            recovery: Route::GridMap,
            recovery_label: "Back to Grid Map".to_string(),
        }
    }

    pub fn page_not_found(path: &str) -> Self {
        Self {
            page: Route::NotFound(path.to_string()),
            title: "404 - Page Not Found".to_string(),
            recovery: Route::Home,
            recovery_label: "Return to Home".to_string(),
        }
    }
}

/// A detail page: either the data it needs or its fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<T> {
    Ready(T),
    Fallback(Fallback),
}

impl<T> DetailView<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, DetailView::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            DetailView::Ready(v) => Some(v),
            DetailView::Fallback(_) => None,
        }
    }

    pub fn fallback(&self) -> Option<&Fallback> {
        match self {
            DetailView::Ready(_) => None,
            DetailView::Fallback(f) => Some(f),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailView<U> {
        match self {
            DetailView::Ready(v) => DetailView::Ready(f(v)),
            DetailView::Fallback(fb) => DetailView::Fallback(fb),
        }
    }
}

/// Resolve the asset a detail page was opened for.
pub fn require_asset(nav: &Navigation) -> DetailView<Equipment> {
    match nav.asset() {
        Some(asset) => DetailView::Ready(asset.clone()),
        None => {
            tracing::warn!(page = %nav.route, "Detail page opened without asset payload");
            DetailView::Fallback(Fallback::no_asset_data(nav.route.clone()))
        }
    }
}

/// Route history with back navigation.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Navigation,
    backstack: Vec<Navigation>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start at the home page.
    pub fn new() -> Self {
        Self {
            current: Navigation::to(Route::Home),
            backstack: Vec::new(),
        }
    }

    pub fn current(&self) -> &Navigation {
        &self.current
    }

    pub fn navigate(&mut self, nav: Navigation) -> &Navigation {
        tracing::debug!(from = %self.current.route, to = %nav.route, "Navigate");
        let previous = std::mem::replace(&mut self.current, nav);
        self.backstack.push(previous);
        &self.current
    }

    /// Follow a fallback's recovery action.
    pub fn recover(&mut self, fallback: &Fallback) -> &Navigation {
        self.navigate(Navigation::to(fallback.recovery.clone()))
    }

    /// Return to the previous page. Returns `None` at the start of history.
    pub fn back(&mut self) -> Option<&Navigation> {
        let previous = self.backstack.pop()?;
        self.current = previous;
        Some(&self.current)
    }

    pub fn can_go_back(&self) -> bool {
        !self.backstack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ehv_core::datasets;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/grid-map"), Route::GridMap);
        assert_eq!(Route::parse("/maintenance-log/"), Route::MaintenanceLog);
        assert_eq!(Route::parse("/reports?tab=daily"), Route::Reports);
        assert_eq!(Route::parse("/substation/7"), Route::Substation("7".into()));
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(
            Route::parse("/substation/"),
            Route::NotFound("/substation/".to_string())
        );
        assert!(matches!(Route::parse("/substation/1/extra"), Route::NotFound(_)));
        assert_eq!(Route::parse("/substation/abc"), Route::Substation("abc".into()));
        assert_eq!(Route::parse("/substation/abc").title(), "Substation Details");
        assert!(matches!(Route::parse("/nowhere"), Route::NotFound(_)));
    }

    #[test]
    fn test_paths_round_trip() {
        for (path, route) in STATIC_ROUTES {
            assert_eq!(route.path(), *path);
            assert_eq!(&Route::parse(path), route);
        }
        assert_eq!(Route::Substation("12".into()).to_string(), "/substation/12");
    }

    #[test]
    fn test_layout_membership() {
        assert!(Route::AssetHealth.uses_main_layout());
        assert!(!Route::GridMap.uses_main_layout());
        assert!(!Route::Substation("1".into()).uses_main_layout());
    }

    #[test]
    fn test_missing_asset_falls_back() {
        let view = require_asset(&Navigation::to(Route::MaintenanceLog));
        let fallback = view.fallback().unwrap();
        assert_eq!(fallback.title, "No Asset Data");
        assert_eq!(fallback.recovery, Route::AssetHealth);
        assert_eq!(fallback.recovery_label, "Back to Asset Health");
    }

    #[test]
    fn test_wrong_payload_kind_falls_back() {
        let fault = datasets::fault_logs()[0].clone();
        let nav = Navigation::with_state(Route::AssetDetails, Payload::Fault(fault));
        assert!(!require_asset(&nav).is_ready());
    }

    #[test]
    fn test_asset_payload_ready() {
        let asset = datasets::equipment()[0].clone();
        let nav = Navigation::with_state(Route::AssetDetails, Payload::Asset(asset.clone()));
        assert_eq!(require_asset(&nav).ready(), Some(&asset));
    }

    #[test]
    fn test_navigator_back_and_recover() {
        let mut nav = Navigator::new();
        assert!(nav.back().is_none());

        nav.navigate(Navigation::to(Route::MaintenanceLog));
        let fallback = require_asset(nav.current()).fallback().cloned().unwrap();
        assert_eq!(nav.recover(&fallback).route, Route::AssetHealth);

        assert_eq!(nav.back().unwrap().route, Route::MaintenanceLog);
        assert_eq!(nav.back().unwrap().route, Route::Home);
        assert!(!nav.can_go_back());
    }
}
