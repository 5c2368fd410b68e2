//! Static page routing with a client-side navigation history.

use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Conversion,
}

impl Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Page::Home => "Home",
                Page::Conversion => "Conversion",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub page: Page,
}

pub const ROUTES: [Route; 2] = [
    Route {
        path: "/",
        name: "home",
        page: Page::Home,
    },
    Route {
        path: "/conversion",
        name: "conversion",
        page: Page::Conversion,
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route matches path: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone)]
pub struct Router {
    base: String,
    routes: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::with_base("/")
    }
}

impl Router {
    /// Mounts the application routes under `base`, e.g. `/app`.
    pub fn with_base(base: &str) -> Self {
        let trimmed = base.trim_end_matches('/');
        Self {
            base: trimmed.to_string(),
            routes: ROUTES.to_vec(),
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Full location of a route including the base path.
    pub fn href(&self, route: &Route) -> String {
        if route.path == "/" && !self.base.is_empty() {
            return format!("{}/", self.base);
        }
        format!("{}{}", self.base, route.path)
    }

    /// Finds the route for a location. Query strings and fragments are ignored.
    pub fn resolve(&self, location: &str) -> Option<&Route> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location);
        let relative = path.strip_prefix(self.base.as_str())?;
        let relative = if relative.is_empty() { "/" } else { relative };
        self.routes.iter().find(|route| route.path == relative)
    }

    pub fn resolve_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }
}

/// Navigation stack over a [`Router`], starting at the home route.
#[derive(Debug, Clone)]
pub struct History {
    router: Router,
    entries: Vec<Route>,
}

impl History {
    pub fn new(router: Router) -> Self {
        let home = router.routes[0].clone();
        Self {
            router,
            entries: vec![home],
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn current(&self) -> &Route {
        // Never empty: starts with home and `back` keeps the first entry
        &self.entries[self.entries.len() - 1]
    }

    pub fn push(&mut self, location: &str) -> Result<&Route, RouteError> {
        let route = self
            .router
            .resolve(location)
            .cloned()
            .ok_or_else(|| RouteError::NotFound(location.to_string()))?;
        self.entries.push(route);
        Ok(self.current())
    }

    /// Goes back one entry. Returns `None` when already at the first entry.
    pub fn back(&mut self) -> Option<&Route> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        Some(self.current())
    }

    /// Visited routes, oldest first. Always holds at least the home route.
    pub fn entries(&self) -> &[Route] {
        &self.entries
    }
}
