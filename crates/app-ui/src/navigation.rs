//! Navigation for the archive client
//!
//! A single stack of routes starting at the landing screen.

use serde::{Deserialize, Serialize};

// =============================================================================
// Route Definitions
// =============================================================================

/// Every screen in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Route {
    /// Welcome screen with Login / Register buttons
    #[default]
    Landing,
    /// Login form
    Login,
    /// Registration form
    Register,
    /// Home dashboard
    Home,
    /// Profile view and edit
    Profile,
    /// Thesis upload and analysis
    ThesisAnalysis,
}

impl Route {
    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Welcome",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Home => "Home",
            Route::Profile => "Profile",
            Route::ThesisAnalysis => "Thesis Analysis",
        }
    }

    /// Whether the screen shows the custom header with menu and search
    pub fn has_header(&self) -> bool {
        matches!(self, Route::Home | Route::ThesisAnalysis)
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self { route, key: uuid::Uuid::new_v4().to_string() }
    }
}

/// Navigation stack
///
/// The root entry can be replaced but never popped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStack {
    root: StackEntry,
    /// Entries above the root, bottom to top
    above: Vec<StackEntry>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

impl NavigationStack {
    /// Create a stack with a root route
    pub fn new(root: Route) -> Self {
        Self { root: StackEntry::new(root), above: Vec::new() }
    }

    /// Push a route
    pub fn push(&mut self, route: Route) {
        tracing::debug!(route = route.title(), "push");
        self.above.push(StackEntry::new(route));
    }

    /// Go to `route`: pops back to it when it is already on the stack,
    /// pushes it otherwise
    pub fn navigate(&mut self, route: Route) {
        if self.root.route == route {
            self.above.clear();
        } else if let Some(at) = self.above.iter().position(|e| e.route == route) {
            self.above.truncate(at + 1);
        } else {
            self.push(route);
        }
    }

    /// Pop the top route; false when already at the root
    pub fn pop(&mut self) -> bool {
        self.above.pop().is_some()
    }

    /// Replace the top route
    pub fn replace(&mut self, route: Route) {
        match self.above.last_mut() {
            Some(top) => *top = StackEntry::new(route),
            None => self.root = StackEntry::new(route),
        }
    }

    /// Reset to a single new root
    pub fn reset(&mut self, route: Route) {
        self.root = StackEntry::new(route);
        self.above.clear();
    }

    /// The visible route
    pub fn current(&self) -> Route {
        self.current_entry().route
    }

    /// The visible entry
    pub fn current_entry(&self) -> &StackEntry {
        self.above.last().unwrap_or(&self.root)
    }

    /// Whether back navigation is possible
    pub fn can_go_back(&self) -> bool {
        !self.above.is_empty()
    }

    /// Number of entries including the root
    pub fn depth(&self) -> usize {
        self.above.len() + 1
    }

    /// Routes bottom to top
    pub fn routes(&self) -> Vec<Route> {
        std::iter::once(&self.root).chain(&self.above).map(|e| e.route).collect()
    }
}
