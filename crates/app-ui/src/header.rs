//! Custom header with menu button and expanding search field

use serde::Serialize;

/// Search field width while collapsed
pub const SEARCH_COLLAPSED_WIDTH: f32 = 60.0;

/// Search field width while focused or holding a query
pub const SEARCH_EXPANDED_WIDTH: f32 = 250.0;

/// Width animation length in milliseconds
pub const SEARCH_ANIMATION_MS: u64 = 300;

/// Header search field state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSearch {
    query: String,
    expanded: bool,
}

impl HeaderSearch {
    /// Collapsed and empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Field gained focus
    pub fn focus(&mut self) {
        self.expanded = true;
    }

    /// Field lost focus; stays open while it holds a query
    pub fn blur(&mut self) {
        if self.query.is_empty() {
            self.expanded = false;
        }
    }

    /// Text changed
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Clear button pressed
    pub fn clear(&mut self) {
        self.query.clear();
        self.expanded = false;
    }

    /// Current query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the field is open
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether the clear button is shown
    pub fn shows_clear_button(&self) -> bool {
        !self.query.is_empty()
    }

    /// Width the field should animate toward
    pub fn target_width(&self) -> f32 {
        if self.expanded {
            SEARCH_EXPANDED_WIDTH
        } else {
            SEARCH_COLLAPSED_WIDTH
        }
    }
}
