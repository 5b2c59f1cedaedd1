//! Home screen feature catalog and search

use archive_client::UserRecord;
use serde::Serialize;

/// Name used in the greeting when nobody is signed in
pub const DEFAULT_GREETING_NAME: &str = "Researcher";

/// A tile on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// Title
    pub title: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Icon name
    pub icon: &'static str,
}

/// Every feature tile, in display order
pub const FEATURES: [Feature; 6] = [
    Feature {
        title: "Thesis Analysis",
        description: "Advanced analysis tools for your research papers",
        icon: "analytics",
    },
    Feature {
        title: "Document Management",
        description: "Organize and manage all your thesis documents",
        icon: "document-text",
    },
    Feature {
        title: "Smart Search",
        description: "Find relevant research papers quickly",
        icon: "search",
    },
    Feature {
        title: "Progress Tracking",
        description: "Monitor your research progress and milestones",
        icon: "stats-chart",
    },
    Feature {
        title: "Thesis Library",
        description: "Access comprehensive thesis database",
        icon: "library",
    },
    Feature {
        title: "Research Trends",
        description: "Discover latest research trends and patterns",
        icon: "trending-up",
    },
];

/// A summary counter on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HomeStat {
    /// Label
    pub label: &'static str,
    /// Displayed value
    pub value: &'static str,
    /// Icon name
    pub icon: &'static str,
}

/// Summary counters, in display order
pub const HOME_STATS: [HomeStat; 3] = [
    HomeStat { label: "Active Projects", value: "12", icon: "folder-open" },
    HomeStat { label: "Completed", value: "48", icon: "checkmark-circle" },
    HomeStat { label: "In Progress", value: "8", icon: "timer" },
];

/// Features whose title or description contains `query`, ignoring case
///
/// An empty query matches everything.
pub fn filter_features(query: &str) -> Vec<Feature> {
    let needle = query.to_lowercase();
    FEATURES
        .iter()
        .filter(|f| {
            needle.is_empty()
                || f.title.to_lowercase().contains(&needle)
                || f.description.to_lowercase().contains(&needle)
        })
        .copied()
        .collect()
}

/// "1 result found" / "N results found"
pub fn results_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} result{plural} found")
}

/// Name shown after "Hello,"
pub fn greeting_name(user: Option<&UserRecord>) -> &str {
    match user {
        Some(user) if !user.name.is_empty() => &user.name,
        _ => DEFAULT_GREETING_NAME,
    }
}

/// Line under the greeting
pub fn hero_subtitle(query: &str) -> String {
    if query.is_empty() {
        "What would you like to explore today?".to_string()
    } else {
        format!("Searching for \"{query}\"")
    }
}

/// Home screen search state
#[derive(Debug, Clone, Default)]
pub struct FeatureSearch {
    query: String,
}

impl FeatureSearch {
    /// Start with an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Current query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Matching features
    pub fn results(&self) -> Vec<Feature> {
        filter_features(&self.query)
    }

    /// Label for the result count
    pub fn results_label(&self) -> String {
        results_label(self.results().len())
    }

    /// Whether to show the "No results found" placeholder
    pub fn shows_no_results(&self) -> bool {
        !self.query.is_empty() && self.results().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_all() {
        assert_eq!(filter_features("").len(), 6);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let titles: Vec<_> = filter_features("THESIS").iter().map(|f| f.title).collect();
        assert_eq!(titles, vec!["Thesis Analysis", "Document Management", "Thesis Library"]);
    }

    #[test]
    fn test_filter_matches_description() {
        let titles: Vec<_> = filter_features("milestones").iter().map(|f| f.title).collect();
        assert_eq!(titles, vec!["Progress Tracking"]);
    }

    #[test]
    fn test_results_label() {
        assert_eq!(results_label(0), "0 results found");
        assert_eq!(results_label(1), "1 result found");
        assert_eq!(results_label(6), "6 results found");
    }

    #[test]
    fn test_greeting_fallback() {
        assert_eq!(greeting_name(None), "Researcher");

        let user = UserRecord {
            id: "1".into(),
            name: "Leo".into(),
            id_number: "TUPT-20-0001".into(),
            birthdate: "2001-01-01".into(),
            age: None,
            created_at: None,
        };
        assert_eq!(greeting_name(Some(&user)), "Leo");
    }

    #[test]
    fn test_search_state() {
        let mut search = FeatureSearch::new();
        assert_eq!(search.results_label(), "6 results found");
        assert_eq!(hero_subtitle(search.query()), "What would you like to explore today?");

        search.set_query("trends");
        assert_eq!(search.results_label(), "1 result found");
        assert_eq!(hero_subtitle(search.query()), "Searching for \"trends\"");

        search.set_query("zzz");
        assert!(search.shows_no_results());
    }
}
