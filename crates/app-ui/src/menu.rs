//! Hamburger side menu
//!
//! The user section is re-read from session storage every time the menu
//! opens, so it reflects logins and logouts made on other screens.

use app_state::{SessionContext, SessionStateError};
use archive_client::UserRecord;
use serde::Serialize;

use crate::navigation::{NavigationStack, Route};

/// Name shown when nobody is signed in
pub const GUEST_NAME: &str = "Guest User";

/// ID shown when nobody is signed in
pub const GUEST_ID_NUMBER: &str = "TUPT-00-0000";

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Icon name
    pub icon: &'static str,
    /// Label
    pub label: &'static str,
    /// Screen the entry opens, if it exists yet
    #[serde(skip)]
    pub route: Option<Route>,
}

/// Menu entries in display order
pub const MENU_ITEMS: [MenuItem; 6] = [
    MenuItem { icon: "home", label: "Home", route: Some(Route::Home) },
    MenuItem { icon: "document-text", label: "My Theses", route: None },
    MenuItem { icon: "analytics", label: "Analysis", route: Some(Route::ThesisAnalysis) },
    MenuItem { icon: "settings", label: "Settings", route: None },
    MenuItem { icon: "help-circle", label: "Help & Support", route: None },
    MenuItem { icon: "information-circle", label: "About", route: None },
];

/// Header block of the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSection {
    /// Display name
    pub name: String,
    /// Student ID
    pub id_number: String,
    /// "Age: N", only when the age is known
    pub age_line: Option<String>,
}

impl UserSection {
    /// Section for the given user, or the guest placeholder
    pub fn for_user(user: Option<&UserRecord>) -> Self {
        match user {
            Some(user) => Self {
                name: user.name.clone(),
                id_number: user.id_number.clone(),
                age_line: user.age.map(|age| format!("Age: {age}")),
            },
            None => Self {
                name: GUEST_NAME.to_string(),
                id_number: GUEST_ID_NUMBER.to_string(),
                age_line: None,
            },
        }
    }
}

/// Button at the bottom of the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MenuAction {
    /// Shown while signed in
    Logout,
    /// Shown while signed out
    Login,
}

/// Menu visibility and the user it shows
#[derive(Debug, Clone, Default)]
pub struct HamburgerMenu {
    visible: bool,
    user: Option<UserRecord>,
}

impl HamburgerMenu {
    /// Closed menu
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the menu and reload the user from storage
    ///
    /// The menu still opens when storage fails, showing the guest section.
    pub async fn open(&mut self, session: &SessionContext) -> Result<(), SessionStateError> {
        self.visible = true;
        match session.load().await {
            Ok(user) => {
                self.user = user;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load user for menu");
                self.user = None;
                Err(e)
            }
        }
    }

    /// Close the menu
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Whether the menu is shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// User block
    pub fn user_section(&self) -> UserSection {
        UserSection::for_user(self.user.as_ref())
    }

    /// Bottom button
    pub fn action(&self) -> MenuAction {
        if self.user.is_some() {
            MenuAction::Logout
        } else {
            MenuAction::Login
        }
    }

    /// An entry was tapped: close, then navigate when the entry has a screen
    pub fn select(&mut self, item: &MenuItem, nav: &mut NavigationStack) {
        self.close();
        tracing::debug!(label = item.label, "menu item selected");
        if let Some(route) = item.route {
            nav.navigate(route);
        }
    }

    /// Sign out, close, and go to the login screen
    pub async fn logout(
        &mut self,
        session: &SessionContext,
        nav: &mut NavigationStack,
    ) -> Result<(), SessionStateError> {
        session.clear().await?;
        self.user = None;
        self.close();
        nav.reset(Route::Login);
        Ok(())
    }

    /// Close and go to the login screen
    pub fn login(&mut self, nav: &mut NavigationStack) {
        self.close();
        nav.navigate(Route::Login);
    }
}
