//! Application wiring
//!
//! [`App`] owns the process-wide services and hands them to the screen
//! flows it creates.

use anyhow::Context;
use app_core::{AuthApi, LoginFlow, ProfileFlow, RegisterFlow, SubmitError, ThesisAnalysisFlow};
use app_state::{KvSessionStore, SessionContext, SessionStateError, ToastDispatcher, ToastSurface};
use app_ui::{HamburgerMenu, NavigationStack, Route};
use archive_client::{ArchiveClient, UserRecord};
use chrono::NaiveDate;
use std::sync::Arc;
use storage::KvStore;

use crate::config::AppConfig;

/// The running client
pub struct App {
    config: AppConfig,
    toasts: Arc<ToastDispatcher>,
    session: Arc<SessionContext>,
    api: Arc<dyn AuthApi>,
    navigation: NavigationStack,
    menu: HamburgerMenu,
}

impl App {
    /// Open storage, build the HTTP client, and restore any saved session
    pub async fn bootstrap(config: AppConfig) -> anyhow::Result<Self> {
        let kv = match config.kv_config() {
            Some(kv_config) => KvStore::new(kv_config).context("opening session store")?,
            None => KvStore::in_memory().context("opening in-memory session store")?,
        };

        let client =
            ArchiveClient::new(config.client_config()).context("building HTTP client")?;

        let session = Arc::new(SessionContext::new(Arc::new(KvSessionStore::new(kv))));
        let restored = session.load().await.context("restoring session")?;

        tracing::info!(
            api = %config.api_base_url,
            signed_in = restored.is_some(),
            "application started"
        );

        Ok(Self {
            config,
            toasts: Arc::new(ToastDispatcher::new()),
            session,
            api: Arc::new(client),
            navigation: NavigationStack::default(),
            menu: HamburgerMenu::new(),
        })
    }

    /// Configuration in effect
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Toast dispatcher
    pub fn toasts(&self) -> &Arc<ToastDispatcher> {
        &self.toasts
    }

    /// Attach the one toast rendering surface
    pub fn attach_toast_surface(&self) -> anyhow::Result<ToastSurface> {
        Ok(self.toasts.attach_surface()?)
    }

    /// Session context
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Signed-in user
    pub fn current_user(&self) -> Option<UserRecord> {
        self.session.current()
    }

    /// Navigation stack
    pub fn navigation(&self) -> &NavigationStack {
        &self.navigation
    }

    /// Mutable navigation stack
    pub fn navigation_mut(&mut self) -> &mut NavigationStack {
        &mut self.navigation
    }

    /// Hamburger menu
    pub fn menu(&self) -> &HamburgerMenu {
        &self.menu
    }

    /// Today's date in local time
    pub fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    /// Flow for the registration screen
    pub fn register_flow(&self) -> RegisterFlow {
        RegisterFlow::new(Arc::clone(&self.api), Arc::clone(&self.toasts))
    }

    /// Flow for the login screen
    pub fn login_flow(&self) -> LoginFlow {
        LoginFlow::new(Arc::clone(&self.api), Arc::clone(&self.toasts), Arc::clone(&self.session))
    }

    /// Flow for the profile screen
    pub fn profile_flow(&self) -> ProfileFlow {
        ProfileFlow::new(Arc::clone(&self.api), Arc::clone(&self.toasts), Arc::clone(&self.session))
    }

    /// Flow for the thesis analysis screen
    pub fn thesis_flow(&self) -> ThesisAnalysisFlow {
        ThesisAnalysisFlow::new(Arc::clone(&self.toasts), self.config.analysis_config())
    }

    /// Submit registration; on success move to the login screen
    pub async fn submit_registration(
        &mut self,
        flow: &RegisterFlow,
        today: NaiveDate,
    ) -> Result<String, SubmitError> {
        let message = flow.submit(today).await?;
        self.navigation.navigate(Route::Login);
        Ok(message)
    }

    /// Submit login; on success the home screen becomes the root
    pub async fn submit_login(&mut self, flow: &LoginFlow) -> Result<UserRecord, SubmitError> {
        let user = flow.submit().await?;
        self.navigation.reset(Route::Home);
        Ok(user)
    }

    /// Open the side menu
    pub async fn open_menu(&mut self) -> Result<(), SessionStateError> {
        self.menu.open(&self.session).await
    }

    /// Close the side menu
    pub fn close_menu(&mut self) {
        self.menu.close();
    }

    /// Log out through the side menu
    pub async fn logout(&mut self) -> Result<(), SessionStateError> {
        self.menu.logout(&self.session, &mut self.navigation).await
    }
}
