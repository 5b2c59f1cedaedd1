//! Toast notification channel
//!
//! A single-slot notification surface shared by every screen. Screens
//! publish through [`ToastDispatcher::show`]; exactly one rendering surface
//! observes the state through a [`ToastSurface`].
//!
//! There is no queue. A new `show` replaces whatever is on screen and
//! restarts the fade-in → hold → fade-out sequence; the timer belonging to
//! the replaced message can no longer change the state.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Fade-in animation length
pub const FADE_IN_DURATION: Duration = Duration::from_millis(300);

/// Time a toast stays fully visible
pub const HOLD_DURATION: Duration = Duration::from_millis(2000);

/// Fade-out animation length
pub const FADE_OUT_DURATION: Duration = Duration::from_millis(300);

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational notification
    #[default]
    Info,
    /// Success notification
    Success,
    /// Warning notification
    Warning,
    /// Error notification
    Error,
}

impl Severity {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message handed to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastMessage {
    /// Unique identifier of this `show` call
    pub id: String,
    /// Message text
    pub text: String,
    /// Severity
    pub severity: Severity,
}

impl ToastMessage {
    fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), text: text.into(), severity }
    }
}

/// Animation phase of a visible toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastPhase {
    /// Fading in
    Entering,
    /// Fully visible
    Holding,
    /// Fading out
    Exiting,
}

/// Dispatcher state observed by the rendering surface
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ToastState {
    /// Nothing on screen
    #[default]
    Idle,
    /// A message is on screen
    Showing {
        /// The message
        message: ToastMessage,
        /// Current animation phase
        phase: ToastPhase,
    },
}

impl ToastState {
    /// Whether a message is on screen
    pub fn is_visible(&self) -> bool {
        matches!(self, ToastState::Showing { .. })
    }

    /// The visible message, if any
    pub fn message(&self) -> Option<&ToastMessage> {
        match self {
            ToastState::Showing { message, .. } => Some(message),
            ToastState::Idle => None,
        }
    }

    /// The current phase, if visible
    pub fn phase(&self) -> Option<ToastPhase> {
        match self {
            ToastState::Showing { phase, .. } => Some(*phase),
            ToastState::Idle => None,
        }
    }
}

/// Display sequence timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    /// Fade-in length
    pub fade_in: Duration,
    /// Hold length
    pub hold: Duration,
    /// Fade-out length
    pub fade_out: Duration,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self { fade_in: FADE_IN_DURATION, hold: HOLD_DURATION, fade_out: FADE_OUT_DURATION }
    }
}

impl ToastTiming {
    /// Time from `show` until the dispatcher is idle again
    pub fn total(&self) -> Duration {
        self.fade_in + self.hold + self.fade_out
    }
}

/// Toast dispatcher errors
#[derive(Debug, thiserror::Error)]
pub enum ToastError {
    /// A second rendering surface tried to attach
    #[error("A toast surface is already attached")]
    SurfaceAlreadyAttached,
}

/// Single-slot, pre-empting notification dispatcher
///
/// # Example
///
/// ```no_run
/// use app_state::toast::{Severity, ToastDispatcher};
///
/// #[tokio::main]
/// async fn main() {
///     let toasts = ToastDispatcher::new();
///     let mut surface = toasts.attach_surface().unwrap();
///
///     toasts.show("Please fill in all fields", Severity::Error);
///
///     while let Some(state) = surface.next().await {
///         if !state.is_visible() {
///             break;
///         }
///     }
/// }
/// ```
pub struct ToastDispatcher {
    state_tx: Arc<watch::Sender<ToastState>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    surface_attached: AtomicBool,
    timing: ToastTiming,
}

impl ToastDispatcher {
    /// Create a dispatcher with the default timing
    pub fn new() -> Self {
        Self::with_timing(ToastTiming::default())
    }

    /// Create a dispatcher with custom timing
    pub fn with_timing(timing: ToastTiming) -> Self {
        let (state_tx, _) = watch::channel(ToastState::Idle);
        Self {
            state_tx: Arc::new(state_tx),
            timer: Mutex::new(None),
            surface_attached: AtomicBool::new(false),
            timing,
        }
    }

    /// Show a message, replacing whatever is currently displayed
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime; the display sequence
    /// runs on a spawned timer task.
    pub fn show(&self, text: impl Into<String>, severity: Severity) -> ToastMessage {
        let message = ToastMessage::new(text, severity);

        let mut timer = self.timer.lock();
        if let Some(previous) = timer.take() {
            previous.abort();
        }

        tracing::debug!(severity = %severity, text = %message.text, "showing toast");
        self.state_tx.send_replace(ToastState::Showing {
            message: message.clone(),
            phase: ToastPhase::Entering,
        });

        let state_tx = Arc::clone(&self.state_tx);
        let timing = self.timing;
        let id = message.id.clone();

        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(timing.fade_in).await;
            if !advance(&state_tx, &id, Some(ToastPhase::Holding)) {
                return;
            }

            tokio::time::sleep(timing.hold).await;
            if !advance(&state_tx, &id, Some(ToastPhase::Exiting)) {
                return;
            }

            tokio::time::sleep(timing.fade_out).await;
            advance(&state_tx, &id, None);
        }));

        message
    }

    /// Show an info toast
    pub fn info(&self, text: impl Into<String>) -> ToastMessage {
        self.show(text, Severity::Info)
    }

    /// Show a success toast
    pub fn success(&self, text: impl Into<String>) -> ToastMessage {
        self.show(text, Severity::Success)
    }

    /// Show a warning toast
    pub fn warning(&self, text: impl Into<String>) -> ToastMessage {
        self.show(text, Severity::Warning)
    }

    /// Show an error toast
    pub fn error(&self, text: impl Into<String>) -> ToastMessage {
        self.show(text, Severity::Error)
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ToastState {
        self.state_tx.borrow().clone()
    }

    /// Attach the rendering surface
    ///
    /// Only one surface may ever attach; later attempts fail.
    pub fn attach_surface(&self) -> Result<ToastSurface, ToastError> {
        if self.surface_attached.swap(true, Ordering::SeqCst) {
            return Err(ToastError::SurfaceAlreadyAttached);
        }
        Ok(ToastSurface { rx: self.state_tx.subscribe() })
    }

    /// Configured timing
    pub fn timing(&self) -> ToastTiming {
        self.timing
    }
}

impl Default for ToastDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ToastDispatcher {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.lock().take() {
            timer.abort();
        }
    }
}

/// Move the message `id` to the next phase, or to idle when `next` is None.
///
/// Returns false when `id` is no longer the displayed message.
fn advance(state_tx: &watch::Sender<ToastState>, id: &str, next: Option<ToastPhase>) -> bool {
    state_tx.send_if_modified(|state| {
        let next_state = match state {
            ToastState::Showing { message, .. } if message.id == id => match next {
                Some(phase) => ToastState::Showing { message: message.clone(), phase },
                None => ToastState::Idle,
            },
            _ => return false,
        };
        *state = next_state;
        true
    })
}

/// The one rendering surface attached to a [`ToastDispatcher`]
pub struct ToastSurface {
    rx: watch::Receiver<ToastState>,
}

impl ToastSurface {
    /// Current state without waiting
    pub fn current(&self) -> ToastState {
        self.rx.borrow().clone()
    }

    /// Wait for the next state change
    ///
    /// Intermediate states may be coalesced; the newest state is returned.
    /// Returns None once the dispatcher is dropped.
    pub async fn next(&mut self) -> Option<ToastState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    /// Paused-clock timers round up to the next millisecond tick.
    fn assert_elapsed(start: Instant, expected_ms: u64) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_millis(expected_ms)
                && elapsed < Duration::from_millis(expected_ms + 10),
            "elapsed {elapsed:?}, expected ~{expected_ms}ms"
        );
    }

    async fn drain_until_idle(surface: &mut ToastSurface) -> Vec<ToastState> {
        let mut seen = Vec::new();
        while let Some(state) = surface.next().await {
            let idle = !state.is_visible();
            seen.push(state);
            if idle {
                break;
            }
        }
        seen
    }

    #[test]
    fn test_severity_serde_and_display() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
        let parsed: Severity = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, Severity::Error);
        assert_eq!(Severity::default(), Severity::Info);
        assert_eq!(format!("{}", Severity::Success), "success");
    }

    #[test]
    fn test_default_timing_total() {
        assert_eq!(ToastTiming::default().total(), Duration::from_millis(2600));
    }

    #[test]
    fn test_state_accessors() {
        assert!(!ToastState::Idle.is_visible());
        assert_eq!(ToastState::Idle.message(), None);

        let state = ToastState::Showing {
            message: ToastMessage::new("hi", Severity::Info),
            phase: ToastPhase::Holding,
        };
        assert!(state.is_visible());
        assert_eq!(state.message().map(|m| m.text.as_str()), Some("hi"));
        assert_eq!(state.phase(), Some(ToastPhase::Holding));
    }

    #[tokio::test]
    async fn test_show_is_visible_immediately() {
        let toasts = ToastDispatcher::new();
        let message = toasts.error("Passwords do not match");

        let state = toasts.state();
        assert_eq!(state.message(), Some(&message));
        assert_eq!(state.phase(), Some(ToastPhase::Entering));
        assert_eq!(message.severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_second_surface_is_rejected() {
        let toasts = ToastDispatcher::new();
        let _surface = toasts.attach_surface().unwrap();
        assert!(matches!(toasts.attach_surface(), Err(ToastError::SurfaceAlreadyAttached)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_display_sequence() {
        let toasts = ToastDispatcher::new();
        let mut surface = toasts.attach_surface().unwrap();

        let start = Instant::now();
        toasts.info("Profile updated successfully!");

        let phases: Vec<Option<ToastPhase>> =
            drain_until_idle(&mut surface).await.iter().map(|s| s.phase()).collect();

        assert_eq!(
            phases,
            vec![
                Some(ToastPhase::Entering),
                Some(ToastPhase::Holding),
                Some(ToastPhase::Exiting),
                None
            ]
        );
        assert_elapsed(start, 2600);
        assert_eq!(toasts.state(), ToastState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newest_show_preempts() {
        let toasts = ToastDispatcher::new();
        let mut surface = toasts.attach_surface().unwrap();

        toasts.info("A");
        tokio::time::sleep(Duration::from_millis(1000)).await;

        let preempted_at = Instant::now();
        toasts.error("B");

        let seen = drain_until_idle(&mut surface).await;

        for state in &seen[..seen.len() - 1] {
            assert_eq!(state.message().map(|m| m.text.as_str()), Some("B"));
        }
        assert_eq!(seen.last(), Some(&ToastState::Idle));
        // A's sequence would have ended 1600ms after B appeared; B runs its full course.
        assert_elapsed(preempted_at, 2600);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preempted_timer_does_not_touch_new_message() {
        let toasts = ToastDispatcher::new();

        toasts.info("A");
        tokio::time::sleep(Duration::from_millis(2500)).await;
        let b = toasts.warning("B");

        // Past the point where A would have gone idle.
        tokio::time::sleep(Duration::from_millis(200)).await;
        let state = toasts.state();
        assert_eq!(state.message(), Some(&b));
        assert_eq!(state.phase(), Some(ToastPhase::Entering));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_timing() {
        let timing = ToastTiming {
            fade_in: Duration::from_millis(10),
            hold: Duration::from_millis(20),
            fade_out: Duration::from_millis(10),
        };
        let toasts = ToastDispatcher::with_timing(timing);
        let mut surface = toasts.attach_surface().unwrap();

        let start = Instant::now();
        toasts.success("ok");
        drain_until_idle(&mut surface).await;

        assert_elapsed(start, 40);
        assert_eq!(toasts.timing(), timing);
    }
}
