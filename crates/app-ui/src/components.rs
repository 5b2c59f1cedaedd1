//! Presentation models for the shared widgets
//!
//! Each model is a plain, serializable description of what a widget should
//! draw. Rendering is left to the platform layer.

use app_core::thesis::AnalysisResult;
use app_core::validation::PasswordStrength;
use app_state::{Severity, ToastPhase, ToastState};
use serde::{Deserialize, Serialize};

// =============================================================================
// Toast
// =============================================================================

/// Background colour for a toast severity
pub fn toast_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "#4CAF50",
        Severity::Error => "#F44336",
        Severity::Warning => "#FF9800",
        Severity::Info => "#2196F3",
    }
}

/// What the toast surface should draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastView {
    /// Message text
    pub text: String,
    /// Background colour
    pub background_color: String,
    /// Opacity the surface should animate toward
    pub target_opacity: f32,
}

impl ToastView {
    /// Build the view for a dispatcher state; None when idle
    pub fn from_state(state: &ToastState) -> Option<Self> {
        let ToastState::Showing { message, phase } = state else {
            return None;
        };

        let target_opacity = match phase {
            ToastPhase::Entering | ToastPhase::Holding => 1.0,
            ToastPhase::Exiting => 0.0,
        };

        Some(Self {
            text: message.text.clone(),
            background_color: toast_color(message.severity).to_string(),
            target_opacity,
        })
    }
}

// =============================================================================
// Password Strength Meter
// =============================================================================

/// Bar under the password field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthMeter {
    /// Bar colour
    pub color: &'static str,
    /// Fill as a percentage of the track
    pub width_percent: u8,
    /// Label under the bar
    pub label: &'static str,
}

impl StrengthMeter {
    /// Meter for a strength tier
    pub fn for_strength(strength: PasswordStrength) -> Self {
        let (color, width_percent) = match strength {
            PasswordStrength::None => ("transparent", 0),
            PasswordStrength::Weak => ("#ff5252", 25),
            PasswordStrength::Medium => ("#ffb142", 50),
            PasswordStrength::Strong => ("#2ed573", 100),
        };
        Self { color, width_percent, label: strength.label() }
    }

    /// Whether the meter is drawn at all
    pub fn is_visible(&self) -> bool {
        self.width_percent > 0
    }
}

// =============================================================================
// Analysis Score Card
// =============================================================================

/// Header card of an analysis report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    /// Score as displayed, e.g. "82"
    pub score: String,
    /// Scale suffix
    pub scale: &'static str,
    /// Badge text, e.g. "High Confidence"
    pub confidence_badge: String,
}

impl ScoreCard {
    /// Card for a result
    pub fn for_result(result: &AnalysisResult) -> Self {
        Self {
            score: result.score.to_string(),
            scale: "/100",
            confidence_badge: format!("{} Confidence", result.confidence),
        }
    }
}
