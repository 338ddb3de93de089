//! Shared state types for the egui UI.

use egui::Color32;

use crate::charts::ChartImage;
use crate::validate::RawDonorInput;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Raw text held by the donor form fields.
    pub form: DonorFormState,
    /// Last successful prediction message, if any.
    pub prediction: Option<String>,
    /// Fixed error message shown when a submit was rejected.
    pub error: Option<String>,
    /// Status badge + text shown in the footer.
    pub status: StatusBarState,
    /// Visualization window state.
    pub charts: ChartPanelState,
}

/// Raw text of the four donor entry fields.
#[derive(Clone, Debug, Default)]
pub struct DonorFormState {
    pub recency: String,
    pub frequency: String,
    pub monetary: String,
    pub time: String,
}

impl DonorFormState {
    /// Borrow the field texts for validation.
    pub fn as_input(&self) -> RawDonorInput<'_> {
        RawDonorInput {
            recency: &self.recency,
            frequency: &self.frequency,
            monetary: &self.monetary,
            time: &self.time,
        }
    }
}

/// Coarse tone of the status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Info,
    Error,
}

/// Badge color for a status tone.
pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(120, 120, 120),
        StatusTone::Info => Color32::from_rgb(90, 176, 255),
        StatusTone::Error => Color32::from_rgb(220, 80, 80),
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Enter donor details and press Predict".into(),
            badge_label: "Idle".into(),
            badge_color: status_badge_color(StatusTone::Idle),
        }
    }
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Rendered charts plus the bookkeeping the renderer needs to know when to
/// re-upload textures.
#[derive(Clone, Debug, Default)]
pub struct ChartPanelState {
    /// Whether the visualization window is shown.
    pub open: bool,
    /// Bumped every time `images` is rebuilt.
    pub revision: u64,
    /// Rendered chart buffers in display order.
    pub images: Vec<ChartImage>,
}
