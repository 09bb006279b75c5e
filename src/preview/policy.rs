/// What the preview must do when the limit is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedAction {
    /// Pause, rewind to zero and fire the gate prompt.
    PauseRewindAndPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewDecision {
    pub allow: bool,
    pub forced: Option<ForcedAction>,
}

impl PreviewDecision {
    const ALLOW: Self = Self {
        allow: true,
        forced: None,
    };
}

/// Decide whether playback at `elapsed` seconds may continue.
///
/// Unknown (non-finite) positions are allowed; the next real tick decides.
pub fn enforce(elapsed: f64, locked: bool, threshold: f64) -> PreviewDecision {
    if locked && elapsed.is_finite() && elapsed >= threshold {
        PreviewDecision {
            allow: false,
            forced: Some(ForcedAction::PauseRewindAndPrompt),
        }
    } else {
        PreviewDecision::ALLOW
    }
}

/// Clamp a seek target (seconds) to what the gate allows.
pub fn clamp_seek(target: f64, locked: bool, threshold: f64) -> f64 {
    let target = target.max(0.0);
    if locked { target.min(threshold) } else { target }
}
