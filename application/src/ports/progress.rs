//! Progress notification port
//!
//! Defines the interface for reporting stage progress while a question is
//! being analysed.

use askdata_domain::{FeasibilityLabel, Stage};

/// Callback for progress updates during analysis
///
/// Implementations live in the presentation layer.
pub trait StageProgressNotifier: Send + Sync {
    /// Called before the backend call of a stage
    fn on_stage_start(&self, stage: Stage);

    /// Called once the stage has produced a validated value or failed
    fn on_stage_complete(&self, stage: Stage, success: bool);

    /// Called when the feasibility label is known
    fn on_feasibility(&self, _label: FeasibilityLabel) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl StageProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage) {}
    fn on_stage_complete(&self, _stage: Stage, _success: bool) {}
}
