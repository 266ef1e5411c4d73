//! Progress reporting for question analysis

use askdata_application::StageProgressNotifier;
use askdata_domain::{FeasibilityLabel, Stage};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per stage
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn stage_display_name(stage: Stage) -> &'static str {
        match stage {
            Stage::Feasibility => "Checking feasibility",
            Stage::ChartSelection => "Selecting chart",
            Stage::QuerySynthesis => "Writing query",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StageProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::stage_display_name(stage));
        pb.set_message("waiting for backend...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_stage_complete(&self, _stage: Stage, success: bool) {
        let Some(pb) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        if success {
            pb.finish_with_message(format!("{}", "done".green()));
        } else {
            pb.abandon_with_message(format!("{}", "failed".red()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl StageProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage) {
        eprintln!(
            "{} {}",
            "->".cyan(),
            ProgressReporter::stage_display_name(stage).bold()
        );
    }

    fn on_stage_complete(&self, stage: Stage, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), stage);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), stage);
        }
    }

    fn on_feasibility(&self, label: FeasibilityLabel) {
        eprintln!("  {} {}", "=".cyan(), label);
    }
}
