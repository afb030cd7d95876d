use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use packpsf::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(target);
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();

        Box::new(move |progress: Progress| match pb.lock() {
            Ok(guard) => Self::render(&guard, progress),
            Err(_) => warn!("Progress bar mutex was poisoned. Cannot update progress."),
        })
    }

    fn render(pb: &ProgressBar, progress: Progress) {
        match progress {
            Progress::PhaseStart { name } => {
                pb.reset();
                pb.set_length(0);
                pb.set_style(Self::spinner_style());
                pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                pb.set_message(name);
            }
            Progress::PhaseFinish => {
                pb.disable_steady_tick();
                pb.finish_with_message("✓ Done");
            }
            Progress::SpeciesStart { total } => {
                pb.disable_steady_tick();
                pb.reset();
                pb.set_length(total);
                pb.set_style(Self::bar_style());
            }
            Progress::SpeciesLoaded {
                residue_name,
                atoms,
                drudes,
            } => {
                pb.inc(1);
                pb.set_message(format!("{residue_name} ({atoms} atoms, {drudes} Drude)"));
            }
            Progress::SpeciesFinish => {
                if let Some(length) = pb.length() {
                    pb.set_position(length);
                }
                pb.finish();
            }
            Progress::FileWritten { path } => pb.println(format!("  Wrote {}", path.display())),
            Progress::Message(msg) if pb.is_finished() => pb.set_message(msg),
            Progress::Message(msg) => pb.println(format!("  {msg}")),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<32} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
