use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// Species topologies are about to be built.
    SpeciesStart { total: u64 },
    /// One species finished building.
    SpeciesLoaded {
        residue_name: String,
        atoms: usize,
        drudes: usize,
    },
    SpeciesFinish,

    FileWritten { path: PathBuf },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards workflow events to an optional observer such as a progress bar.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        ProgressReporter::new().report(Progress::PhaseFinish);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let tag = match event {
                Progress::PhaseStart { name } => name.to_string(),
                Progress::SpeciesLoaded { residue_name, .. } => residue_name,
                other => format!("{other:?}"),
            };
            seen.lock().unwrap().push(tag);
        }));

        reporter.report(Progress::PhaseStart { name: "Reading" });
        reporter.report(Progress::SpeciesLoaded {
            residue_name: "EMI".to_string(),
            atoms: 19,
            drudes: 0,
        });
        reporter.report(Progress::PhaseFinish);
        drop(reporter);

        assert_eq!(
            seen.into_inner().unwrap(),
            vec!["Reading", "EMI", "PhaseFinish"]
        );
    }
}
