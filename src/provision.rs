//! Batch provisioning.
//!
//! Binaries are ensured one after the other. A failure does not stop the
//! batch; every outcome is collected in a [`ProvisionReport`].

use crate::binary::{Binary, Ensured};
use crate::error::{BintoolError, Result};
use crate::ui::{format_duration, UserInterface};
use std::time::{Duration, Instant};

/// Outcome of ensuring one binary.
#[derive(Debug)]
pub struct ProvisionOutcome {
    pub name: String,
    pub result: Result<Ensured>,
    pub elapsed: Duration,
}

impl ProvisionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch, in the order the binaries were given.
#[derive(Debug, Default)]
pub struct ProvisionReport {
    outcomes: Vec<ProvisionOutcome>,
}

impl ProvisionReport {
    pub fn outcomes(&self) -> &[ProvisionOutcome] {
        &self.outcomes
    }

    /// Names of the binaries that could not be provisioned.
    pub fn failed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.name.as_str())
            .collect()
    }

    /// Number of binaries the origin had to install.
    pub fn installed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(Ensured::Installed)))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(ProvisionOutcome::is_success)
    }

    /// `Ok` when every binary was provisioned, `ProvisionFailed` otherwise.
    pub fn into_result(self) -> Result<()> {
        let failed: Vec<String> = self.failed().into_iter().map(String::from).collect();
        if failed.is_empty() {
            Ok(())
        } else {
            Err(BintoolError::ProvisionFailed { failed })
        }
    }
}

/// Ensure every binary, reporting progress through `ui`.
pub fn provision(binaries: &[Binary], ui: &mut dyn UserInterface) -> ProvisionReport {
    let mut report = ProvisionReport::default();

    for binary in binaries {
        ui.step(&format!("{} {}", binary.name(), binary.version()));

        let start = Instant::now();
        let result = binary.ensure();
        let elapsed = start.elapsed();

        match &result {
            Ok(Ensured::Present) => ui.success(&format!(
                "{} {} present ({})",
                binary.name(),
                binary.version(),
                format_duration(elapsed)
            )),
            Ok(Ensured::Installed) => ui.success(&format!(
                "{} {} installed ({})",
                binary.name(),
                binary.version(),
                format_duration(elapsed)
            )),
            Err(err) => {
                tracing::debug!("{} failed: {:?}", binary.name(), err);
                ui.error(&format!("{} ({})", err, format_duration(elapsed)))
            }
        }

        report.outcomes.push(ProvisionOutcome {
            name: binary.name().to_string(),
            result,
            elapsed,
        });
    }

    report
}
