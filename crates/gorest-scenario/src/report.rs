//! Per-step results of a scenario run

use std::fmt;

use tracing::{error, info, warn};

use crate::error::ScenarioError;

/// The lifecycle steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Create,
    List,
    Update,
    GetById,
    Delete,
    VerifyDeleted,
}

impl Step {
    /// All steps in the order a run executes them
    pub const ALL: [Step; 6] = [
        Step::Create,
        Step::List,
        Step::Update,
        Step::GetById,
        Step::Delete,
        Step::VerifyDeleted,
    ];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create user",
            Self::List => "list users",
            Self::Update => "update user",
            Self::GetById => "get user by ID",
            Self::Delete => "delete user",
            Self::VerifyDeleted => "verify user deleted",
        };
        f.write_str(name)
    }
}

/// How a step that did not fail ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Passed,
    Skipped { reason: String },
}

/// One executed step
#[derive(Debug)]
pub struct StepRecord {
    pub step: Step,
    pub result: Result<StepOutcome, ScenarioError>,
}

/// Results of a whole run
#[derive(Debug, Default)]
pub struct ScenarioReport {
    records: Vec<StepRecord>,
}

impl ScenarioReport {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step result and log it
    pub fn record(&mut self, step: Step, result: Result<StepOutcome, ScenarioError>) {
        match &result {
            Ok(StepOutcome::Passed) => info!(%step, "Step passed"),
            Ok(StepOutcome::Skipped { reason }) => warn!(%step, %reason, "Step skipped"),
            Err(e) => error!(%step, error = %e, "Step failed"),
        }
        self.records.push(StepRecord { step, result });
    }

    /// All records in execution order
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Result of a given step
    pub fn result(&self, step: Step) -> Option<&Result<StepOutcome, ScenarioError>> {
        self.records
            .iter()
            .find(|record| record.step == step)
            .map(|record| &record.result)
    }

    /// Steps that passed
    pub fn passed(&self) -> Vec<Step> {
        self.records
            .iter()
            .filter(|record| matches!(record.result, Ok(StepOutcome::Passed)))
            .map(|record| record.step)
            .collect()
    }

    /// Steps that were skipped
    pub fn skipped(&self) -> Vec<Step> {
        self.records
            .iter()
            .filter(|record| matches!(record.result, Ok(StepOutcome::Skipped { .. })))
            .map(|record| record.step)
            .collect()
    }

    /// Steps that failed, with their errors
    pub fn failures(&self) -> Vec<(Step, &ScenarioError)> {
        self.records
            .iter()
            .filter_map(|record| record.result.as_ref().err().map(|e| (record.step, e)))
            .collect()
    }

    /// True when no step failed
    pub fn is_success(&self) -> bool {
        self.records.iter().all(|record| record.result.is_ok())
    }

    /// Log a one-line summary
    pub fn log_summary(&self) {
        let passed = self.passed().len();
        let skipped = self.skipped().len();
        let failed = self.failures().len();
        if failed == 0 {
            info!(passed, skipped, failed, "Scenario finished");
        } else {
            error!(passed, skipped, failed, "Scenario finished with failures");
        }
    }
}
