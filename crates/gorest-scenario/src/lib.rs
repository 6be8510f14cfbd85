//! End-to-end user lifecycle scenario
//!
//! Drives create → list → update → get → delete → verify-deleted against the
//! user endpoints, asserting the response contract at every step. State
//! between steps lives in an explicit [`ScenarioContext`].
//!
//! ```ignore
//! use gorest_config::ConfigManager;
//! use gorest_scenario::{telemetry, UserLifecycle};
//!
//! telemetry::init_tracing();
//! let config = ConfigManager::new().load()?;
//! let report = UserLifecycle::from_config(&config)?.run().await;
//! assert!(report.is_success());
//! ```

mod assertions;
pub mod context;
pub mod error;
pub mod lifecycle;
pub mod report;
pub mod telemetry;

pub use context::{CreatedUser, ScenarioContext};
pub use error::{Result, ScenarioError};
pub use lifecycle::{PreconditionPolicy, UserLifecycle, NOT_FOUND_MESSAGE, USERS_PATH};
pub use report::{ScenarioReport, Step, StepOutcome, StepRecord};
