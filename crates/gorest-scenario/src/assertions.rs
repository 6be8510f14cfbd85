//! Response expectations shared by the steps

use std::fmt::Debug;

use gorest_http::{ResponseEnvelope, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::{Result, ScenarioError},
    report::Step,
};

pub(crate) fn expect_status(
    step: Step,
    response: &ResponseEnvelope,
    expected: StatusCode,
) -> Result<()> {
    if response.status() == expected {
        Ok(())
    } else {
        Err(ScenarioError::assertion(
            step,
            format!("expected status {expected}, got {}", response.status()),
        ))
    }
}

pub(crate) fn expect_eq<T>(step: Step, field: &str, expected: &T, actual: &T) -> Result<()>
where
    T: PartialEq + Debug + ?Sized,
{
    if expected == actual {
        Ok(())
    } else {
        Err(ScenarioError::assertion(
            step,
            format!("expected {field} to be {expected:?}, got {actual:?}"),
        ))
    }
}

pub(crate) fn decode<T: DeserializeOwned>(step: Step, response: &ResponseEnvelope) -> Result<T> {
    response.json().map_err(|e| {
        ScenarioError::assertion(
            step,
            format!("unexpected response body ({e}): {}", response.text()),
        )
    })
}
