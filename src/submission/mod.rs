//! The outbound side of a form submission.
//!
//! [`SubmissionEndpoint`] is the seam a real network call plugs into; the
//! site ships with [`SimulatedEndpoint`], which waits a fixed delay and then
//! succeeds most of the time.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use futures_timer::Delay;
use rand::Rng;

use crate::form::{FieldKey, FormModel};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubmissionPayload {
    values: BTreeMap<String, String>,
}

impl SubmissionPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_model<T: FormModel>(model: &T) -> Self {
        model.field_values().into_iter().collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl FromIterator<(FieldKey, String)> for SubmissionPayload {
    fn from_iter<I: IntoIterator<Item = (FieldKey, String)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.as_str().to_string(), value))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionError {
    Rejected(String),
    TimedOut(Duration),
    Panicked(String),
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionError::Rejected(reason) => write!(f, "submission rejected: {reason}"),
            SubmissionError::TimedOut(after) => {
                write!(f, "submission timed out after {}ms", after.as_millis())
            }
            SubmissionError::Panicked(message) => write!(f, "submission panicked: {message}"),
        }
    }
}

impl std::error::Error for SubmissionError {}

pub type SubmissionResult = Result<(), SubmissionError>;

pub type BoxedSubmissionFuture<'a> = Pin<Box<dyn Future<Output = SubmissionResult> + Send + 'a>>;

pub trait SubmissionEndpoint: Send + Sync {
    fn submit<'a>(&'a self, payload: &'a SubmissionPayload) -> BoxedSubmissionFuture<'a>;
}

impl<F> SubmissionEndpoint for F
where
    F: for<'a> Fn(&'a SubmissionPayload) -> BoxedSubmissionFuture<'a> + Send + Sync,
{
    fn submit<'a>(&'a self, payload: &'a SubmissionPayload) -> BoxedSubmissionFuture<'a> {
        (self)(payload)
    }
}

/// Stand-in for a real backend: resolves after `delay`, succeeding with
/// probability `success_rate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulatedEndpoint {
    pub delay: Duration,
    pub success_rate: f64,
}

impl Default for SimulatedEndpoint {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
            success_rate: 0.9,
        }
    }
}

impl SimulatedEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(mut self, value: Duration) -> Self {
        self.delay = value;
        self
    }

    /// Clamped to `0.0..=1.0`. A NaN rate is ignored.
    pub fn success_rate(mut self, value: f64) -> Self {
        if value.is_nan() {
            log::warn!("ignoring NaN success rate, keeping {}", self.success_rate);
            return self;
        }
        self.success_rate = value.clamp(0.0, 1.0);
        self
    }

    /// The rate actually used for a submission; a NaN field counts as 0.
    fn effective_success_rate(&self) -> f64 {
        if self.success_rate.is_nan() {
            0.0
        } else {
            self.success_rate.clamp(0.0, 1.0)
        }
    }
}

impl SubmissionEndpoint for SimulatedEndpoint {
    fn submit<'a>(&'a self, payload: &'a SubmissionPayload) -> BoxedSubmissionFuture<'a> {
        Box::pin(async move {
            log::debug!("simulating submission of {} fields", payload.len());
            Delay::new(self.delay).await;
            if rand::rng().random_bool(self.effective_success_rate()) {
                Ok(())
            } else {
                Err(SubmissionError::Rejected("Submission failed".to_string()))
            }
        })
    }
}
