//! Core data types for Provar property-based testing.

use crate::error::{ProvarError, Result};
use std::any::{type_name, Any};
use std::fmt;

/// Outcome of evaluating a predicate on a single case.
///
/// A check either passes or fails with a reason. The reason is the only
/// state, so "failed" and "has a reason" cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckResult {
    reason: Option<String>,
}

impl CheckResult {
    /// The case passed.
    pub fn pass() -> Self {
        CheckResult { reason: None }
    }

    /// The case failed for the given reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        CheckResult {
            reason: Some(reason.into()),
        }
    }

    /// Pass when `condition` holds, otherwise fail with `reason`.
    pub fn require(condition: bool, reason: impl Into<String>) -> Self {
        if condition {
            Self::pass()
        } else {
            Self::fail(reason)
        }
    }

    pub fn is_failed(&self) -> bool {
        self.reason.is_some()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub(crate) fn into_reason(self) -> Option<String> {
        self.reason
    }
}

/// A single value of a type only known at the moment it was stored.
///
/// Created when a case fails. Reading it back requires naming the stored
/// type again; a mismatched request is a hard error, never a silent
/// reinterpretation.
pub struct ErasedValue {
    value: Box<dyn Any>,
    type_name: &'static str,
}

impl ErasedValue {
    pub fn new<T: Any>(value: T) -> Self {
        ErasedValue {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// The name of the stored type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the stored value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the stored value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Result<&T> {
        self.value
            .downcast_ref::<T>()
            .ok_or(ProvarError::TypeMismatch {
                stored: self.type_name,
                requested: type_name::<T>(),
            })
    }

    /// Take the stored value out as a `T`.
    pub fn downcast<T: Any>(self) -> Result<T> {
        let stored = self.type_name;
        match self.value.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(_) => Err(ProvarError::TypeMismatch {
                stored,
                requested: type_name::<T>(),
            }),
        }
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErasedValue({})", self.type_name)
    }
}

/// Accumulated statistics and terminal failure state for one test.
///
/// The same result accumulates across multiple runs of its owning
/// executor (random pass, then edge pass) until explicitly cleared.
/// A result already carrying a failure refuses further runs so that an
/// unacknowledged failure is never silently overwritten.
#[derive(Debug, Default)]
pub struct TestResult {
    /// Short description of what is being tested.
    pub summary: String,
    /// Description of the case set used by the most recent run.
    pub last_case_description: String,
    /// The first failing value, if any.
    pub failed_case: Option<ErasedValue>,
    /// Why that value failed.
    pub reason: Option<String>,
    pub pass_count: u64,
    pub skip_count: u64,
}

impl TestResult {
    pub fn new(summary: impl Into<String>) -> Self {
        TestResult {
            summary: summary.into(),
            ..TestResult::default()
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failed_case.is_some()
    }

    /// Forget the recorded failure so the executor may run again.
    /// Counters are kept.
    pub fn clear_error(&mut self) {
        self.failed_case = None;
        self.reason = None;
    }

    /// Reset failure state and counters. The summary is kept.
    pub fn clear_all(&mut self) {
        self.clear_error();
        self.pass_count = 0;
        self.skip_count = 0;
    }
}

/// Result of running one logical test across an ordered list of types.
#[derive(Debug, Default)]
pub struct SequentialTestResult {
    /// The last active type's result; on failure, the failing type's result.
    pub result: TestResult,
    /// Index of the failing type in the list. Only meaningful when
    /// `result` denotes failure; left at 0 when every type passed.
    pub failed_index: usize,
}

impl SequentialTestResult {
    pub fn is_failed(&self) -> bool {
        self.result.is_failed()
    }
}
