//! The single-type test executor.
//!
//! A [`Property`] binds a predicate and an optional precondition to one
//! parameter type and accumulates pass/skip/failure statistics into a
//! [`TestResult`] by pulling cases from a generator.

use crate::data::{CheckResult, ErasedValue, TestResult};
use crate::gen::Generator;
use std::any::Any;

/// Boxed per-type predicate, as produced by binding a generic check.
pub type BoundCheck<'f, T> = Box<dyn Fn(&T) -> CheckResult + 'f>;

/// Boxed per-type precondition.
pub type BoundPrecondition<'f, T> = Box<dyn Fn(&T) -> bool + 'f>;

/// A testable statement about values of type `T`, with its accumulated
/// result.
///
/// The result survives across runs with different generators (a random
/// pass followed by an edge pass, say) until cleared. A result already
/// carrying a failure makes further `run` calls a no-op: the caller must
/// acknowledge the failure via [`Property::clear_error`] or
/// [`Property::clear_all`] before testing continues.
pub struct Property<'f, T> {
    result: TestResult,
    check: BoundCheck<'f, T>,
    precondition: Option<BoundPrecondition<'f, T>>,
}

impl<'f, T: Any> Property<'f, T> {
    /// A property with no precondition: every generated case counts.
    pub fn new<F>(summary: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> CheckResult + 'f,
    {
        Property {
            result: TestResult::new(summary),
            check: Box::new(check),
            precondition: None,
        }
    }

    /// A property whose cases are filtered by `precondition`; rejected
    /// cases are counted as skips and do not spend the case budget.
    pub fn with_precondition<F, P>(summary: impl Into<String>, check: F, precondition: P) -> Self
    where
        F: Fn(&T) -> CheckResult + 'f,
        P: Fn(&T) -> bool + 'f,
    {
        Property {
            result: TestResult::new(summary),
            check: Box::new(check),
            precondition: Some(Box::new(precondition)),
        }
    }

    pub fn result(&self) -> &TestResult {
        &self.result
    }

    /// Release the accumulated result to the caller.
    pub fn into_result(self) -> TestResult {
        self.result
    }

    pub fn clear_error(&mut self) {
        self.result.clear_error();
    }

    pub fn clear_all(&mut self) {
        self.result.clear_all();
    }

    /// Pull cases from `generator` until it exhausts, `max_cases`
    /// evaluated cases have been spent, or a case fails.
    ///
    /// Skipped cases do not count toward `max_cases`. A `max_cases` of 0
    /// records the case description but never pulls from the generator.
    /// If the held result already denotes failure the call is a no-op and
    /// the stale result is returned untouched.
    pub fn run(
        &mut self,
        case_description: impl Into<String>,
        mut generator: impl Generator<T>,
        max_cases: usize,
    ) -> &TestResult {
        if self.result.is_failed() {
            return &self.result;
        }
        self.result.last_case_description = case_description.into();

        let mut spent = 0;
        while spent < max_cases {
            let Some(value) = generator.next() else {
                break;
            };
            if let Some(precondition) = &self.precondition {
                if !precondition(&value) {
                    self.result.skip_count += 1;
                    continue;
                }
            }
            let check = (self.check)(&value);
            if check.is_failed() {
                self.result.reason = check.into_reason();
                self.result.failed_case = Some(ErasedValue::new(value));
                break;
            }
            self.result.pass_count += 1;
            spent += 1;
        }
        &self.result
    }
}
