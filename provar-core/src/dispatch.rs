//! Overload dispatch over numeric kinds.
//!
//! An [`Overload`] combines several kind-constrained handlers into one
//! value: given a [`ParamKind`], the first arm whose constraint matches
//! wins. The sequential runner resolves an overload once per concrete
//! type, so dispatch never happens per value.

use crate::error::{ProvarError, Result};
use crate::param::{ParamKind, Scalar};

/// A type-level predicate an overload arm is constrained by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindConstraint {
    /// Signed integers only.
    Signed,
    /// Unsigned integers only.
    Unsigned,
    /// Any integer, signed or unsigned.
    Integral,
    /// Floating point only.
    Float,
    /// Catch-all.
    Any,
}

impl KindConstraint {
    pub fn matches(self, kind: ParamKind) -> bool {
        match self {
            KindConstraint::Signed => kind == ParamKind::Signed,
            KindConstraint::Unsigned => kind == ParamKind::Unsigned,
            KindConstraint::Integral => {
                matches!(kind, ParamKind::Signed | ParamKind::Unsigned)
            }
            KindConstraint::Float => kind == ParamKind::Float,
            KindConstraint::Any => true,
        }
    }
}

/// An ordered set of kind-constrained handlers with first-match-wins
/// selection.
///
/// Handlers are typically closures over the widened [`Scalar`] view, so
/// one overload supplies correct behaviour for every member of a
/// heterogeneous type list without per-type boilerplate at the call site.
pub struct Overload<F> {
    arms: Vec<(KindConstraint, F)>,
}

impl<F> Overload<F> {
    pub fn new() -> Self {
        Overload { arms: Vec::new() }
    }

    /// Append an arm restricted to kinds matching `constraint`.
    pub fn when(mut self, constraint: KindConstraint, handler: F) -> Self {
        self.arms.push((constraint, handler));
        self
    }

    /// Append a catch-all arm. Arms listed after it are unreachable.
    pub fn otherwise(self, handler: F) -> Self {
        self.when(KindConstraint::Any, handler)
    }

    /// Select the first arm whose constraint matches `kind`.
    pub fn resolve(&self, kind: ParamKind) -> Result<&F> {
        self.arms
            .iter()
            .find(|(constraint, _)| constraint.matches(kind))
            .map(|(_, handler)| handler)
            .ok_or(ProvarError::DispatchNoMatch { kind })
    }

    /// Verify every kind in `kinds` resolves to some arm, so a no-match
    /// configuration is trapped before any case runs.
    pub fn ensure_total(&self, kinds: &[ParamKind]) -> Result<()> {
        for &kind in kinds {
            self.resolve(kind)?;
        }
        Ok(())
    }

    pub fn has_catch_all(&self) -> bool {
        self.arms
            .iter()
            .any(|(constraint, _)| *constraint == KindConstraint::Any)
    }
}

impl<F> Default for Overload<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Overload<F> {
    /// Resolve on the scalar's kind and invoke the selected handler.
    pub fn dispatch<R>(&self, value: &Scalar) -> Result<R>
    where
        F: Fn(&Scalar) -> R,
    {
        let handler = self.resolve(value.kind())?;
        Ok(handler(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraints_match_the_expected_kinds() {
        assert!(KindConstraint::Signed.matches(ParamKind::Signed));
        assert!(!KindConstraint::Signed.matches(ParamKind::Unsigned));
        assert!(KindConstraint::Integral.matches(ParamKind::Signed));
        assert!(KindConstraint::Integral.matches(ParamKind::Unsigned));
        assert!(!KindConstraint::Integral.matches(ParamKind::Float));
        assert!(KindConstraint::Float.matches(ParamKind::Float));
        assert!(KindConstraint::Any.matches(ParamKind::Float));
    }

    #[test]
    fn first_matching_arm_wins() {
        let overload: Overload<&str> = Overload::new()
            .when(KindConstraint::Signed, "signed")
            .when(KindConstraint::Integral, "integral")
            .otherwise("anything");

        assert_eq!(*overload.resolve(ParamKind::Signed).unwrap(), "signed");
        assert_eq!(*overload.resolve(ParamKind::Unsigned).unwrap(), "integral");
        assert_eq!(*overload.resolve(ParamKind::Float).unwrap(), "anything");
    }

    #[test]
    fn missing_arm_is_a_dispatch_error() {
        let overload: Overload<&str> = Overload::new().when(KindConstraint::Integral, "int");
        assert!(!overload.has_catch_all());

        match overload.resolve(ParamKind::Float) {
            Err(ProvarError::DispatchNoMatch { kind }) => assert_eq!(kind, ParamKind::Float),
            other => panic!("expected DispatchNoMatch, got: {other:?}"),
        }
    }

    #[test]
    fn ensure_total_traps_uncovered_kinds_up_front() {
        let partial: Overload<&str> = Overload::new().when(KindConstraint::Integral, "int");
        assert!(partial
            .ensure_total(&[ParamKind::Signed, ParamKind::Unsigned])
            .is_ok());
        assert!(partial
            .ensure_total(&[ParamKind::Signed, ParamKind::Float])
            .is_err());

        let total = partial.otherwise("rest");
        assert!(total.has_catch_all());
        assert!(total
            .ensure_total(&[ParamKind::Signed, ParamKind::Unsigned, ParamKind::Float])
            .is_ok());
    }

    #[test]
    fn dispatch_invokes_the_selected_handler() {
        let describe: Overload<Box<dyn Fn(&Scalar) -> String>> = Overload::new()
            .when(
                KindConstraint::Float,
                Box::new(|v: &Scalar| format!("float {v}")) as Box<dyn Fn(&Scalar) -> String>,
            )
            .otherwise(Box::new(|v: &Scalar| format!("int {v}")));

        assert_eq!(describe.dispatch(&Scalar::Float(0.5)).unwrap(), "float 0.5");
        assert_eq!(describe.dispatch(&Scalar::Signed(-3)).unwrap(), "int -3");
    }
}
