//! Running one logical test across an ordered list of types.
//!
//! A [`TypeList`] is a closed, compile-time-known tuple of
//! [`TestParam`] types. [`run_sequential`] walks it in order, building a
//! fresh generator and executor per type, and stops at the first type
//! whose run fails. Behaviour that varies by type enters through the
//! [`Check`] and [`Admit`] traits, usually backed by an
//! [`Overload`] over the widened [`Scalar`] view.

use crate::data::{CheckResult, ErasedValue, SequentialTestResult, TestResult};
use crate::dispatch::Overload;
use crate::error::{ProvarError, Result};
use crate::gen::GeneratorStrategy;
use crate::param::{ParamKind, Scalar, TestParam};
use crate::property::{BoundCheck, BoundPrecondition, Property};
use std::any::type_name;
use std::ops::ControlFlow;

/// A predicate usable at every member type of a type list.
///
/// `bind` resolves the behaviour for one concrete type, once, before any
/// case of that type runs. Uniform behaviour is expressed as a catch-all
/// overload: `Overload::new().otherwise(|v: &Scalar| ...)`.
pub trait Check {
    fn bind<T: TestParam>(&self) -> Result<BoundCheck<'_, T>>;

    /// Confirm this check can serve every kind in the active list.
    /// Called before the first case runs; the default accepts all kinds.
    fn verify(&self, kinds: &[ParamKind]) -> Result<()> {
        let _ = kinds;
        Ok(())
    }
}

/// A precondition usable at every member type of a type list.
pub trait Admit {
    fn bind<T: TestParam>(&self) -> Result<Option<BoundPrecondition<'_, T>>>;

    fn verify(&self, kinds: &[ParamKind]) -> Result<()> {
        let _ = kinds;
        Ok(())
    }
}

/// The absent precondition: every case counts.
pub struct AdmitAll;

impl Admit for AdmitAll {
    fn bind<T: TestParam>(&self) -> Result<Option<BoundPrecondition<'_, T>>> {
        Ok(None)
    }
}

impl<F> Check for Overload<F>
where
    F: Fn(&Scalar) -> CheckResult,
{
    fn bind<T: TestParam>(&self) -> Result<BoundCheck<'_, T>> {
        let arm = self.resolve(T::KIND)?;
        Ok(Box::new(move |value: &T| arm(&value.to_scalar())))
    }

    fn verify(&self, kinds: &[ParamKind]) -> Result<()> {
        self.ensure_total(kinds)
    }
}

impl<F> Admit for Overload<F>
where
    F: Fn(&Scalar) -> bool,
{
    fn bind<T: TestParam>(&self) -> Result<Option<BoundPrecondition<'_, T>>> {
        let arm = self.resolve(T::KIND)?;
        Ok(Some(Box::new(move |value: &T| arm(&value.to_scalar()))))
    }

    fn verify(&self, kinds: &[ParamKind]) -> Result<()> {
        self.ensure_total(kinds)
    }
}

/// Visits each member type of a [`TypeList`] in order.
pub trait TypeVisitor {
    /// Visit the type at `index`. Returning `Break` stops the walk.
    fn visit<T: TestParam>(&mut self, index: usize) -> ControlFlow<()>;
}

/// A closed, ordered list of distinct test parameter types.
///
/// Implemented for tuples of [`TestParam`] types up to arity 12.
pub trait TypeList {
    const LEN: usize;

    /// The kinds of the member types, in list order.
    fn kinds() -> Vec<ParamKind>;

    /// Walk the member types in order until the visitor breaks.
    fn for_each<V: TypeVisitor>(visitor: &mut V) -> ControlFlow<()>;
}

macro_rules! impl_type_list {
    ($($ty:ident),+) => {
        impl<$($ty: TestParam),+> TypeList for ($($ty,)+) {
            const LEN: usize = [$(stringify!($ty)),+].len();

            fn kinds() -> Vec<ParamKind> {
                vec![$(<$ty>::KIND),+]
            }

            fn for_each<V: TypeVisitor>(visitor: &mut V) -> ControlFlow<()> {
                let mut index = 0;
                $(
                    if visitor.visit::<$ty>(index).is_break() {
                        return ControlFlow::Break(());
                    }
                    index += 1;
                )+
                let _ = index;
                ControlFlow::Continue(())
            }
        }
    };
}

impl_type_list!(A);
impl_type_list!(A, B);
impl_type_list!(A, B, C);
impl_type_list!(A, B, C, D);
impl_type_list!(A, B, C, D, E);
impl_type_list!(A, B, C, D, E, F);
impl_type_list!(A, B, C, D, E, F, G);
impl_type_list!(A, B, C, D, E, F, G, H);
impl_type_list!(A, B, C, D, E, F, G, H, I);
impl_type_list!(A, B, C, D, E, F, G, H, I, J);
impl_type_list!(A, B, C, D, E, F, G, H, I, J, K);
impl_type_list!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Every fixed-width integer type, narrowest first.
pub type Integers = (i8, u8, i16, u16, i32, u32, i64, u64);
/// The signed fixed-width integer types.
pub type SignedIntegers = (i8, i16, i32, i64);
/// The unsigned fixed-width integer types.
pub type UnsignedIntegers = (u8, u16, u32, u64);
/// The floating-point types.
pub type Floats = (f32, f64);

/// Run the same logical test against each type of `L` in order.
///
/// Per type: bind `check` and `precondition` for that type, build the
/// strategy's generator, and drive a fresh [`Property`] with the shared
/// case budget. The first failing type stops the walk; later types are
/// never exercised and no case of theirs is ever generated. When every
/// type passes, the returned result is the last type's and
/// `failed_index` stays 0.
///
/// `Err` is reserved for configuration problems (an overload that cannot
/// serve some kind in the list); case failures are reported through the
/// returned [`SequentialTestResult`].
pub fn run_sequential<L, C, P, S>(
    summary: &str,
    case_description: &str,
    check: &C,
    precondition: &P,
    strategy: &S,
    max_cases: usize,
) -> Result<SequentialTestResult>
where
    L: TypeList,
    C: Check,
    P: Admit,
    S: GeneratorStrategy,
{
    let kinds = L::kinds();
    check.verify(&kinds)?;
    precondition.verify(&kinds)?;

    struct Driver<'a, C, P, S> {
        summary: &'a str,
        case_description: &'a str,
        check: &'a C,
        precondition: &'a P,
        strategy: &'a S,
        max_cases: usize,
        last: Option<TestResult>,
        failed_index: Option<usize>,
        error: Option<ProvarError>,
    }

    impl<C: Check, P: Admit, S: GeneratorStrategy> TypeVisitor for Driver<'_, C, P, S> {
        fn visit<T: TestParam>(&mut self, index: usize) -> ControlFlow<()> {
            let check = match self.check.bind::<T>() {
                Ok(check) => check,
                Err(error) => {
                    self.error = Some(error);
                    return ControlFlow::Break(());
                }
            };
            let precondition = match self.precondition.bind::<T>() {
                Ok(precondition) => precondition,
                Err(error) => {
                    self.error = Some(error);
                    return ControlFlow::Break(());
                }
            };

            let summary = format!("{} for {}", self.summary, type_name::<T>());
            let mut property = match precondition {
                Some(precondition) => Property::with_precondition(summary, check, precondition),
                None => Property::new(summary, check),
            };
            property.run(
                self.case_description,
                self.strategy.build::<T>(),
                self.max_cases,
            );

            let result = property.into_result();
            let failed = result.is_failed();
            self.last = Some(result);
            if failed {
                self.failed_index = Some(index);
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }

    let mut driver = Driver {
        summary,
        case_description,
        check,
        precondition,
        strategy,
        max_cases,
        last: None,
        failed_index: None,
        error: None,
    };
    L::for_each(&mut driver);

    if let Some(error) = driver.error {
        return Err(error);
    }
    Ok(SequentialTestResult {
        result: driver.last.unwrap_or_default(),
        failed_index: driver.failed_index.unwrap_or(0),
    })
}

/// Consumes a type-erased value at its concrete type.
pub trait ErasedVisitor {
    type Output;

    fn visit<T: TestParam>(&mut self, value: &T) -> Self::Output;
}

/// Retrieve an erased value as the type at `index` of list `L`.
///
/// This is how reporting code reads back a failing case: present the same
/// type list the run used plus the `failed_index` it returned. An index
/// outside the list or one naming a type other than the stored one is a
/// hard error.
pub fn with_nth_type<L, V>(index: usize, value: &ErasedValue, visitor: &mut V) -> Result<V::Output>
where
    L: TypeList,
    V: ErasedVisitor,
{
    if index >= L::LEN {
        return Err(ProvarError::IndexOutOfBounds {
            index,
            len: L::LEN,
        });
    }

    struct Finder<'a, V: ErasedVisitor> {
        target: usize,
        value: &'a ErasedValue,
        visitor: &'a mut V,
        outcome: Option<Result<V::Output>>,
    }

    impl<V: ErasedVisitor> TypeVisitor for Finder<'_, V> {
        fn visit<T: TestParam>(&mut self, index: usize) -> ControlFlow<()> {
            if index != self.target {
                return ControlFlow::Continue(());
            }
            self.outcome = Some(
                self.value
                    .downcast_ref::<T>()
                    .map(|concrete| self.visitor.visit(concrete)),
            );
            ControlFlow::Break(())
        }
    }

    let mut finder = Finder {
        target: index,
        value,
        visitor,
        outcome: None,
    };
    L::for_each(&mut finder);
    finder.outcome.unwrap_or(Err(ProvarError::IndexOutOfBounds {
        index,
        len: L::LEN,
    }))
}

/// Widen the erased value at `index` of list `L` into a [`Scalar`], the
/// form printer overloads consume.
pub fn scalar_of<L: TypeList>(index: usize, value: &ErasedValue) -> Result<Scalar> {
    struct Widen;

    impl ErasedVisitor for Widen {
        type Output = Scalar;

        fn visit<T: TestParam>(&mut self, value: &T) -> Scalar {
            value.to_scalar()
        }
    }

    with_nth_type::<L, _>(index, value, &mut Widen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::KindConstraint;
    use crate::gen::{EdgeStrategy, Generator, RandomGenerator};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    type CheckFn = Box<dyn Fn(&Scalar) -> CheckResult>;
    type AdmitFn = Box<dyn Fn(&Scalar) -> bool>;

    fn always_pass() -> Overload<CheckFn> {
        Overload::new().otherwise(Box::new(|_: &Scalar| CheckResult::pass()) as CheckFn)
    }

    /// Strategy that counts pulls per concrete type.
    struct CountingStrategy {
        pulls: Rc<RefCell<HashMap<&'static str, u64>>>,
    }

    impl CountingStrategy {
        fn new() -> Self {
            CountingStrategy {
                pulls: Rc::new(RefCell::new(HashMap::new())),
            }
        }

        fn pulls_for(&self, name: &str) -> u64 {
            self.pulls.borrow().get(name).copied().unwrap_or(0)
        }
    }

    impl GeneratorStrategy for CountingStrategy {
        fn build<T: TestParam>(&self) -> Box<dyn Generator<T>> {
            let pulls = Rc::clone(&self.pulls);
            let mut inner = RandomGenerator::<T>::new();
            Box::new(RandomGenerator::from_source(move || {
                *pulls.borrow_mut().entry(type_name::<T>()).or_insert(0) += 1;
                inner.next().unwrap()
            }))
        }
    }

    #[test]
    fn type_list_reports_length_and_kinds() {
        assert_eq!(<Integers as TypeList>::LEN, 8);
        assert_eq!(
            <(i8, u8, f32) as TypeList>::kinds(),
            vec![ParamKind::Signed, ParamKind::Unsigned, ParamKind::Float]
        );
    }

    #[test]
    fn all_types_passing_leaves_failed_index_at_zero() {
        let outcome = run_sequential::<(i8, u8, f32), _, _, _>(
            "always passes",
            "edge case",
            &always_pass(),
            &AdmitAll,
            &EdgeStrategy,
            100,
        )
        .unwrap();

        assert!(!outcome.is_failed());
        assert_eq!(outcome.failed_index, 0);
        // The last active type's accounting survives: f32 has 12 edges.
        assert_eq!(outcome.result.pass_count, 12);
        assert!(outcome.result.summary.contains("f32"));
    }

    #[test]
    fn first_failing_type_short_circuits_the_walk() {
        let strategy = CountingStrategy::new();
        let fail_signed: Overload<CheckFn> = Overload::new()
            .when(
                KindConstraint::Signed,
                Box::new(|_: &Scalar| CheckResult::fail("signed rejected")) as CheckFn,
            )
            .otherwise(Box::new(|_: &Scalar| CheckResult::pass()) as CheckFn);

        let outcome = run_sequential::<(i8, u16, u32), _, _, _>(
            "fails at index 0",
            "random case",
            &fail_signed,
            &AdmitAll,
            &strategy,
            50,
        )
        .unwrap();

        assert!(outcome.is_failed());
        assert_eq!(outcome.failed_index, 0);
        assert_eq!(outcome.result.reason.as_deref(), Some("signed rejected"));
        // Types after the failing one were never pulled from.
        assert_eq!(strategy.pulls_for("i8"), 1);
        assert_eq!(strategy.pulls_for("u16"), 0);
        assert_eq!(strategy.pulls_for("u32"), 0);
    }

    #[test]
    fn failure_in_a_later_type_reports_its_index() {
        let fail_float: Overload<CheckFn> = Overload::new()
            .when(
                KindConstraint::Float,
                Box::new(|_: &Scalar| CheckResult::fail("float rejected")) as CheckFn,
            )
            .otherwise(Box::new(|_: &Scalar| CheckResult::pass()) as CheckFn);

        let outcome = run_sequential::<(i8, u8, f64), _, _, _>(
            "fails at the float",
            "edge case",
            &fail_float,
            &AdmitAll,
            &EdgeStrategy,
            100,
        )
        .unwrap();

        assert!(outcome.is_failed());
        assert_eq!(outcome.failed_index, 2);
        assert!(outcome.result.summary.contains("f64"));
    }

    #[test]
    fn uncovered_kind_is_trapped_before_any_case_runs() {
        let strategy = CountingStrategy::new();
        let integral_only: Overload<CheckFn> = Overload::new().when(
            KindConstraint::Integral,
            Box::new(|_: &Scalar| CheckResult::pass()) as CheckFn,
        );

        let outcome = run_sequential::<(i8, f32), _, _, _>(
            "misconfigured",
            "random case",
            &integral_only,
            &AdmitAll,
            &strategy,
            50,
        );

        match outcome {
            Err(ProvarError::DispatchNoMatch { kind }) => assert_eq!(kind, ParamKind::Float),
            other => panic!("expected DispatchNoMatch, got: {other:?}"),
        }
        // Verification precedes execution, so not even i8 was exercised.
        assert_eq!(strategy.pulls_for("i8"), 0);
    }

    #[test]
    fn preconditions_dispatch_per_kind() {
        let skip_negative: Overload<AdmitFn> = Overload::new()
            .when(
                KindConstraint::Signed,
                Box::new(|v: &Scalar| matches!(v, Scalar::Signed(n) if *n >= 0)) as AdmitFn,
            )
            .otherwise(Box::new(|_: &Scalar| true) as AdmitFn);

        let outcome = run_sequential::<(i16,), _, _, _>(
            "non-negative edges only",
            "edge case",
            &always_pass(),
            &skip_negative,
            &EdgeStrategy,
            100,
        )
        .unwrap();

        assert!(!outcome.is_failed());
        // Signed edge table: 9 entries, 4 of them negative.
        assert_eq!(outcome.result.pass_count, 5);
        assert_eq!(outcome.result.skip_count, 4);
    }

    #[test]
    fn failing_case_reads_back_through_the_type_list() {
        let fail_unsigned: Overload<CheckFn> = Overload::new()
            .when(
                KindConstraint::Unsigned,
                Box::new(|v: &Scalar| {
                    CheckResult::require(
                        matches!(v, Scalar::Unsigned(n) if *n < 3),
                        "too large",
                    )
                }) as CheckFn,
            )
            .otherwise(Box::new(|_: &Scalar| CheckResult::pass()) as CheckFn);

        let outcome = run_sequential::<(i8, u8), _, _, _>(
            "small unsigned only",
            "edge case",
            &fail_unsigned,
            &AdmitAll,
            &EdgeStrategy,
            100,
        )
        .unwrap();

        assert!(outcome.is_failed());
        assert_eq!(outcome.failed_index, 1);

        let case = outcome.result.failed_case.as_ref().unwrap();
        // u8 edge table fails first at MAX, its fourth entry.
        assert_eq!(case.downcast_ref::<u8>().unwrap(), &u8::MAX);
        assert_eq!(
            scalar_of::<(i8, u8)>(outcome.failed_index, case).unwrap(),
            Scalar::Unsigned(255)
        );
    }

    #[test]
    fn mismatched_retrieval_fails_loudly() {
        let case = ErasedValue::new(7u8);
        // Index 0 of this list names i8, not the stored u8.
        match scalar_of::<(i8, u8)>(0, &case) {
            Err(ProvarError::TypeMismatch { stored, requested }) => {
                assert_eq!(stored, "u8");
                assert_eq!(requested, "i8");
            }
            other => panic!("expected TypeMismatch, got: {other:?}"),
        }

        match scalar_of::<(i8, u8)>(5, &case) {
            Err(ProvarError::IndexOutOfBounds { index: 5, len: 2 }) => {}
            other => panic!("expected IndexOutOfBounds, got: {other:?}"),
        }
    }
}
