//! One logical test across every fixed-width integer type.
//!
//! The predicate and precondition are written once per numeric kind as
//! overload sets over the widened `Scalar` view; the runner resolves the
//! right arm for each member of the type list. The failing case, stored
//! type-erased, is printed through a per-kind printer dispatched against
//! the same type list and the reported index.

use provar::{
    run_sequential, scalar_of, CheckResult, EdgeStrategy, Integers, KindConstraint, Overload,
    ProvarError, Scalar, SequentialTestResult, TypeList,
};

type CheckFn = Box<dyn Fn(&Scalar) -> CheckResult>;
type PrintFn = Box<dyn Fn(&Scalar) -> String>;

fn render(outcome: &SequentialTestResult, printer: &Overload<PrintFn>) -> Result<(), ProvarError> {
    let result = &outcome.result;
    let verdict = if result.is_failed() { "FAIL" } else { "PASS" };
    println!(
        "[{verdict}] {} (with test case: {}) (pass={}, skip={})",
        result.summary, result.last_case_description, result.pass_count, result.skip_count
    );
    if let Some(reason) = &result.reason {
        println!("     | reason: {reason}");
    }
    if let Some(case) = &result.failed_case {
        let scalar = scalar_of::<Integers>(outcome.failed_index, case)?;
        let rendered = printer.dispatch(&scalar)?;
        println!(
            "     | failed case: {rendered} (type index {} of {})",
            outcome.failed_index,
            <Integers as TypeList>::LEN
        );
    }
    Ok(())
}

fn main() -> Result<(), ProvarError> {
    // Doubling then halving is lossless for integers until doubling
    // overflows, so admit only the lower half of each type's range.
    let check: Overload<CheckFn> = Overload::new()
        .when(
            KindConstraint::Signed,
            Box::new(|v: &Scalar| match v {
                Scalar::Signed(n) => {
                    CheckResult::require((n * 2) / 2 == *n, "doubling was not reversible")
                }
                _ => CheckResult::fail("signed arm saw a non-signed value"),
            }) as CheckFn,
        )
        .otherwise(Box::new(|v: &Scalar| match v {
            Scalar::Unsigned(n) => {
                CheckResult::require((n * 2) / 2 == *n, "doubling was not reversible")
            }
            _ => CheckResult::fail("unsigned arm saw a non-integer value"),
        }) as CheckFn);

    let admit = Overload::new()
        .when(
            KindConstraint::Signed,
            Box::new(|v: &Scalar| matches!(v, Scalar::Signed(n) if n.unsigned_abs() <= u64::MAX as u128 / 2))
                as Box<dyn Fn(&Scalar) -> bool>,
        )
        .otherwise(Box::new(|v: &Scalar| {
            matches!(v, Scalar::Unsigned(n) if *n <= u64::MAX as u128 / 2)
        }) as Box<dyn Fn(&Scalar) -> bool>);

    let printer: Overload<PrintFn> = Overload::new()
        .when(
            KindConstraint::Float,
            Box::new(|v: &Scalar| format!("{v} (float)")) as PrintFn,
        )
        .otherwise(Box::new(|v: &Scalar| format!("{v}")) as PrintFn);

    let outcome = run_sequential::<Integers, _, _, _>(
        "doubling is reversible",
        "edge case",
        &check,
        &admit,
        &EdgeStrategy,
        100,
    )?;

    render(&outcome, &printer)?;
    if outcome.is_failed() {
        std::process::exit(1);
    }
    Ok(())
}
