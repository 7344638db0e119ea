//! Exercising one function at one type: absolute value over `i64`.
//!
//! Runs a random pass and an edge pass against the same property,
//! accumulating into one result, then renders it. Rendering is plain
//! consumer code; the harness itself never writes output.

use provar::{CheckResult, EdgeGenerator, Property, RandomGenerator, TestResult};

fn absolute(value: i64) -> i64 {
    if value < 0 {
        -value
    } else {
        value
    }
}

fn render(result: &TestResult) {
    let verdict = if result.is_failed() { "FAIL" } else { "PASS" };
    println!(
        "[{verdict}] {} (with test case: {}) (pass={}, skip={})",
        result.summary, result.last_case_description, result.pass_count, result.skip_count
    );
    if let Some(reason) = &result.reason {
        println!("     | reason: {reason}");
    }
}

fn main() {
    // Negating i64::MIN overflows, so the precondition excludes it; the
    // slot shows up in the skip count instead of the budget.
    let mut test = Property::with_precondition(
        "absolute value is idempotent",
        |&x: &i64| {
            let once = absolute(x);
            CheckResult::require(absolute(once) == once, "absolute is not idempotent")
        },
        |&x: &i64| x != i64::MIN,
    );

    test.run("random case", RandomGenerator::<i64>::new(), 1000);
    render(test.result());

    test.run("edge case", EdgeGenerator::<i64>::new(), 1000);
    render(test.result());

    if let Some(case) = &test.result().failed_case {
        if let Ok(value) = case.downcast_ref::<i64>() {
            println!("     | failed case: {value}");
        }
        std::process::exit(1);
    }
}
