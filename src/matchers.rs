use std::fmt::Display;

pub mod empty;

use crate::{DescribeOptions, Description, Expression, FailureMessage, Predicate, Satisfiability};

/// [`Predicate`] that negates its inner predicate.
///
/// A subject which fails to evaluate fails under negation too.
pub struct Not<P> {
    predicate_to_negate: P,
}

impl<T, P: Predicate<T>> Predicate<T> for Not<P> {
    fn satisfies(
        &self,
        actual: &Expression<'_, T>,
        failure: &mut FailureMessage,
    ) -> Satisfiability {
        self.predicate_to_negate.satisfies(actual, failure).negated()
    }

    fn describe<'d>(&'d self, options: &'d DescribeOptions) -> Description<'d, Self> {
        Description::new(self, options, |Self { predicate_to_negate }, options, f| {
            predicate_to_negate.describe(&options.negated()).fmt(f)
        })
    }
}

/// Returns a [`Predicate`] that negates the specified predicate.
///
/// ### Example
/// ```
/// # use emptiness::{assert_that, matchers::{empty::be_empty_text, not}};
/// assert_that!("x", not(be_empty_text()));
/// ```
///
/// ```should_panic
/// # use emptiness::{assert_that, matchers::{empty::be_empty_text, not}};
/// assert_that!("", not(be_empty_text()));  // fails
/// ```
pub const fn not<P>(predicate_to_negate: P) -> Not<P> {
    Not {
        predicate_to_negate,
    }
}
