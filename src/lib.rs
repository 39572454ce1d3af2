use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

#[cfg(feature = "bridge")]
pub mod bridge;
pub mod capability;
mod error;
mod expression;
mod failure;
pub mod matchers;

pub use error::EvaluationError;
pub use expression::Expression;
pub use failure::FailureMessage;

/// Transforms a function into a [`Predicate`].
///
/// The last parameter of the function is a reference to the evaluated
/// subject. Absent subjects match without calling the function, and subjects
/// which fail to evaluate yield [`Satisfiability::Fail`].
///
/// ### Example
/// ```
/// # use emptiness::{assert_that, predicate};
/// #[predicate(expected = ("{} blank", switch("be", "not be")))]
/// fn be_blank(value: &String) -> bool {
///     value.trim().is_empty()
/// }
///
/// assert_that!(String::from("  "), be_blank());
/// ```
pub use emptiness_derive::predicate;

/// Outcome of [`Predicate::satisfies`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Satisfiability {
    /// The subject was evaluated and accepted.
    Matches,
    /// The subject was evaluated and rejected.
    DoesNotMatch,
    /// The subject could not be evaluated. Negation leaves this unchanged.
    Fail,
}

impl Satisfiability {
    /// Returns whether this is [`Satisfiability::Matches`].
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Matches)
    }

    /// Swaps [`Matches`](Self::Matches) and
    /// [`DoesNotMatch`](Self::DoesNotMatch).
    pub const fn negated(self) -> Self {
        match self {
            Self::Matches => Self::DoesNotMatch,
            Self::DoesNotMatch => Self::Matches,
            Self::Fail => Self::Fail,
        }
    }
}

impl From<bool> for Satisfiability {
    fn from(is_match: bool) -> Self {
        if is_match {
            Self::Matches
        } else {
            Self::DoesNotMatch
        }
    }
}

/// A named check which validates the subject of an [`Expression`].
pub trait Predicate<T> {
    /// Evaluates `actual` and decides whether it is accepted.
    ///
    /// Details about a rejection may be written to `failure`; the caller owns
    /// it and reads it back once this returns.
    fn satisfies(&self, actual: &Expression<'_, T>, failure: &mut FailureMessage)
        -> Satisfiability;

    /// Describes what kind of value is expected by this predicate.
    ///
    /// Messages should begin with a verb such as "be".
    fn describe<'d>(&'d self, options: &'d DescribeOptions) -> Description<'d, Self>;
}

impl<'p, T, P: Predicate<T>> Predicate<T> for &'p P {
    fn satisfies(
        &self,
        actual: &Expression<'_, T>,
        failure: &mut FailureMessage,
    ) -> Satisfiability {
        (*self).satisfies(actual, failure)
    }

    fn describe<'d>(&'d self, options: &'d DescribeOptions) -> Description<'d, Self> {
        Description::new(self, options, |&s, options, f| s.describe(options).fmt(f))
    }
}

/// The description returned by [`Predicate::describe`].
#[derive(Clone, Copy)]
pub struct Description<'a, T: ?Sized> {
    value: &'a T,
    options: &'a DescribeOptions,
    fmt: fn(&'a T, &'a DescribeOptions, &mut Formatter<'_>) -> std::fmt::Result,
}

impl<'a, T> Description<'a, T> {
    /// Creates a new description given its value, options, and formatting
    /// implementation.
    pub fn new(
        value: &'a T,
        options: &'a DescribeOptions,
        fmt: fn(&'a T, &'a DescribeOptions, &mut Formatter<'_>) -> std::fmt::Result,
    ) -> Self {
        Self {
            value,
            options,
            fmt,
        }
    }
}

impl<'a, T> Display for Description<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        (self.fmt)(self.value, self.options, f)
    }
}

/// Object given to [`Predicate::describe`].
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct DescribeOptions {
    /// Whether the description should be negated.
    pub is_negated: bool,
}

impl DescribeOptions {
    /// Returns a new [`DescribeOptions`].
    pub const fn new() -> Self {
        Self { is_negated: false }
    }

    /// Returns a new negated [`DescribeOptions`].
    pub const fn negated(&self) -> Self {
        Self {
            is_negated: !self.is_negated,
        }
    }
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks `actual` against `predicate`, returning the filled-in
/// [`FailureMessage`] if it is not accepted.
///
/// ### Example
/// ```
/// # use emptiness::{check, matchers::empty::be_empty, Expression};
/// let failure = check(&Expression::value(vec![1]), be_empty()).unwrap_err();
///
/// assert_eq!(failure.to_string(), "expected to be empty, got <[1]>");
/// ```
pub fn check<T: Debug, P: Predicate<T>>(
    actual: &Expression<'_, T>,
    predicate: P,
) -> Result<(), FailureMessage> {
    let mut failure = FailureMessage::new();

    failure.postfix_message = predicate.describe(&DescribeOptions::new()).to_string();

    let status = predicate.satisfies(actual, &mut failure);

    tracing::debug!(?status, location = %actual.location(), "evaluated predicate");

    if status.is_match() {
        return Ok(());
    }

    if failure.actual_value.is_none() {
        failure.actual_value = match actual.evaluate() {
            Ok(Some(value)) => Some(format!("<{value:?}>")),
            Ok(None) => Some("<nil>".to_owned()),
            Err(_) => None,
        };
    }

    Err(failure)
}

/// Asserts that the subject of `actual` is accepted by the specified
/// `predicate`.
pub fn assert_that<T: Debug>(actual: &Expression<'_, T>, predicate: impl Predicate<T>) {
    if let Err(failure) = check(actual, predicate) {
        panic!("assertion failed at {}:\n\t{failure}", actual.location())
    }
}

/// Asserts that the given [`Predicate`] accepts the specified value.
///
/// ### Example
/// ```
/// # use emptiness::{assert_that, matchers::{empty::be_empty, not}};
/// assert_that!(Vec::<i32>::new(), be_empty());
/// assert_that!(vec![1], not(be_empty()));
/// ```
///
/// ```should_panic
/// # use emptiness::{assert_that, matchers::empty::be_empty};
/// assert_that!(vec!["a"], be_empty());  // fails
/// ```
#[macro_export]
macro_rules! assert_that {
    ( $value: expr, $predicate: expr ) => {
        $crate::assert_that(&$crate::Expression::value($value), $predicate)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{empty::be_empty, not};

    #[test]
    fn negation_keeps_fail() {
        assert_eq!(Satisfiability::Fail.negated(), Satisfiability::Fail);
        assert_eq!(Satisfiability::Matches.negated(), Satisfiability::DoesNotMatch);
        assert_eq!(Satisfiability::DoesNotMatch.negated(), Satisfiability::Matches);
    }

    #[test]
    fn check_renders_nil_subjects() {
        let failure = check(&Expression::<Vec<i32>>::nil(), not(be_empty())).unwrap_err();

        assert_eq!(failure.to_string(), "expected to not be empty, got <nil>");
    }

    #[test]
    fn check_reports_evaluation_failures() {
        let actual = Expression::<Vec<i32>>::new(|| Err(EvaluationError::msg("boom")));
        let failure = check(&actual, be_empty()).unwrap_err();

        assert_eq!(failure.evaluation_error.as_deref(), Some("boom"));
        assert_eq!(
            failure.to_string(),
            "expected to be empty, but the actual value could not be evaluated: boom"
        );
    }

    #[test]
    #[should_panic(expected = "expected to be empty, got <\"x\">")]
    fn assert_that_panics_with_failure_message() {
        assert_that!(String::from("x"), crate::matchers::empty::be_empty_text());
    }
}
