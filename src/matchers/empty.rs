//! [`Predicate`](crate::Predicate)s that succeed when a value is empty.
//!
//! An absent subject is considered empty by every check here.
use crate::{
    self as emptiness,
    capability::{Countable, Text},
    predicate,
};

/// Returns a predicate that succeeds if the input sequence yields no element.
///
/// Only the first element of a fresh iterator is ever requested, so lazy and
/// infinite sequences are fine.
///
/// ```
/// # use emptiness::{assert_that, matchers::empty::be_empty};
/// # use std::collections::HashMap;
/// assert_that!(Vec::<&str>::new(), be_empty());
/// assert_that!([0u8; 0], be_empty());
/// assert_that!(HashMap::<u8, u8>::new(), be_empty());
/// ```
///
/// ```should_panic
/// # use emptiness::{assert_that, matchers::empty::be_empty};
/// assert_that!(vec!["a"], be_empty());  // fails
/// ```
#[predicate(expected = ("{} empty", switch("be", "not be")), name = EmptySequence)]
pub fn be_empty<S>(actual: &S) -> bool
where
    for<'s> &'s S: IntoIterator,
{
    IntoIterator::into_iter(actual).next().is_none()
}

/// Returns a predicate that succeeds if the input text has a length of zero.
///
/// ```
/// # use emptiness::{assert_that, matchers::empty::be_empty_text};
/// assert_that!("", be_empty_text());
/// assert_that!(String::new(), be_empty_text());
/// ```
///
/// ```should_panic
/// # use emptiness::{assert_that, matchers::empty::be_empty_text};
/// assert_that!("x", be_empty_text());  // fails
/// ```
#[predicate(expected = ("{} empty", switch("be", "not be")), name = EmptyText)]
pub fn be_empty_text<S: Text>(actual: &S) -> bool {
    actual.length() == 0
}

/// Returns a predicate that succeeds if the input collection holds no
/// element.
///
/// ```
/// # use emptiness::{assert_that, matchers::empty::be_empty_collection};
/// # use std::collections::{BTreeSet, HashMap};
/// assert_that!(HashMap::<&str, u8>::new(), be_empty_collection());
/// assert_that!(BTreeSet::<u8>::new(), be_empty_collection());
/// ```
///
/// ```should_panic
/// # use emptiness::{assert_that, matchers::empty::be_empty_collection};
/// # use std::collections::HashMap;
/// assert_that!(HashMap::from([("k", 1)]), be_empty_collection());  // fails
/// ```
#[predicate(expected = ("{} empty", switch("be", "not be")), name = EmptyCollection)]
pub fn be_empty_collection<C: Countable>(actual: &C) -> bool {
    actual.count() == 0
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::{HashMap, HashSet, VecDeque};

    use super::*;
    use crate::{
        check, DescribeOptions, EvaluationError, Expression, FailureMessage, Predicate,
        Satisfiability::{self, DoesNotMatch, Fail, Matches},
    };

    fn status<T, P: Predicate<T>>(actual: Expression<'_, T>, predicate: P) -> Satisfiability {
        predicate.satisfies(&actual, &mut FailureMessage::new())
    }

    fn failing<T>() -> Result<Option<T>, EvaluationError> {
        Err(EvaluationError::msg("no subject"))
    }

    /// Infinite sequence which counts how many elements were pulled from it.
    #[derive(Debug)]
    struct Naturals<'c> {
        pulled: &'c Cell<usize>,
    }

    struct NaturalsCursor<'c> {
        pulled: &'c Cell<usize>,
        next: usize,
    }

    impl Iterator for NaturalsCursor<'_> {
        type Item = usize;

        fn next(&mut self) -> Option<usize> {
            self.pulled.set(self.pulled.get() + 1);
            self.next += 1;

            Some(self.next - 1)
        }
    }

    impl<'n, 'c> IntoIterator for &'n Naturals<'c> {
        type Item = usize;
        type IntoIter = NaturalsCursor<'c>;

        fn into_iter(self) -> Self::IntoIter {
            NaturalsCursor {
                pulled: self.pulled,
                next: 0,
            }
        }
    }

    #[test]
    fn sequences() {
        assert_eq!(status(Expression::value(Vec::<&str>::new()), be_empty()), Matches);
        assert_eq!(status(Expression::value(vec!["a"]), be_empty()), DoesNotMatch);
        assert_eq!(status(Expression::value(VecDeque::from([1])), be_empty()), DoesNotMatch);
        assert_eq!(status(Expression::value(HashSet::<u8>::new()), be_empty()), Matches);
    }

    #[test]
    fn infinite_sequence_is_not_enumerated() {
        let pulled = Cell::new(0);
        let naturals = Naturals { pulled: &pulled };

        assert_eq!(status(Expression::value(naturals), be_empty()), DoesNotMatch);
        assert_eq!(pulled.get(), 1);
    }

    #[test]
    fn text() {
        assert_eq!(status(Expression::value(""), be_empty_text()), Matches);
        assert_eq!(status(Expression::value("x"), be_empty_text()), DoesNotMatch);
        assert_eq!(status(Expression::value(String::from("é")), be_empty_text()), DoesNotMatch);
    }

    #[test]
    fn collections() {
        let mut entries = HashMap::new();

        assert_eq!(status(Expression::value(entries.clone()), be_empty_collection()), Matches);

        entries.insert("key", 1);

        assert_eq!(status(Expression::value(entries), be_empty_collection()), DoesNotMatch);
        assert_eq!(status(Expression::value([1, 2]), be_empty_collection()), DoesNotMatch);
    }

    #[test]
    fn absent_subject_is_empty() {
        assert_eq!(status(Expression::<Vec<u8>>::nil(), be_empty()), Matches);
        assert_eq!(status(Expression::<String>::nil(), be_empty_text()), Matches);
        assert_eq!(status(Expression::<HashSet<u8>>::nil(), be_empty_collection()), Matches);
    }

    #[test]
    fn failed_evaluation_fails() {
        assert_eq!(status(Expression::<Vec<u8>>::new(failing), be_empty()), Fail);
        assert_eq!(status(Expression::<String>::new(failing), be_empty_text()), Fail);
        assert_eq!(status(Expression::<Vec<u8>>::new(failing), be_empty_collection()), Fail);
    }

    #[test]
    fn describes_as_be_empty() {
        let options = DescribeOptions::new();
        let negated = options.negated();

        assert_eq!(be_empty::<Vec<u8>>().describe(&options).to_string(), "be empty");
        assert_eq!(be_empty_text::<&str>().describe(&negated).to_string(), "not be empty");
    }

    #[test]
    fn failure_renders_actual_value() {
        let actual = Expression::value(HashMap::from([("k", 1)]));
        let failure = check(&actual, be_empty_collection()).unwrap_err();

        assert_eq!(failure.to_string(), r#"expected to be empty, got <{"k": 1}>"#);
    }
}
