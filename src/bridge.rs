//! Emptiness checks for callers which only hold a type-erased value.
//!
//! Static callers pick [`be_empty`](crate::matchers::empty::be_empty),
//! [`be_empty_text`] or [`be_empty_collection`] themselves. A bridge caller
//! instead hands over a [`BoxedValue`], whose capabilities are probed at
//! runtime in a fixed order:
//!
//! 1. countable collection,
//! 2. text,
//! 3. anything else is unsupported.
//!
//! Countable collections come first since they usually are sequences too.
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt::{Debug, Display, Write};

use tracing::trace;

use crate::{
    capability::{Countable, Text},
    matchers::empty::{be_empty_collection, be_empty_text},
    DescribeOptions, Description, Expression, FailureMessage, Predicate, Satisfiability,
};

/// Appended to the failure message of values with no supported capability.
pub const SUPPORTED_SHAPES: &str =
    "only works for countable collections (Vec, VecDeque, LinkedList, HashMap, HashSet, \
     BTreeMap, BTreeSet) and strings";

/// A value whose capabilities are discovered at runtime.
///
/// Each probe defaults to "not supported"; implementors override the probes
/// matching what the type can do.
pub trait AnyValue: Debug {
    /// Returns a view of the value as a [`Countable`] collection.
    fn as_countable(&self) -> Option<&dyn Countable> {
        None
    }

    /// Returns a view of the value as [`Text`].
    fn as_text(&self) -> Option<&dyn Text> {
        None
    }

    /// Returns the name of the concrete type of the value.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Owned, type-erased subject handled by the bridge.
pub type BoxedValue<'a> = Box<dyn AnyValue + 'a>;

/// Boxes `value` for the bridge.
pub fn boxed<'a>(value: impl AnyValue + 'a) -> BoxedValue<'a> {
    Box::new(value)
}

/// Shape of a value, as determined by [`probe`].
pub enum Shape<'v> {
    CountableCollection(&'v dyn Countable),
    Text(&'v dyn Text),
    Unsupported,
}

impl Shape<'_> {
    /// Returns the name of the shape, for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CountableCollection(_) => "countable collection",
            Self::Text(_) => "text",
            Self::Unsupported => "unsupported",
        }
    }
}

impl Display for Shape<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Determines which emptiness check applies to `value`.
///
/// A value exposing several capabilities gets the first one, in the order
/// documented on the [module](self).
pub fn probe(value: &dyn AnyValue) -> Shape<'_> {
    if let Some(countable) = value.as_countable() {
        Shape::CountableCollection(countable)
    } else if let Some(text) = value.as_text() {
        Shape::Text(text)
    } else {
        Shape::Unsupported
    }
}

/// [`Predicate`] returned by [`be_empty_dynamic`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyDynamicPredicate;

/// Returns a [`Predicate`] that succeeds if a type-erased value is empty.
///
/// ```
/// # use emptiness::{assert_that, bridge::{be_empty_dynamic, boxed}};
/// assert_that!(boxed(Vec::<u8>::new()), be_empty_dynamic());
/// assert_that!(boxed(""), be_empty_dynamic());
/// ```
///
/// ```should_panic
/// # use emptiness::{assert_that, bridge::{be_empty_dynamic, boxed}};
/// assert_that!(boxed(42), be_empty_dynamic());  // fails: i32 is unsupported
/// ```
pub const fn be_empty_dynamic() -> EmptyDynamicPredicate {
    EmptyDynamicPredicate
}

impl<'a> Predicate<BoxedValue<'a>> for EmptyDynamicPredicate {
    fn satisfies(
        &self,
        actual: &Expression<'_, BoxedValue<'a>>,
        failure: &mut FailureMessage,
    ) -> Satisfiability {
        if failure.postfix_message.is_empty() {
            failure.postfix_message.push_str("be empty");
        }

        let value = match actual.evaluate() {
            Ok(Some(value)) => value,
            Ok(None) => {
                trace!("absent subject is empty");

                return Satisfiability::Matches;
            }
            Err(error) => {
                failure.record_error(error);

                return Satisfiability::Fail;
            }
        };
        let value: &dyn AnyValue = &**value;
        let shape = probe(value);

        trace!(
            shape = shape.name(),
            type_name = value.type_name(),
            "dispatching emptiness check"
        );

        match shape {
            Shape::CountableCollection(view) => be_empty_collection::<&dyn Countable>()
                .satisfies(&Expression::value_at(view, actual.location()), failure),
            Shape::Text(view) => be_empty_text::<&dyn Text>()
                .satisfies(&Expression::value_at(view, actual.location()), failure),
            Shape::Unsupported => {
                let _ = write!(failure.postfix_message, " ({SUPPORTED_SHAPES})");

                failure.actual_value = Some(format!("{} type", value.type_name()));

                Satisfiability::DoesNotMatch
            }
        }
    }

    fn describe<'d>(&'d self, options: &'d DescribeOptions) -> Description<'d, Self> {
        Description::new(self, options, |_, DescribeOptions { is_negated, .. }, f| {
            f.write_str(if *is_negated {
                "not be empty"
            } else {
                "be empty"
            })
        })
    }
}

/// Entry point of the bridge: returns whether the subject of `actual` is
/// empty, writing failure details into `failure`.
///
/// ```
/// # use emptiness::{bridge::{boxed, match_empty}, Expression, FailureMessage};
/// let mut failure = FailureMessage::new();
///
/// assert!(!match_empty(&Expression::value(boxed(42)), &mut failure));
/// assert_eq!(failure.actual_value.as_deref(), Some("i32 type"));
/// ```
pub fn match_empty(
    actual: &Expression<'_, BoxedValue<'_>>,
    failure: &mut FailureMessage,
) -> bool {
    be_empty_dynamic().satisfies(actual, failure).is_match()
}

macro_rules! countable_values {
    ( $( [ $( $generics: tt )* ] $ty: ty ),* $(,)? ) => {
        $(
            impl< $( $generics )* > AnyValue for $ty {
                fn as_countable(&self) -> Option<&dyn Countable> {
                    Some(self)
                }
            }
        )*
    };
}

countable_values!(
    [T: Debug] Vec<T>,
    [T: Debug] VecDeque<T>,
    [T: Debug] LinkedList<T>,
    [T: Debug, const N: usize] [T; N],
    [K: Debug, V: Debug, S] HashMap<K, V, S>,
    [T: Debug, S] HashSet<T, S>,
    [K: Debug, V: Debug] BTreeMap<K, V>,
    [T: Debug] BTreeSet<T>,
);

macro_rules! text_values {
    ( $( [ $( $generics: tt )* ] $ty: ty ),* $(,)? ) => {
        $(
            impl< $( $generics )* > AnyValue for $ty {
                fn as_text(&self) -> Option<&dyn Text> {
                    Some(self)
                }
            }
        )*
    };
}

text_values!(
    [] String,
    ['a] &'a str,
    [] Box<str>,
    ['a] Cow<'a, str>,
);

macro_rules! opaque_values {
    ( $( $ty: ty ),* $(,)? ) => {
        $( impl AnyValue for $ty {} )*
    };
}

opaque_values!(
    (), bool, char, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{check, EvaluationError};

    fn is_empty(value: BoxedValue<'_>) -> bool {
        match_empty(&Expression::value(value), &mut FailureMessage::new())
    }

    #[test]
    fn dispatches_std_values() {
        assert!(is_empty(boxed(Vec::<&str>::new())));
        assert!(!is_empty(boxed(vec!["a"])));
        assert!(is_empty(boxed("")));
        assert!(!is_empty(boxed(String::from("x"))));
        assert!(is_empty(boxed(HashMap::<u8, u8>::new())));
        assert!(!is_empty(boxed(HashMap::from([(1, 2)]))));
        assert!(!is_empty(boxed(BTreeSet::from(['x']))));
    }

    #[test]
    fn probes_in_priority_order() {
        assert!(matches!(probe(&vec![1]), Shape::CountableCollection(_)));
        assert!(matches!(probe(&"text"), Shape::Text(_)));
        assert!(matches!(probe(&1.5), Shape::Unsupported));
    }

    /// Exposes both capabilities, and records which of them was queried.
    #[derive(Debug)]
    struct Ambiguous<'c> {
        counted: &'c Cell<bool>,
        measured: &'c Cell<bool>,
    }

    impl Countable for Ambiguous<'_> {
        fn count(&self) -> usize {
            self.counted.set(true);

            0
        }
    }

    impl Text for Ambiguous<'_> {
        fn length(&self) -> usize {
            self.measured.set(true);

            1
        }
    }

    impl AnyValue for Ambiguous<'_> {
        fn as_countable(&self) -> Option<&dyn Countable> {
            Some(self)
        }

        fn as_text(&self) -> Option<&dyn Text> {
            Some(self)
        }
    }

    #[test]
    fn countable_wins_over_text() {
        let (counted, measured) = (Cell::new(false), Cell::new(false));
        let ambiguous = Ambiguous {
            counted: &counted,
            measured: &measured,
        };

        assert!(is_empty(boxed(ambiguous)));
        assert!(counted.get());
        assert!(!measured.get());
    }

    #[test]
    fn unsupported_values_are_described() {
        let mut failure = FailureMessage::new();

        assert!(!match_empty(&Expression::value(boxed(42)), &mut failure));
        assert_eq!(failure.actual_value.as_deref(), Some("i32 type"));
        assert!(failure.postfix_message.starts_with("be empty ("));
        assert!(failure.postfix_message.contains(SUPPORTED_SHAPES));
    }

    #[test]
    fn absent_subject_is_empty() {
        let mut failure = FailureMessage::new();

        assert!(match_empty(&Expression::nil(), &mut failure));
        assert_eq!(failure.actual_value, None);
    }

    #[test]
    fn failed_evaluation_fails() {
        let actual = Expression::<BoxedValue<'_>>::new(|| Err(EvaluationError::msg("detached")));
        let mut failure = FailureMessage::new();

        assert_eq!(
            be_empty_dynamic().satisfies(&actual, &mut failure),
            Satisfiability::Fail
        );
        assert!(!match_empty(&actual, &mut FailureMessage::new()));
        assert_eq!(failure.evaluation_error.as_deref(), Some("detached"));
    }

    #[test]
    fn failure_lists_supported_shapes() {
        let failure = check(&Expression::value(boxed(true)), be_empty_dynamic()).unwrap_err();

        assert_eq!(
            failure.to_string(),
            format!("expected to be empty ({SUPPORTED_SHAPES}), got bool type")
        );
    }
}
