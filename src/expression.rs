use std::error::Error;
use std::panic::Location;

use once_cell::unsync::Lazy;

use crate::EvaluationError;

type Evaluation<T> = Result<Option<T>, EvaluationError>;
type Thunk<'a, T> = Box<dyn FnOnce() -> Evaluation<T> + 'a>;

/// The subject of a [`Predicate`](crate::Predicate): a value computed lazily,
/// at most once, which may be absent or fail to evaluate.
///
/// An [`Expression`] is meant to be owned by a single caller, and is
/// therefore neither [`Send`] nor [`Sync`].
///
/// ### Example
/// ```
/// # use emptiness::{EvaluationError, Expression};
/// let present = Expression::value(vec![1, 2]);
/// let absent = Expression::<Vec<i32>>::nil();
/// let failed = Expression::<Vec<i32>>::new(|| Err(EvaluationError::msg("boom")));
///
/// assert_eq!(present.evaluate().unwrap(), Some(&vec![1, 2]));
/// assert_eq!(absent.evaluate().unwrap(), None);
/// assert_eq!(failed.evaluate().unwrap_err().to_string(), "boom");
/// ```
pub struct Expression<'a, T> {
    value: Lazy<Evaluation<T>, Thunk<'a, T>>,
    location: &'static Location<'static>,
}

impl<'a, T: 'a> Expression<'a, T> {
    /// Creates an [`Expression`] evaluated by `evaluate`, located at the
    /// caller.
    #[track_caller]
    pub fn new<F>(evaluate: F) -> Self
    where
        F: FnOnce() -> Evaluation<T> + 'a,
    {
        Self::with_location(evaluate, Location::caller())
    }

    /// Creates an [`Expression`] evaluated by `evaluate`, reported at the
    /// given `location`.
    pub fn with_location<F>(evaluate: F, location: &'static Location<'static>) -> Self
    where
        F: FnOnce() -> Evaluation<T> + 'a,
    {
        let thunk: Thunk<'a, T> = Box::new(evaluate);

        Self {
            value: Lazy::new(thunk),
            location,
        }
    }

    /// Creates an [`Expression`] whose subject is `value`.
    #[track_caller]
    pub fn value(value: T) -> Self {
        Self::new(move || Ok(Some(value)))
    }

    /// Creates an [`Expression`] whose subject is `value`, reported at the
    /// given `location`.
    pub fn value_at(value: T, location: &'static Location<'static>) -> Self {
        Self::with_location(move || Ok(Some(value)), location)
    }

    /// Creates an [`Expression`] whose subject may be absent.
    #[track_caller]
    pub fn from_option(value: Option<T>) -> Self {
        Self::new(move || Ok(value))
    }

    /// Creates an [`Expression`] without a subject.
    #[track_caller]
    pub fn nil() -> Self {
        Self::new(|| Ok(None))
    }

    /// Creates an [`Expression`] from a fallible computation.
    ///
    /// ```
    /// # use emptiness::Expression;
    /// let actual = Expression::try_from_fn(|| "12a".parse::<u32>());
    ///
    /// assert!(actual.evaluate().is_err());
    /// ```
    #[track_caller]
    pub fn try_from_fn<F, E>(evaluate: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + 'a,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self::new(move || {
            evaluate()
                .map(Some)
                .map_err(|error| EvaluationError::Source(error.into()))
        })
    }
}

impl<'a, T> Expression<'a, T> {
    /// Evaluates the subject on first call, and returns the memoized outcome.
    pub fn evaluate(&self) -> Result<Option<&T>, &EvaluationError> {
        Lazy::force(&self.value).as_ref().map(Option::as_ref)
    }

    /// Returns where the expression was created.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}
