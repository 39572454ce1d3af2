//! Capabilities a subject may expose to emptiness checks.
//!
//! A type may expose several capabilities at once: a [`Vec`] is both a
//! sequence (`&Vec<T>: IntoIterator`) and [`Countable`]. Callers on the static
//! path pick a check explicitly; the dynamic path resolves the overlap in a
//! fixed order (see [`bridge::probe`](crate::bridge::probe)).
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// A collection which knows how many elements it holds.
pub trait Countable {
    /// Returns the number of elements in the collection.
    fn count(&self) -> usize;
}

/// A string-like value with a length.
pub trait Text {
    /// Returns the length of the text in storage units (bytes for UTF-8), which
    /// is zero iff the text is empty.
    fn length(&self) -> usize;
}

impl<C: Countable + ?Sized> Countable for &C {
    fn count(&self) -> usize {
        (**self).count()
    }
}

impl<C: Countable + ?Sized> Countable for Box<C> {
    fn count(&self) -> usize {
        (**self).count()
    }
}

macro_rules! countable {
    ( $( [ $( $generics: tt )* ] $ty: ty ),* $(,)? ) => {
        $(
            impl< $( $generics )* > Countable for $ty {
                fn count(&self) -> usize {
                    self.len()
                }
            }
        )*
    };
}

countable!(
    [T] [T],
    [T, const N: usize] [T; N],
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] LinkedList<T>,
    [T] BinaryHeap<T>,
    [K, V, S] HashMap<K, V, S>,
    [T, S] HashSet<T, S>,
    [K, V] BTreeMap<K, V>,
    [T] BTreeSet<T>,
);

impl<T: Text + ?Sized> Text for &T {
    fn length(&self) -> usize {
        (**self).length()
    }
}

macro_rules! text {
    ( $( [ $( $generics: tt )* ] $ty: ty ),* $(,)? ) => {
        $(
            impl< $( $generics )* > Text for $ty {
                fn length(&self) -> usize {
                    self.len()
                }
            }
        )*
    };
}

text!(
    [] str,
    [] String,
    [] Box<str>,
    [] Rc<str>,
    [] Arc<str>,
    ['a] Cow<'a, str>,
);
