// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Compile-time field selectors.

use std::marker::PhantomData;

/// [`Field`] names a single field of a [`Record`](super::Record) without any run-time cost.
///
/// The position is carried in the type; the value itself is zero-sized and is only ever used to
/// steer trait resolution.
///
/// # Examples
///
/// ```
/// use view_of_structs::{Field, Selector};
///
/// assert_eq!(<Field<2> as Selector>::INDEX, 2);
/// assert_eq!(std::mem::size_of::<Field<2>>(), 0);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Field<const I: usize>;

/// [`Nat`] is a natural number encoded as a type.
///
/// Field resolution recurses on [`Nat`] rather than on the `const` parameter of [`Field`], since
/// `I - 1` cannot appear in a generic position on stable Rust.
pub trait Nat {
    /// The value of the number.
    const VALUE: usize;
}

/// Zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct Z;

/// The successor of `N`.
#[derive(Clone, Copy, Debug, Default)]
pub struct S<N>(PhantomData<N>);

impl Nat for Z {
    const VALUE: usize = 0;
}

impl<N: Nat> Nat for S<N> {
    const VALUE: usize = N::VALUE + 1;
}

/// [`Selector`] converts a field token into the type-level position used by field resolution.
pub trait Selector: Copy {
    /// The position as a [`Nat`].
    type Index: Nat;

    /// The position as a plain number.
    const INDEX: usize = <Self::Index as Nat>::VALUE;
}

macro_rules! selectors {
    ($nat:ty; $i:literal) => {
        impl Selector for Field<$i> {
            type Index = $nat;
        }
    };
    ($nat:ty; $i:literal, $($rest:literal),+) => {
        impl Selector for Field<$i> {
            type Index = $nat;
        }
        selectors!(S<$nat>; $($rest),+);
    };
}

selectors!(Z;
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
    16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31);

/// The largest number of fields a [`Record`](super::Record) can be addressed with.
pub const MAX_FIELDS: usize = 32;
