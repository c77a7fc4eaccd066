// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

use super::storage::columnar::ColumnarStorage;
use super::storage::interleaved::InterleavedStorage;
use super::storage::Backend;
use super::Record;
use std::fmt::Debug;

/// [`Layout`] selects the physical memory layout of a [`ViewOfStructs`](super::ViewOfStructs).
///
/// The trait is sealed: [`Interleaved`] and [`Columnar`] are the only layouts, and any other type
/// is rejected when used as the layout of a [`ViewOfStructs`](super::ViewOfStructs).
pub trait Layout: private::Sealed + Clone + Copy + Debug + Default + Send + Sync + 'static {
    /// The name of the layout.
    const NAME: &'static str;

    /// The [`Backend`] that stores records of type `R` in this layout.
    type Storage<R: Record>: Backend<R>;
}

/// [`Interleaved`] stores whole records contiguously: array-of-structs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Interleaved;

/// [`Columnar`] stores each field in its own contiguous array: struct-of-arrays.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Columnar;

impl Layout for Interleaved {
    const NAME: &'static str = "interleaved";
    type Storage<R: Record> = InterleavedStorage<R>;
}

impl Layout for Columnar {
    const NAME: &'static str = "columnar";
    type Storage<R: Record> = ColumnarStorage<R>;
}

mod private {
    pub trait Sealed {}

    impl Sealed for super::Interleaved {}
    impl Sealed for super::Columnar {}
}
