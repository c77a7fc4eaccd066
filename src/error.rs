// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// [`Error`] defines all the error codes that a [`ViewOfStructs`](super::ViewOfStructs) can
/// report at run time.
///
/// Misuse of field selectors and layout tags is rejected by the type checker, therefore none of
/// the codes below describes a malformed [`Field`](super::Field).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Two containers that were expected to have the same extent do not.
    ExtentMismatch,

    /// A positional field lookup named a position beyond the number of fields.
    FieldOutOfRange,

    /// The record index is not smaller than the extent.
    IndexOutOfBounds,

    /// Memory allocation failed.
    OutOfMemory,
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ExtentMismatch => f.write_str("extent mismatch"),
            Error::FieldOutOfRange => f.write_str("field position out of range"),
            Error::IndexOutOfBounds => f.write_str("record index out of bounds"),
            Error::OutOfMemory => f.write_str("out of memory"),
        }
    }
}

impl std::error::Error for Error {}
