// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

/// [`Metadata`] describes the shape of the memory a [`ViewOfStructs`](super::ViewOfStructs)
/// allocates.
///
/// It is forwarded verbatim to every underlying [`Array`](super::Array); the columnar layout
/// hands the same [`Metadata`] to each per-field array.
///
/// # Examples
///
/// ```
/// use view_of_structs::Metadata;
///
/// let metadata = Metadata::new(16).with_label("particles");
/// assert_eq!(metadata.extent(), 16);
/// assert_eq!(metadata.label(), "particles");
///
/// let metadata: Metadata = ("cells", 4).into();
/// assert_eq!(metadata.extent(), 4);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Metadata {
    /// A human readable name of the allocation.
    label: String,

    /// The number of records.
    extent: usize,
}

impl Metadata {
    /// Creates a new unlabeled [`Metadata`] for `extent` records.
    #[inline]
    #[must_use]
    pub fn new(extent: usize) -> Metadata {
        Metadata {
            label: String::new(),
            extent,
        }
    }

    /// Attaches a label.
    #[inline]
    #[must_use]
    pub fn with_label<L: Into<String>>(mut self, label: L) -> Metadata {
        self.label = label.into();
        self
    }

    /// Returns the label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the number of records.
    #[inline]
    #[must_use]
    pub fn extent(&self) -> usize {
        self.extent
    }
}

impl From<usize> for Metadata {
    #[inline]
    fn from(extent: usize) -> Self {
        Metadata::new(extent)
    }
}

impl From<(&str, usize)> for Metadata {
    #[inline]
    fn from((label, extent): (&str, usize)) -> Self {
        Metadata::new(extent).with_label(label)
    }
}

impl From<(String, usize)> for Metadata {
    #[inline]
    fn from((label, extent): (String, usize)) -> Self {
        Metadata::new(extent).with_label(label)
    }
}
