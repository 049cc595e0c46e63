//! Sequence types with validation guarantees.
//!
//! Both types wrap contiguous `f32` storage. Callers holding other layouts or
//! precisions must copy into a `Vec<f32>` (or borrow a `&[f32]`) first; the
//! kernel never reads strided or mixed-precision buffers.

use std::ops::Index;

use crate::error::DtwError;

fn validate(values: &[f32]) -> Result<(), DtwError> {
    if values.is_empty() {
        return Err(DtwError::EmptySequence);
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(DtwError::NonFiniteValue { index });
    }
    Ok(())
}

/// Owned, validated sequence. Guaranteed non-empty with all finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence(Vec<f32>);

impl Sequence {
    /// Create a new sequence, validating that it is non-empty and all values are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySequence`] | `values` is empty |
    /// | [`DtwError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(values: Vec<f32>) -> Result<Self, DtwError> {
        validate(&values)?;
        Ok(Self(values))
    }

    /// Borrow this sequence as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> SequenceView<'_> {
        SequenceView::new_unchecked(&self.0)
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed sequence. Provided to satisfy the
    /// `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl AsRef<[f32]> for Sequence {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

impl TryFrom<Vec<f32>> for Sequence {
    type Error = DtwError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

/// Borrowed, validated view into a sequence. Zero-copy reference.
#[derive(Debug, Clone, Copy)]
pub struct SequenceView<'a>(&'a [f32]);

impl<'a> SequenceView<'a> {
    /// Create a new view, validating that the slice is non-empty and all values are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySequence`] | `slice` is empty |
    /// | [`DtwError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(slice: &'a [f32]) -> Result<Self, DtwError> {
        validate(slice)?;
        Ok(Self(slice))
    }

    pub(crate) fn new_unchecked(slice: &'a [f32]) -> Self {
        Self(slice)
    }

    /// Return the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [f32] {
        self.0
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed view.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy the viewed samples into an owned [`Sequence`].
    #[must_use]
    pub fn to_sequence(&self) -> Sequence {
        Sequence(self.0.to_vec())
    }
}

impl Index<usize> for SequenceView<'_> {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl AsRef<[f32]> for SequenceView<'_> {
    fn as_ref(&self) -> &[f32] {
        self.0
    }
}
