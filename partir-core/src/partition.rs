//! The [`Partition`] value type and the conjugate transform.
//!
//! Partitions are stored in canonical non-increasing order. Zero parts may
//! only appear as trailing padding, which the ordering already guarantees.

use std::{fmt, iter, ops::Deref};

use crate::error::{PartitionError, Result};

/// An integer partition in canonical non-increasing order.
///
/// The zero-padded form keeps trailing zeros so that every member of a
/// feasible set has the same length.
///
/// # Examples
/// ```
/// use partir_core::Partition;
///
/// let partition = Partition::try_from(vec![4, 2, 2, 0])?;
/// assert_eq!(partition.total(), 8);
/// assert_eq!(partition.len(), 4);
/// assert_eq!(partition.positive_len(), 3);
/// assert_eq!(partition.to_string(), "4 2 2 0");
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Partition {
    parts: Vec<usize>,
}

impl Partition {
    /// Wraps parts already known to be non-increasing.
    pub(crate) fn from_canonical(parts: Vec<usize>) -> Self {
        debug_assert!(is_non_increasing(&parts), "parts must be non-increasing");
        Self { parts }
    }

    /// Returns the parts as a slice, largest first.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.parts
    }

    /// Consumes the partition and returns the underlying parts.
    #[must_use]
    pub fn into_vec(self) -> Vec<usize> {
        self.parts
    }

    /// Sum of all parts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.parts.iter().sum()
    }

    /// Largest part, or zero for the empty partition.
    #[must_use]
    pub fn largest(&self) -> usize {
        self.parts.first().copied().unwrap_or(0)
    }

    /// Number of strictly positive parts.
    #[must_use]
    pub fn positive_len(&self) -> usize {
        self.parts.partition_point(|&part| part > 0)
    }

    /// Returns a copy without trailing zero padding.
    #[must_use]
    pub fn strip_zeros(&self) -> Self {
        Self {
            parts: self.positive_parts().to_vec(),
        }
    }

    /// Pads with trailing zeros until the partition has `len` parts.
    ///
    /// Partitions already at least `len` long are returned unchanged.
    #[must_use]
    pub fn pad_zeros(mut self, len: usize) -> Self {
        if self.parts.len() < len {
            self.parts.resize(len, 0);
        }
        self
    }

    /// Transposes the partition's diagram, ignoring zero padding.
    ///
    /// # Examples
    /// ```
    /// use partir_core::Partition;
    ///
    /// let partition = Partition::try_from(vec![5, 3, 1, 0])?;
    /// assert_eq!(partition.conjugate().as_slice(), &[3, 2, 2, 1, 1]);
    /// # Ok::<(), partir_core::PartitionError>(())
    /// ```
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self {
            parts: conjugate_parts(self.positive_parts()),
        }
    }

    fn positive_parts(&self) -> &[usize] {
        let (positive, _) = self.parts.split_at(self.positive_len());
        positive
    }
}

impl TryFrom<Vec<usize>> for Partition {
    type Error = PartitionError;

    fn try_from(parts: Vec<usize>) -> Result<Self> {
        if !is_non_increasing(&parts) {
            return Err(PartitionError::NotCanonical {
                reason: "parts must be non-increasing",
            });
        }
        Ok(Self { parts })
    }
}

impl From<Partition> for Vec<usize> {
    fn from(partition: Partition) -> Self {
        partition.parts
    }
}

impl Deref for Partition {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.parts
    }
}

impl AsRef<[usize]> for Partition {
    fn as_ref(&self) -> &[usize] {
        &self.parts
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.parts.iter();
        if let Some(first) = parts.next() {
            write!(f, "{first}")?;
        }
        for part in parts {
            write!(f, " {part}")?;
        }
        Ok(())
    }
}

/// Computes the conjugate of a partition given as a non-increasing slice.
///
/// Zero padding is ignored and the empty partition maps to itself.
///
/// # Errors
/// Returns [`PartitionError::NotCanonical`] when `parts` is not
/// non-increasing.
///
/// # Examples
/// ```
/// use partir_core::conjugate;
///
/// let conj = conjugate(&[12, 9, 8, 8, 7, 5, 4, 2, 2, 1])?;
/// assert_eq!(conj.as_slice(), &[10, 9, 7, 7, 6, 5, 5, 4, 2, 1, 1, 1]);
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
pub fn conjugate(parts: &[usize]) -> Result<Partition> {
    Partition::try_from(parts.to_vec()).map(|partition| partition.conjugate())
}

/// Transposes positive, non-increasing `parts`.
///
/// Column `i` of the conjugate counts the parts larger than `i`, so the
/// smallest part contributes `len` copies of `len` and each drop between
/// neighbours contributes copies of the shorter prefix length.
pub(crate) fn conjugate_parts(parts: &[usize]) -> Vec<usize> {
    let mut conjugate = Vec::with_capacity(parts.first().copied().unwrap_or(0));
    let mut previous = 0;
    for (index, &part) in parts.iter().enumerate().rev() {
        conjugate.extend(iter::repeat_n(index + 1, part.saturating_sub(previous)));
        previous = part;
    }
    conjugate
}

fn is_non_increasing(parts: &[usize]) -> bool {
    parts.windows(2).all(|pair| matches!(pair, [left, right] if left >= right))
}

/// Rejects `(total, parts)` shapes that admit no partition.
///
/// `parts == 0` is always invalid; more parts than the total is only
/// acceptable when zero padding is enabled.
pub(crate) fn validate_shape(total: usize, parts: usize, zero_padding: bool) -> Result<()> {
    if parts == 0 {
        return Err(PartitionError::ZeroParts);
    }
    if !zero_padding && parts > total {
        return Err(PartitionError::PartsExceedTotal { total, parts });
    }
    Ok(())
}
