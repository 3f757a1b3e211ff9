//! Deterministic lexical enumeration of partitions into exactly `parts`
//! positive parts.
//!
//! Lexical order here is descending: [`first`] has the largest possible
//! leading part and [`last`] is the most even partition. [`next_partition`]
//! steps from one member to its lexical successor without consulting the
//! count oracle, so enumeration is an independent cross-check on the
//! samplers.

use std::{iter::FusedIterator, mem};

use num_bigint::BigUint;
use tracing::{debug, instrument};

use crate::{
    count::num_partitions,
    error::{PartitionError, Result},
    partition::{Partition, validate_shape},
};

/// Lexically first partition of `total` into `parts` parts: one large part
/// followed by ones.
///
/// # Errors
/// Returns [`PartitionError::ZeroParts`] or
/// [`PartitionError::PartsExceedTotal`] for shapes with no partition.
///
/// # Examples
/// ```
/// let first = partir_core::first(10, 3)?;
/// assert_eq!(first.as_slice(), &[8, 1, 1]);
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
pub fn first(total: usize, parts: usize) -> Result<Partition> {
    validate_shape(total, parts, false)?;
    Ok(first_unchecked(total, parts))
}

/// Lexically last partition of `total` into `parts` parts, the most even one.
///
/// # Errors
/// Returns [`PartitionError::ZeroParts`] or
/// [`PartitionError::PartsExceedTotal`] for shapes with no partition.
///
/// # Examples
/// ```
/// let last = partir_core::last(10, 3)?;
/// assert_eq!(last.as_slice(), &[4, 3, 3]);
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
pub fn last(total: usize, parts: usize) -> Result<Partition> {
    validate_shape(total, parts, false)?;
    let mut even = Vec::with_capacity(parts);
    fill_even(&mut even, total, parts);
    Ok(Partition::from_canonical(even))
}

/// Smallest largest part any partition of `total` into `parts` parts can have.
///
/// # Errors
/// Returns [`PartitionError::ZeroParts`] or
/// [`PartitionError::PartsExceedTotal`] for shapes with no partition.
pub fn min_max(total: usize, parts: usize) -> Result<usize> {
    validate_shape(total, parts, false)?;
    Ok(total.div_ceil(parts))
}

/// Lexically first partition of `total` into `parts` parts whose largest
/// part is exactly `largest`.
///
/// # Errors
/// Returns [`PartitionError::LargestPartOutOfRange`] when `largest` is
/// below [`min_max`] or above `total - parts + 1`, plus the shape errors of
/// [`first`].
///
/// # Examples
/// ```
/// let partition = partir_core::first_with_largest(16, 6, 10)?;
/// assert_eq!(partition.as_slice(), &[10, 2, 1, 1, 1, 1]);
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
pub fn first_with_largest(total: usize, parts: usize, largest: usize) -> Result<Partition> {
    validate_largest(total, parts, largest)?;
    let mut greedy = Vec::with_capacity(parts);
    fill_greedy(&mut greedy, total, parts, largest);
    Ok(Partition::from_canonical(greedy))
}

/// Lexically last partition of `total` into `parts` parts whose largest part
/// is exactly `largest`: the leading part followed by the most even tail.
///
/// # Errors
/// Same as [`first_with_largest`].
pub fn last_with_largest(total: usize, parts: usize, largest: usize) -> Result<Partition> {
    validate_largest(total, parts, largest)?;
    let mut tail = Vec::with_capacity(parts);
    tail.push(largest);
    fill_even(&mut tail, total - largest, parts - 1);
    Ok(Partition::from_canonical(tail))
}

/// Lexical successor of `parts`, or `None` when `parts` is the last
/// partition of its total into its length.
///
/// # Errors
/// Returns [`PartitionError::ZeroParts`] for an empty slice and
/// [`PartitionError::NotCanonical`] when the parts are not non-increasing
/// or contain zeros.
///
/// # Examples
/// ```
/// let next = partir_core::next_partition(&[10, 9, 8, 1])?;
/// assert_eq!(next.map(partir_core::Partition::into_vec), Some(vec![10, 9, 7, 2]));
/// assert_eq!(partir_core::next_partition(&[4, 3, 3])?, None);
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
pub fn next_partition(parts: &[usize]) -> Result<Option<Partition>> {
    if parts.is_empty() {
        return Err(PartitionError::ZeroParts);
    }
    let partition = Partition::try_from(parts.to_vec())?;
    if partition.positive_len() != partition.len() {
        return Err(PartitionError::NotCanonical {
            reason: "lexical enumeration requires positive parts",
        });
    }
    Ok(successor(&partition))
}

#[derive(Clone, Debug)]
enum CursorState {
    Fresh,
    At(Partition),
    Finished,
}

/// Stateful walk over the feasible set in lexical order.
///
/// [`LexicalCursor::advance`] yields `Some` for every member, `None` once at
/// termination, and [`PartitionError::Exhausted`] on any later call.
///
/// # Examples
/// ```
/// use partir_core::{LexicalCursor, PartitionError};
///
/// let mut cursor = LexicalCursor::new(5, 2)?;
/// assert_eq!(cursor.advance()?.map(|p| p.to_vec()), Some(vec![4, 1]));
/// assert_eq!(cursor.advance()?.map(|p| p.to_vec()), Some(vec![3, 2]));
/// assert_eq!(cursor.advance()?, None);
/// assert!(matches!(cursor.advance(), Err(PartitionError::Exhausted { .. })));
/// # Ok::<(), PartitionError>(())
/// ```
#[derive(Clone, Debug)]
pub struct LexicalCursor {
    total: usize,
    parts: usize,
    state: CursorState,
}

impl LexicalCursor {
    /// Creates a cursor positioned before [`first`].
    ///
    /// # Errors
    /// Returns the shape errors of [`first`].
    pub fn new(total: usize, parts: usize) -> Result<Self> {
        validate_shape(total, parts, false)?;
        Ok(Self {
            total,
            parts,
            state: CursorState::Fresh,
        })
    }

    /// Moves to the next partition.
    ///
    /// # Errors
    /// Returns [`PartitionError::Exhausted`] when termination has already
    /// been reported.
    pub fn advance(&mut self) -> Result<Option<&Partition>> {
        let next = match mem::replace(&mut self.state, CursorState::Finished) {
            CursorState::Fresh => Some(first_unchecked(self.total, self.parts)),
            CursorState::At(current) => successor(&current),
            CursorState::Finished => {
                return Err(PartitionError::Exhausted {
                    total: self.total,
                    parts: self.parts,
                });
            }
        };
        if let Some(partition) = next {
            self.state = CursorState::At(partition);
        }
        Ok(self.current())
    }

    /// Partition the cursor currently rests on.
    #[must_use]
    pub fn current(&self) -> Option<&Partition> {
        match &self.state {
            CursorState::At(partition) => Some(partition),
            CursorState::Fresh | CursorState::Finished => None,
        }
    }

    /// Returns `true` once termination has been reported.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, CursorState::Finished)
    }
}

/// Iterator over the feasible set in lexical order.
#[derive(Clone, Debug)]
pub struct LexicalPartitions {
    cursor: LexicalCursor,
}

impl Iterator for LexicalPartitions {
    type Item = Partition;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.advance().ok().flatten().cloned()
    }
}

impl FusedIterator for LexicalPartitions {}

/// Iterates every partition of `total` into `parts` parts, first to last.
///
/// # Errors
/// Returns the shape errors of [`first`].
///
/// # Examples
/// ```
/// let listed: Vec<Vec<usize>> = partir_core::partitions(6, 3)?
///     .map(partir_core::Partition::into_vec)
///     .collect();
/// assert_eq!(listed, vec![vec![4, 1, 1], vec![3, 2, 1], vec![2, 2, 2]]);
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
pub fn partitions(total: usize, parts: usize) -> Result<LexicalPartitions> {
    Ok(LexicalPartitions {
        cursor: LexicalCursor::new(total, parts)?,
    })
}

/// Materialises the complete feasible set in lexical order.
///
/// The set grows super-exponentially, so callers are expected to bound
/// `total`.
///
/// # Errors
/// Returns the shape errors of [`first`].
#[instrument(name = "core.feasible_set", err)]
pub fn feasible_set(total: usize, parts: usize) -> Result<Vec<Partition>> {
    let members: Vec<Partition> = partitions(total, parts)?.collect();
    debug!(members = members.len(), "enumerated feasible set");
    Ok(members)
}

/// Returns the first `count` partitions of `total` into `parts` parts in
/// lexical order.
///
/// # Errors
/// Returns [`PartitionError::InsufficientPartitions`] when `count` exceeds
/// the size of the feasible set, plus the shape errors of [`first`].
pub fn distinct_partitions(total: usize, parts: usize, count: usize) -> Result<Vec<Partition>> {
    validate_shape(total, parts, false)?;
    let available = num_partitions(total, parts)?;
    if BigUint::from(count) > available {
        return Err(PartitionError::InsufficientPartitions {
            total,
            parts,
            requested: count,
            available,
        });
    }
    Ok(partitions(total, parts)?.take(count).collect())
}

fn validate_largest(total: usize, parts: usize, largest: usize) -> Result<()> {
    let smallest = min_max(total, parts)?;
    if largest < smallest || largest > total - parts + 1 {
        return Err(PartitionError::LargestPartOutOfRange {
            total,
            parts,
            largest,
        });
    }
    Ok(())
}

fn first_unchecked(total: usize, parts: usize) -> Partition {
    let mut greedy = Vec::with_capacity(parts);
    fill_greedy(&mut greedy, total, parts, total - parts + 1);
    Partition::from_canonical(greedy)
}

/// Rewrites the suffix starting at the rightmost part that exceeds the final
/// part by more than one as the first partition of the suffix's sum whose
/// leading part is one smaller.
fn successor(partition: &Partition) -> Option<Partition> {
    let (&smallest, _) = partition.split_last()?;
    let pivot = partition.iter().rposition(|&part| part > smallest + 1)?;
    let (prefix, suffix) = partition.split_at(pivot);
    let largest = suffix.first()? - 1;
    let mut next = Vec::with_capacity(partition.len());
    next.extend_from_slice(prefix);
    fill_greedy(&mut next, suffix.iter().sum(), suffix.len(), largest);
    Some(Partition::from_canonical(next))
}

/// Appends the lexically largest partition of `total` into `parts` positive
/// parts with no part above `largest`. Each part keeps one unit in reserve
/// for every part still to come.
fn fill_greedy(out: &mut Vec<usize>, mut total: usize, parts: usize, mut largest: usize) {
    for still_to_come in (0..parts).rev() {
        largest = largest.min(total - still_to_come);
        out.push(largest);
        total -= largest;
    }
}

fn fill_even(out: &mut Vec<usize>, total: usize, parts: usize) {
    if parts == 0 {
        return;
    }
    let base = total / parts;
    let extra = total % parts;
    out.extend(std::iter::repeat_n(base + 1, extra));
    out.extend(std::iter::repeat_n(base, parts - extra));
}
