//! Error types for the partition core library.
//!
//! Every failure is detected synchronously and reported before any output is
//! produced. Variants fall into the [`ErrorKind`] taxonomy so callers can tell
//! malformed requests apart from requests that are well formed but cannot be
//! satisfied.

use std::fmt;

use num_bigint::BigUint;
use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr, $kind:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }

            /// Return the broad category this code belongs to.
            #[must_use]
            pub const fn kind(self) -> ErrorKind {
                match self {
                    $(Self::$CodeVariant => ErrorKind::$kind,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Broad failure categories shared by every [`PartitionError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The caller supplied arguments outside the operation's domain.
    InvalidArgument,
    /// The arguments are well formed but the feasible set cannot satisfy them.
    Infeasible,
    /// Internal bookkeeping went out of range. Indicates a bug in this crate.
    Internal,
}

/// Error type produced by counting, sampling and enumeration operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PartitionError {
    /// Partitions must have at least one part.
    #[error("number of parts must be at least 1")]
    ZeroParts,
    /// A partition into positive parts cannot have more parts than its total.
    #[error("cannot split {total} into {parts} positive parts")]
    PartsExceedTotal {
        /// Requested total.
        total: usize,
        /// Requested number of parts.
        parts: usize,
    },
    /// A sample must contain at least one partition.
    #[error("sample size must be at least 1")]
    EmptySample,
    /// The algorithm name could not be parsed.
    #[error(
        "unknown sampling method `{name}`; expected bottom_up, top_down, divide_and_conquer, multiplicity or best"
    )]
    UnknownMethod {
        /// Raw name supplied by the caller.
        name: String,
    },
    /// A caller-supplied partition is not in canonical form.
    #[error("partition is not canonical: {reason}")]
    NotCanonical {
        /// Description of the violated constraint.
        reason: &'static str,
    },
    /// No partition of `total` into `parts` parts has the requested largest part.
    #[error("no partition of {total} into {parts} parts has largest part {largest}")]
    LargestPartOutOfRange {
        /// Requested total.
        total: usize,
        /// Requested number of parts.
        parts: usize,
        /// Requested largest part.
        largest: usize,
    },
    /// Enumeration asked for more distinct partitions than the feasible set holds.
    #[error(
        "requested {requested} distinct partitions of {total} into {parts} parts but only {available} exist"
    )]
    InsufficientPartitions {
        /// Requested total.
        total: usize,
        /// Requested number of parts.
        parts: usize,
        /// Number of partitions the caller asked for.
        requested: usize,
        /// Size of the feasible set.
        available: BigUint,
    },
    /// A lexical cursor was advanced after reporting the last partition.
    #[error("lexical enumeration of {total} into {parts} parts is already exhausted")]
    Exhausted {
        /// Total of the enumerated feasible set.
        total: usize,
        /// Part count of the enumerated feasible set.
        parts: usize,
    },
    /// A rank fell outside `[1, available]`.
    #[error("rank {rank} is outside the feasible set of size {available}")]
    RankOutOfRange {
        /// Rank supplied by the caller.
        rank: BigUint,
        /// Size of the feasible set.
        available: BigUint,
    },
    /// An internal invariant was violated, indicating a logic error.
    #[error("partition invariant violated: {invariant}")]
    InvariantViolation {
        /// Name of the violated invariant to assist debugging.
        invariant: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`PartitionError`] variants.
    enum PartitionErrorCode for PartitionError {
        /// Partitions must have at least one part.
        ZeroParts => ZeroParts => "PARTITION_ZERO_PARTS", InvalidArgument,
        /// More positive parts than the total allows.
        PartsExceedTotal => PartsExceedTotal { .. } => "PARTITION_PARTS_EXCEED_TOTAL", InvalidArgument,
        /// A sample must contain at least one partition.
        EmptySample => EmptySample => "PARTITION_EMPTY_SAMPLE", InvalidArgument,
        /// The algorithm name could not be parsed.
        UnknownMethod => UnknownMethod { .. } => "PARTITION_UNKNOWN_METHOD", InvalidArgument,
        /// A caller-supplied partition is not in canonical form.
        NotCanonical => NotCanonical { .. } => "PARTITION_NOT_CANONICAL", InvalidArgument,
        /// No partition has the requested largest part.
        LargestPartOutOfRange => LargestPartOutOfRange { .. } => "PARTITION_LARGEST_PART_OUT_OF_RANGE", Infeasible,
        /// Enumeration asked for more partitions than exist.
        InsufficientPartitions => InsufficientPartitions { .. } => "PARTITION_INSUFFICIENT_PARTITIONS", Infeasible,
        /// A lexical cursor was advanced past the last partition.
        Exhausted => Exhausted { .. } => "PARTITION_EXHAUSTED", Infeasible,
        /// A rank fell outside the feasible set.
        RankOutOfRange => RankOutOfRange { .. } => "PARTITION_RANK_OUT_OF_RANGE", InvalidArgument,
        /// An internal invariant was violated.
        InvariantViolation => InvariantViolation { .. } => "PARTITION_INVARIANT_VIOLATION", Internal,
    }
}

impl PartitionError {
    /// Returns the [`ErrorKind`] this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PartitionError>;
