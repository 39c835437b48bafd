//! Error taxonomy of the library.
//!
//! * [`ParseError`]: malformed compact notation, surfaced to the caller.
//! * [`ValidationError`]: a tile, group or pair that cannot exist. The
//!   decomposer treats it as a dead branch instead of propagating it.
//! * [`UnsupportedScoreError`]: a (fu, han) pair the score table does not
//!   cover, which means the fu math upstream is broken.
use crate::tile::Suit;
use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Neither a digit, a suit letter nor whitespace.
    InvalidChar(char),
    /// Digits at the end of the input with no suit letter after them.
    MissingSuit(String),
    /// A digit that is not a rank of the suit it belongs to, like `8z`.
    InvalidRank { suit: Suit, digit: u8 },
    /// Expected an exact number of tiles, e.g. a single winning tile.
    TileCount { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    RankOutOfRange { suit: Suit, rank: u8 },
    GroupSize(usize),
    MixedSuits,
    NotConsecutive,
    HonorSequence,
    /// Four tiles that are not all identical.
    QuadMismatch,
    PairSize(usize),
    PairMismatch,
    /// Tiles of different suits have no order.
    CrossSuitCompare(Suit, Suit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedScoreError {
    pub fu: u8,
    pub han: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Parse(ParseError),
    Validation(ValidationError),
    UnsupportedScore(UnsupportedScoreError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar(c) => write!(f, "{c:?} is not a valid tile character"),
            Self::MissingSuit(digits) => write!(f, "digits {digits} are not followed by a suit"),
            Self::InvalidRank { suit, digit } => write!(f, "{digit} is not a valid rank of {suit:?}"),
            Self::TileCount { expected, actual } => {
                write!(f, "expected {expected} tile(s), got {actual}")
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RankOutOfRange { suit, rank } => {
                write!(f, "rank {rank} is out of range for {suit:?}")
            }
            Self::GroupSize(n) => write!(f, "a group must have 3 or 4 tiles, got {n}"),
            Self::MixedSuits => f.write_str("tiles of a group must share a suit"),
            Self::NotConsecutive => f.write_str("sequence ranks are not consecutive"),
            Self::HonorSequence => f.write_str("honor tiles cannot form a sequence"),
            Self::QuadMismatch => f.write_str("quad tiles are not identical"),
            Self::PairSize(n) => write!(f, "a pair must have 2 tiles, got {n}"),
            Self::PairMismatch => f.write_str("pair tiles are not identical"),
            Self::CrossSuitCompare(l, r) => write!(f, "cannot compare {l:?} with {r:?}"),
        }
    }
}

impl fmt::Display for UnsupportedScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported fu {} for han {}", self.fu, self.han)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Validation(e) => write!(f, "validation error: {e}"),
            Self::UnsupportedScore(e) => write!(f, "score error: {e}"),
        }
    }
}

impl error::Error for ParseError {}
impl error::Error for ValidationError {}
impl error::Error for UnsupportedScoreError {}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Validation(e) => Some(e),
            Self::UnsupportedScore(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<UnsupportedScoreError> for Error {
    fn from(e: UnsupportedScoreError) -> Self {
        Self::UnsupportedScore(e)
    }
}
