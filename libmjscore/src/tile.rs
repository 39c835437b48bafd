use crate::error::{ParseError, ValidationError};
use crate::hand;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use derivative::Derivative;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub enum Suit {
    /// Characters, `m`.
    #[default]
    Man,
    /// Circles, `p`.
    Pin,
    /// Bamboo, `s`.
    Sou,
    /// Winds and dragons, `z`.
    Honor,
}

/// A single tile.
///
/// Equality and hashing only look at the suit and the rank, the red five flag
/// only matters for dora counting.
#[derive(Clone, Copy, Derivative)]
#[derivative(Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile {
    suit: Suit,
    #[derivative(Default(value = "1"))]
    rank: u8,
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    is_aka: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Wind {
    #[default]
    East,
    South,
    West,
    North,
}

impl Suit {
    pub const NUMBERS: [Self; 3] = [Self::Man, Self::Pin, Self::Sou];
    pub const ALL: [Self; 4] = [Self::Man, Self::Pin, Self::Sou, Self::Honor];

    #[inline]
    #[must_use]
    pub const fn is_number(self) -> bool {
        !matches!(self, Self::Honor)
    }

    #[inline]
    #[must_use]
    pub const fn max_rank(self) -> u8 {
        if self.is_number() { 9 } else { 7 }
    }

    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Man => 'm',
            Self::Pin => 'p',
            Self::Sou => 's',
            Self::Honor => 'z',
        }
    }

    /// Case-insensitive.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'm' => Some(Self::Man),
            'p' => Some(Self::Pin),
            's' => Some(Self::Sou),
            'z' => Some(Self::Honor),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self as usize
    }
}

impl Tile {
    pub const EAST: Self = Self::honor(1);
    pub const SOUTH: Self = Self::honor(2);
    pub const WEST: Self = Self::honor(3);
    pub const NORTH: Self = Self::honor(4);
    pub const HAKU: Self = Self::honor(5);
    pub const HATSU: Self = Self::honor(6);
    pub const CHUN: Self = Self::honor(7);

    pub const WINDS: [Self; 4] = [Self::EAST, Self::SOUTH, Self::WEST, Self::NORTH];
    pub const DRAGONS: [Self; 3] = [Self::HAKU, Self::HATSU, Self::CHUN];

    const fn honor(rank: u8) -> Self {
        Self {
            suit: Suit::Honor,
            rank,
            is_aka: false,
        }
    }

    /// Rank 0 of a number suit is the red five.
    pub const fn new(suit: Suit, rank: u8) -> Result<Self, ValidationError> {
        if suit.is_number() && rank == 0 {
            return Ok(Self {
                suit,
                rank: 5,
                is_aka: true,
            });
        }
        if rank == 0 || rank > suit.max_rank() {
            return Err(ValidationError::RankOutOfRange { suit, rank });
        }
        Ok(Self {
            suit,
            rank,
            is_aka: false,
        })
    }

    #[inline]
    #[must_use]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    #[must_use]
    pub const fn is_aka(self) -> bool {
        self.is_aka
    }

    #[inline]
    #[must_use]
    pub const fn deaka(self) -> Self {
        Self {
            is_aka: false,
            ..self
        }
    }

    /// 0..34, numbers first then honors.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.suit.as_usize() * 9 + self.rank as usize - 1
    }

    #[inline]
    #[must_use]
    pub const fn is_honor(self) -> bool {
        !self.suit.is_number()
    }

    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.suit.is_number() && (self.rank == 1 || self.rank == 9)
    }

    /// Terminal or honor.
    #[inline]
    #[must_use]
    pub const fn is_yaokyuu(self) -> bool {
        self.is_honor() || self.is_terminal()
    }

    #[inline]
    #[must_use]
    pub const fn is_simple(self) -> bool {
        !self.is_yaokyuu()
    }

    #[inline]
    #[must_use]
    pub const fn is_wind(self) -> bool {
        self.is_honor() && self.rank <= 4
    }

    #[inline]
    #[must_use]
    pub const fn is_dragon(self) -> bool {
        self.is_honor() && self.rank >= 5
    }

    /// The tile `n` ranks above in the same number suit.
    #[must_use]
    pub fn offset(self, n: u8) -> Option<Self> {
        let rank = self.rank + n;
        (self.suit.is_number() && rank <= 9).then_some(Self {
            suit: self.suit,
            rank,
            is_aka: false,
        })
    }

    /// The dora indicated by this tile when it is used as an indicator.
    #[must_use]
    pub const fn next_dora(self) -> Self {
        let rank = match self.suit {
            Suit::Honor if self.rank <= 4 => self.rank % 4 + 1,
            Suit::Honor => (self.rank - 4) % 3 + 5,
            _ => self.rank % 9 + 1,
        };
        Self {
            suit: self.suit,
            rank,
            is_aka: false,
        }
    }

    /// Order within a suit. Tiles of different suits are not comparable.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, ValidationError> {
        self.partial_cmp(other)
            .ok_or(ValidationError::CrossSuitCompare(self.suit, other.suit))
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.suit == other.suit).then(|| self.rank.cmp(&other.rank))
    }
}

impl Wind {
    #[inline]
    #[must_use]
    pub const fn as_tile(self) -> Tile {
        Tile::WINDS[self as usize]
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = if self.is_aka { 0 } else { self.rank };
        write!(f, "{rank}{}", self.suit.as_char())
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::East => "E",
            Self::South => "S",
            Self::West => "W",
            Self::North => "N",
        })
    }
}

impl FromStr for Tile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hand::parse_tile(s)
    }
}

impl FromStr for Wind {
    type Err = ParseError;

    /// Accepts `E`/`S`/`W`/`N` or a wind in notation like `2z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "E" => return Ok(Self::East),
            "S" => return Ok(Self::South),
            "W" => return Ok(Self::West),
            "N" => return Ok(Self::North),
            _ => {}
        }
        let tile = hand::parse_tile(s)?;
        match Tile::WINDS.iter().position(|&w| w == tile) {
            Some(idx) => Ok([Self::East, Self::South, Self::West, Self::North][idx]),
            None => Err(ParseError::InvalidRank {
                suit: tile.suit,
                digit: tile.rank,
            }),
        }
    }
}

impl Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
