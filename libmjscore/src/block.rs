use crate::error::ValidationError;
use crate::hand::tiles_to_string;
use crate::tile::{Suit, Tile};
use std::fmt;

use serde::Serialize;

/// A sequence, triplet or quad.
///
/// Tiles are stored sorted by rank, so two groups built from the same tiles
/// compare equal no matter the input order. Red fives do not affect equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Group {
    Sequence { tiles: [Tile; 3], is_open: bool },
    Triplet { tiles: [Tile; 3], is_open: bool },
    Quad { tiles: [Tile; 4], is_open: bool },
}

/// The head. Always concealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pair {
    tiles: [Tile; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    Pair(Pair),
    Group(Group),
}

/// Locates a block inside a [`Hand`](crate::algo::decompose::Hand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockId {
    /// Index into the pairs; always 0 for a standard hand.
    Pair(usize),
    Group(usize),
    /// Thirteen orphans, which has no separable blocks.
    Whole,
}

impl Group {
    pub fn new(tiles: &[Tile], is_open: bool) -> Result<Self, ValidationError> {
        if !matches!(tiles.len(), 3 | 4) {
            return Err(ValidationError::GroupSize(tiles.len()));
        }
        let suit = tiles[0].suit();
        if tiles.iter().any(|t| t.suit() != suit) {
            return Err(ValidationError::MixedSuits);
        }

        let mut sorted = tiles.to_vec();
        sorted.sort_by_key(|t| (t.rank(), !t.is_aka()));
        let all_same = sorted.iter().all(|&t| t == sorted[0]);

        if let Ok(tiles) = <[Tile; 4]>::try_from(sorted.as_slice()) {
            return if all_same {
                Ok(Self::Quad { tiles, is_open })
            } else {
                Err(ValidationError::QuadMismatch)
            };
        }
        let tiles = <[Tile; 3]>::try_from(sorted.as_slice())
            .map_err(|_| ValidationError::GroupSize(sorted.len()))?;
        if all_same {
            return Ok(Self::Triplet { tiles, is_open });
        }
        if suit == Suit::Honor {
            return Err(ValidationError::HonorSequence);
        }
        let base = tiles[0].rank();
        if tiles[1].rank() != base + 1 || tiles[2].rank() != base + 2 {
            return Err(ValidationError::NotConsecutive);
        }
        Ok(Self::Sequence { tiles, is_open })
    }

    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        match self {
            Self::Sequence { tiles, .. } | Self::Triplet { tiles, .. } => tiles.as_slice(),
            Self::Quad { tiles, .. } => tiles.as_slice(),
        }
    }

    /// Lowest tile. For a triplet or quad, the representative tile.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Tile {
        self.tiles()[0].deaka()
    }

    #[inline]
    #[must_use]
    pub fn suit(&self) -> Suit {
        self.first().suit()
    }

    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        match *self {
            Self::Sequence { is_open, .. }
            | Self::Triplet { is_open, .. }
            | Self::Quad { is_open, .. } => is_open,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_concealed(&self) -> bool {
        !self.is_open()
    }

    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence { .. })
    }

    /// Triplet or quad.
    #[inline]
    #[must_use]
    pub const fn is_kotsu(&self) -> bool {
        !self.is_sequence()
    }

    #[inline]
    #[must_use]
    pub const fn is_quad(&self) -> bool {
        matches!(self, Self::Quad { .. })
    }

    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles().contains(&tile)
    }

    #[must_use]
    pub fn contains_yaokyuu(&self) -> bool {
        self.tiles().iter().any(|t| t.is_yaokyuu())
    }

    #[must_use]
    pub fn is_all_yaokyuu(&self) -> bool {
        self.tiles().iter().all(|t| t.is_yaokyuu())
    }

    #[must_use]
    pub fn is_all_simple(&self) -> bool {
        self.tiles().iter().all(|t| t.is_simple())
    }

    #[must_use]
    pub fn aka_count(&self) -> u8 {
        self.tiles().iter().filter(|t| t.is_aka()).count() as u8
    }

    /// Per tile matches against `doras`, which are dora tiles, not indicators.
    #[must_use]
    pub fn dora_matches(&self, doras: &[Tile]) -> u8 {
        count_matches(self.tiles(), doras)
    }

    /// Red fives plus [`Self::dora_matches`].
    #[must_use]
    pub fn dora_count(&self, doras: &[Tile]) -> u8 {
        self.aka_count() + self.dora_matches(doras)
    }

    /// Canonical order inside a hand: by suit, then lowest rank, then kind,
    /// then concealed before open.
    #[must_use]
    pub(crate) fn sort_key(&self) -> (Suit, u8, u8, bool) {
        let kind = match self {
            Self::Sequence { .. } => 0,
            Self::Triplet { .. } => 1,
            Self::Quad { .. } => 2,
        };
        (self.suit(), self.first().rank(), kind, self.is_open())
    }
}

impl Pair {
    pub fn new(tiles: &[Tile]) -> Result<Self, ValidationError> {
        let tiles: [Tile; 2] = tiles
            .try_into()
            .map_err(|_| ValidationError::PairSize(tiles.len()))?;
        if tiles[0] != tiles[1] {
            return Err(ValidationError::PairMismatch);
        }
        Ok(Self { tiles })
    }

    #[inline]
    #[must_use]
    pub const fn tiles(&self) -> &[Tile; 2] {
        &self.tiles
    }

    #[inline]
    #[must_use]
    pub const fn tile(&self) -> Tile {
        self.tiles[0].deaka()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.tile() == tile
    }

    #[must_use]
    pub fn aka_count(&self) -> u8 {
        self.tiles.iter().filter(|t| t.is_aka()).count() as u8
    }

    #[must_use]
    pub fn dora_matches(&self, doras: &[Tile]) -> u8 {
        count_matches(&self.tiles, doras)
    }

    #[must_use]
    pub fn dora_count(&self, doras: &[Tile]) -> u8 {
        self.aka_count() + self.dora_matches(doras)
    }
}

impl Block {
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        match self {
            Self::Pair(p) => p.tiles().as_slice(),
            Self::Group(g) => g.tiles(),
        }
    }

    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles().contains(&tile)
    }

    #[must_use]
    pub const fn is_concealed(&self) -> bool {
        match self {
            Self::Pair(_) => true,
            Self::Group(g) => g.is_concealed(),
        }
    }

    #[must_use]
    pub fn contains_yaokyuu(&self) -> bool {
        self.tiles().iter().any(|t| t.is_yaokyuu())
    }

    #[must_use]
    pub fn is_all_yaokyuu(&self) -> bool {
        self.tiles().iter().all(|t| t.is_yaokyuu())
    }
}

pub(crate) fn count_matches(tiles: &[Tile], doras: &[Tile]) -> u8 {
    tiles
        .iter()
        .map(|t| doras.iter().filter(|&d| d == t).count() as u8)
        .sum()
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = tiles_to_string(self.tiles());
        if self.is_open() {
            write!(f, "[{s}]")
        } else {
            f.write_str(&s)
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&tiles_to_string(&self.tiles))
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pair(p) => p.fmt(f),
            Self::Group(g) => g.fmt(f),
        }
    }
}

impl From<Pair> for Block {
    fn from(p: Pair) -> Self {
        Self::Pair(p)
    }
}

impl From<Group> for Block {
    fn from(g: Group) -> Self {
        Self::Group(g)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hand::parse_tiles;

    fn group(s: &str, is_open: bool) -> Result<Group, ValidationError> {
        Group::new(&parse_tiles(s).unwrap(), is_open)
    }

    #[test]
    fn construct_group() {
        let seq = group("798s", false).unwrap();
        assert!(seq.is_sequence());
        assert_eq!(seq.first(), "7s".parse().unwrap());
        assert_eq!(seq, group("789s", false).unwrap());
        assert_ne!(seq, group("789s", true).unwrap());

        assert!(group("555z", true).unwrap().is_kotsu());
        assert!(group("0555p", false).unwrap().is_quad());
        assert_eq!(group("055p", false), group("555p", false));

        assert_eq!(group("12m", false), Err(ValidationError::GroupSize(2)));
        assert_eq!(group("12345m", false), Err(ValidationError::GroupSize(5)));
        assert_eq!(group("12m3p", false), Err(ValidationError::MixedSuits));
        assert_eq!(group("124m", false), Err(ValidationError::NotConsecutive));
        assert_eq!(group("123z", false), Err(ValidationError::HonorSequence));
        assert_eq!(group("1112m", false), Err(ValidationError::QuadMismatch));
    }

    #[test]
    fn predicates() {
        let chanta = group("789m", false).unwrap();
        assert!(chanta.contains_yaokyuu());
        assert!(!chanta.is_all_yaokyuu());
        assert!(!chanta.is_all_simple());
        assert!(group("999p", false).unwrap().is_all_yaokyuu());
        assert!(group("345s", false).unwrap().is_all_simple());
        assert!(chanta.contains("8m".parse().unwrap()));
        assert!(!chanta.contains("8p".parse().unwrap()));
    }

    #[test]
    fn dora() {
        let doras = parse_tiles("5m6m").unwrap();
        assert_eq!(group("0555m", false).unwrap().dora_count(&doras), 5);
        assert_eq!(group("555m", false).unwrap().dora_count(&doras), 3);
        assert_eq!(group("406m", false).unwrap().dora_count(&doras), 3);
        assert_eq!(group("406m", false).unwrap().dora_matches(&doras), 2);
        assert_eq!(group("123p", false).unwrap().dora_count(&doras), 0);

        let pair = Pair::new(&parse_tiles("50m").unwrap()).unwrap();
        assert_eq!(pair.dora_count(&doras), 3);
        assert_eq!(pair.to_string(), "05m");
    }

    #[test]
    fn construct_pair() {
        let pair = Pair::new(&parse_tiles("77z").unwrap()).unwrap();
        assert_eq!(pair.tile(), Tile::CHUN);
        assert!(Block::from(pair).is_concealed());
        assert_eq!(
            Pair::new(&parse_tiles("67z").unwrap()),
            Err(ValidationError::PairMismatch),
        );
        assert_eq!(
            Pair::new(&parse_tiles("777z").unwrap()),
            Err(ValidationError::PairSize(3)),
        );
    }

    #[test]
    fn display() {
        assert_eq!(group("123m", true).unwrap().to_string(), "[123m]");
        assert_eq!(group("1111z", false).unwrap().to_string(), "1111z");
    }
}
