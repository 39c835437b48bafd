//! Exhaustive decomposition of a winning hand into blocks.
//!
//! The standard shape is one pair plus four groups. The search picks every
//! possible head, then splits each suit independently: honors can only form
//! triplets or quads, number suits are searched recursively from the lowest
//! tile. Per-suit results are combined by cartesian product with the called
//! groups, and only combinations with exactly four groups survive.
//!
//! Seven pairs and thirteen orphans are separate shapes with their own entry
//! points and are never produced by [`decompose`].
use crate::block::{Block, BlockId, Group, Pair, count_matches};
use crate::hand::{tiles_to_counts, tiles_to_string};
use crate::tile::{Suit, Tile};
use std::fmt;
use std::slice;

use ahash::AHashSet;
use log::{debug, trace};
use rayon::prelude::*;
use tinyvec::{ArrayVec, TinyVec};

type SuitTiles = TinyVec<[Tile; 14]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Hand {
    /// Groups are in canonical order. The last `called` of them are the
    /// groups supplied by the caller, which may never hold the winning tile.
    Standard {
        pair: Pair,
        groups: [Group; 4],
        called: usize,
    },
    /// Seven distinct pairs, sorted.
    SevenPairs { pairs: [Pair; 7] },
    /// The duplicated terminal or honor plus the twelve others, sorted.
    ThirteenOrphans { pair: Pair, tiles: [Tile; 12] },
}

/// Decompose `concealed` plus `winning` together with the `called` groups
/// into every distinct standard hand.
///
/// Returns an empty list, not an error, when no decomposition exists.
#[must_use]
pub fn decompose(concealed: &[Tile], winning: Tile, called: &[Group]) -> Vec<Hand> {
    if called.len() > 4 {
        return vec![];
    }

    let mut by_suit: [SuitTiles; 4] = Default::default();
    for &tile in concealed.iter().chain(Some(&winning)) {
        by_suit[tile.suit().as_usize()].push(tile);
    }
    for tiles in &mut by_suit {
        tiles.sort_by_key(|t| (t.rank(), !t.is_aka()));
    }

    let heads: Vec<_> = by_suit
        .iter()
        .flat_map(|tiles| {
            let counts = tiles_to_counts(tiles);
            let mut heads: ArrayVec<[Tile; 9]> = ArrayVec::new();
            for tile in tiles.iter().map(|t| t.deaka()) {
                if counts[tile.as_usize()] >= 2 && !heads.contains(&tile) {
                    heads.push(tile);
                }
            }
            heads
        })
        .collect();
    debug!(
        "decomposing {} + {winning} with {} called, {} head candidates",
        tiles_to_string(concealed),
        called.len(),
        heads.len(),
    );

    let found: Vec<_> = heads
        .into_par_iter()
        .flat_map_iter(|head| decompose_with_head(&by_suit, head, called))
        .collect();

    let mut seen = AHashSet::new();
    let hands: Vec<_> = found
        .into_iter()
        .filter(|hand| seen.insert(hand.clone()))
        .collect();
    debug!("found {} distinct standard hands", hands.len());

    hands
}

/// Seven pairs, if the tiles form seven distinct pairs and nothing was called.
#[must_use]
pub fn decompose_seven_pairs(concealed: &[Tile], winning: Tile, called: &[Group]) -> Option<Hand> {
    if !called.is_empty() || concealed.len() != 13 {
        return None;
    }
    let tiles = sorted_with(concealed, winning);

    let pairs = tiles
        .chunks_exact(2)
        .map(|c| Pair::new(c).ok())
        .collect::<Option<Vec<_>>>()?;
    if pairs.windows(2).any(|w| w[0] == w[1]) {
        return None;
    }

    let pairs = pairs.try_into().ok()?;
    Some(Hand::SevenPairs { pairs })
}

/// Thirteen orphans, if the tiles hold every terminal and honor with exactly
/// one of them doubled.
#[must_use]
pub fn decompose_thirteen_orphans(
    concealed: &[Tile],
    winning: Tile,
    called: &[Group],
) -> Option<Hand> {
    if !called.is_empty() || concealed.len() != 13 {
        return None;
    }
    let tiles = sorted_with(concealed, winning);
    if !tiles.iter().all(|t| t.is_yaokyuu()) {
        return None;
    }

    let counts = tiles_to_counts(&tiles);
    let kinds = counts.iter().filter(|&&c| c > 0).count();
    if kinds != 13 {
        return None;
    }

    let pos = tiles.windows(2).position(|w| w[0] == w[1])?;
    let pair = Pair::new(&tiles[pos..pos + 2]).ok()?;
    let rest: Vec<_> = tiles[..pos].iter().chain(&tiles[pos + 2..]).copied().collect();
    let tiles = rest.try_into().ok()?;
    Some(Hand::ThirteenOrphans { pair, tiles })
}

/// Every standard hand followed by the special shapes that apply.
#[must_use]
pub fn decompose_all(concealed: &[Tile], winning: Tile, called: &[Group]) -> Vec<Hand> {
    let mut hands = decompose(concealed, winning, called);
    hands.extend(decompose_seven_pairs(concealed, winning, called));
    hands.extend(decompose_thirteen_orphans(concealed, winning, called));
    hands
}

fn sorted_with(concealed: &[Tile], winning: Tile) -> Vec<Tile> {
    let mut tiles = concealed.to_vec();
    tiles.push(winning);
    tiles.sort_by_key(|t| (t.suit(), t.rank(), !t.is_aka()));
    tiles
}

fn decompose_with_head(by_suit: &[SuitTiles; 4], head: Tile, called: &[Group]) -> Vec<Hand> {
    let mut rest = by_suit.clone();
    let Some(taken) = take(&mut rest[head.suit().as_usize()], &[head, head]) else {
        return vec![];
    };
    let Ok(pair) = Pair::new(&taken) else {
        return vec![];
    };

    let Some(honors) = honor_groups(&rest[Suit::Honor.as_usize()]) else {
        trace!("head {head}: honors do not form triplets");
        return vec![];
    };

    let mut combos = vec![honors];
    for suit in Suit::NUMBERS {
        let mut options = vec![];
        search(rest[suit.as_usize()].clone(), vec![], &mut options);
        if options.is_empty() {
            trace!("head {head}: {suit:?} has no decomposition");
            return vec![];
        }
        combos = combos
            .iter()
            .flat_map(|prefix| {
                options.iter().map(move |groups| {
                    let mut combo = prefix.clone();
                    combo.extend_from_slice(groups);
                    combo
                })
            })
            .collect();
    }

    let mut called_sorted = called.to_vec();
    called_sorted.sort_by_key(Group::sort_key);

    combos
        .into_iter()
        .filter(|combo| combo.len() + called.len() == 4)
        .filter_map(|mut combo| {
            combo.sort_by_key(Group::sort_key);
            combo.extend_from_slice(&called_sorted);
            let groups = combo.try_into().ok()?;
            Some(Hand::Standard {
                pair,
                groups,
                called: called.len(),
            })
        })
        .inspect(|hand| trace!("head {head}: {hand}"))
        .collect()
}

/// Removes one tile equal to each of `wanted`, keeping the removed ones.
fn take(tiles: &mut SuitTiles, wanted: &[Tile]) -> Option<ArrayVec<[Tile; 4]>> {
    let mut taken = ArrayVec::new();
    for want in wanted {
        let idx = tiles.iter().position(|t| t == want)?;
        taken.push(tiles.remove(idx));
    }
    Some(taken)
}

fn honor_groups(tiles: &[Tile]) -> Option<Vec<Group>> {
    let mut groups = vec![];
    let mut rest = tiles;
    while let Some(&first) = rest.first() {
        let n = rest.iter().take_while(|&&t| t == first).count();
        if !matches!(n, 3 | 4) {
            return None;
        }
        groups.push(Group::new(&rest[..n], false).ok()?);
        rest = &rest[n..];
    }
    Some(groups)
}

/// Depth-first over the lowest remaining tile of one number suit. Every
/// branch owns its own copy of the remaining tiles and of the groups built so
/// far.
fn search(rest: SuitTiles, built: Vec<Group>, out: &mut Vec<Vec<Group>>) {
    if rest.is_empty() {
        out.push(built);
        return;
    }
    if rest.len() < 3 {
        return;
    }

    let low = rest[0].deaka();
    let same = rest.iter().take_while(|&&t| t == low).count();

    let mut branch = |wanted: &[Tile]| {
        let mut remaining = rest.clone();
        let Some(taken) = take(&mut remaining, wanted) else {
            return;
        };
        let Ok(group) = Group::new(&taken, false) else {
            return;
        };
        let mut next = built.clone();
        next.push(group);
        search(remaining, next, out);
    };

    if let (Some(mid), Some(high)) = (low.offset(1), low.offset(2)) {
        branch(&[low, mid, high]);
    }
    if same >= 3 {
        branch(&[low; 3]);
    }
    if same == 4 {
        branch(&[low; 4]);
    }
}

impl Hand {
    #[inline]
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        matches!(self, Self::Standard { .. })
    }

    /// Empty for the special shapes.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        match self {
            Self::Standard { groups, .. } => groups.as_slice(),
            _ => &[],
        }
    }

    #[must_use]
    pub fn pairs(&self) -> &[Pair] {
        match self {
            Self::Standard { pair, .. } | Self::ThirteenOrphans { pair, .. } => {
                slice::from_ref(pair)
            }
            Self::SevenPairs { pairs } => pairs.as_slice(),
        }
    }

    /// The head of a standard hand or the doubled tile of thirteen orphans.
    #[must_use]
    pub const fn pair(&self) -> Option<&Pair> {
        match self {
            Self::Standard { pair, .. } | Self::ThirteenOrphans { pair, .. } => Some(pair),
            Self::SevenPairs { .. } => None,
        }
    }

    /// True if every group is concealed. Called concealed quads count as
    /// concealed.
    #[must_use]
    pub fn is_concealed(&self) -> bool {
        self.groups().iter().all(Group::is_concealed)
    }

    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles: Vec<_> = self.pairs().iter().flat_map(|p| *p.tiles()).collect();
        tiles.extend(self.groups().iter().flat_map(|g| g.tiles().iter().copied()));
        if let Self::ThirteenOrphans { tiles: rest, .. } = self {
            tiles.extend_from_slice(rest);
        }
        tiles
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<Block> {
        match id {
            BlockId::Pair(idx) => self.pairs().get(idx).copied().map(Block::Pair),
            BlockId::Group(idx) => self.groups().get(idx).copied().map(Block::Group),
            BlockId::Whole => None,
        }
    }

    #[must_use]
    pub fn blocks(&self) -> Vec<(BlockId, Block)> {
        let pairs = self
            .pairs()
            .iter()
            .enumerate()
            .map(|(i, &p)| (BlockId::Pair(i), Block::Pair(p)));
        let groups = self
            .groups()
            .iter()
            .enumerate()
            .map(|(i, &g)| (BlockId::Group(i), Block::Group(g)));
        pairs.chain(groups).collect()
    }

    /// Every block that may have been completed by `tile`. Value-identical
    /// groups are listed once, called groups never.
    #[must_use]
    pub fn winning_blocks(&self, tile: Tile) -> Vec<BlockId> {
        match self {
            Self::ThirteenOrphans { .. } => vec![BlockId::Whole],
            Self::SevenPairs { pairs } => pairs
                .iter()
                .position(|p| p.contains(tile))
                .map(BlockId::Pair)
                .into_iter()
                .collect(),
            Self::Standard {
                pair,
                groups,
                called,
            } => {
                let mut ret = vec![];
                if pair.contains(tile) {
                    ret.push(BlockId::Pair(0));
                }
                let own = &groups[..4 - *called];
                for (i, group) in own.iter().enumerate() {
                    if group.contains(tile) && !own[..i].contains(group) {
                        ret.push(BlockId::Group(i));
                    }
                }
                ret
            }
        }
    }

    #[must_use]
    pub fn aka_count(&self) -> u8 {
        self.tiles().iter().filter(|t| t.is_aka()).count() as u8
    }

    /// Matches against dora tiles (not indicators), red fives excluded.
    #[must_use]
    pub fn dora_matches(&self, doras: &[Tile]) -> u8 {
        let blocks: u8 = self
            .blocks()
            .iter()
            .map(|(_, block)| match block {
                Block::Pair(p) => p.dora_matches(doras),
                Block::Group(g) => g.dora_matches(doras),
            })
            .sum();
        match self {
            Self::ThirteenOrphans { tiles, .. } => blocks + count_matches(tiles, doras),
            _ => blocks,
        }
    }

    /// Red fives plus [`Self::dora_matches`].
    #[must_use]
    pub fn dora_count(&self, doras: &[Tile]) -> u8 {
        self.aka_count() + self.dora_matches(doras)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard { pair, groups, .. } => {
                write!(f, "{pair}")?;
                for group in groups {
                    write!(f, " {group}")?;
                }
                Ok(())
            }
            Self::SevenPairs { pairs } => {
                let parts: Vec<_> = pairs.iter().map(|p| p.to_string()).collect();
                f.write_str(&parts.join(" "))
            }
            Self::ThirteenOrphans { .. } => f.write_str(&tiles_to_string(&self.tiles())),
        }
    }
}
