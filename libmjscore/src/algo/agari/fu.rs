use super::yaku::is_pinfu;
use crate::algo::decompose::Hand;
use crate::block::{Block, BlockId, Group};
use crate::context::{RoundContext, WinningTile};
use crate::tile::Tile;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Wait {
    /// Two-sided, like 34 waiting on 2 or 5.
    Ryanmen,
    /// Closed, like 35 waiting on 4.
    Kanchan,
    /// Edge, 12 waiting on 3 or 89 waiting on 7.
    Penchan,
    /// Pair.
    Tanki,
    /// One of two pairs turned into a triplet.
    Shanpon,
}

/// How `tile` was waited on if it completed `block`. `None` if the block does
/// not contain the tile.
#[must_use]
pub fn wait_shape(block: Block, tile: Tile) -> Option<Wait> {
    if !block.contains(tile) {
        return None;
    }
    let wait = match block {
        Block::Pair(_) => Wait::Tanki,
        Block::Group(g) if g.is_kotsu() => Wait::Shanpon,
        Block::Group(g) => {
            let tiles = g.tiles();
            let (low, high) = (tiles[0].rank(), tiles[2].rank());
            if tile.rank() == low + 1 {
                Wait::Kanchan
            } else if (tile.rank() == low && high == 9) || (tile.rank() == high && low == 1) {
                Wait::Penchan
            } else {
                Wait::Ryanmen
            }
        }
    };
    Some(wait)
}

/// Fu of a triplet or quad, 0 for a sequence. `is_concealed` must already
/// account for a triplet completed by ron, which counts as open.
#[must_use]
pub fn group_fu(group: &Group, is_concealed: bool) -> u8 {
    if group.is_sequence() {
        return 0;
    }
    let mut fu = 2;
    if group.first().is_yaokyuu() {
        fu *= 2;
    }
    if group.is_quad() {
        fu *= 4;
    }
    if is_concealed {
        fu *= 2;
    }
    fu
}

/// Fu of `hand` when `winning_block` is the block completed by the winning
/// tile, rounded up to 10.
///
/// Seven pairs is always 25. Thirteen orphans is 0 since its fu never matters.
#[must_use]
pub fn compute_fu(
    hand: &Hand,
    winning_block: BlockId,
    winning: WinningTile,
    ctx: &RoundContext,
) -> u8 {
    let (pair, groups) = match hand {
        Hand::ThirteenOrphans { .. } => return 0,
        Hand::SevenPairs { .. } => return 25,
        Hand::Standard { pair, groups, .. } => (pair, groups),
    };

    let is_concealed = hand.is_concealed();
    let has_pinfu = is_pinfu(hand, winning_block, winning.tile, ctx);
    if has_pinfu && winning.is_tsumo {
        return 20;
    }

    let mut fu = 20;
    if winning.is_tsumo {
        fu += 2;
    } else if is_concealed {
        fu += 10;
    }

    let pair_tile = pair.tile();
    if pair_tile.is_dragon() {
        fu += 2;
    }
    if pair_tile == ctx.seat_wind.as_tile() {
        fu += 2;
    }
    if pair_tile == ctx.round_wind.as_tile() {
        fu += 2;
    }

    fu += groups
        .iter()
        .enumerate()
        .map(|(idx, g)| {
            let ron_completed = !winning.is_tsumo && winning_block == BlockId::Group(idx);
            group_fu(g, g.is_concealed() && !ron_completed)
        })
        .sum::<u8>();

    let wait = hand
        .block(winning_block)
        .and_then(|block| wait_shape(block, winning.tile));
    if matches!(
        wait,
        Some(Wait::Kanchan | Wait::Penchan | Wait::Tanki)
    ) {
        fu += 2;
    }

    let fu = fu.div_ceil(10) * 10;
    if !is_concealed && fu == 20 { 30 } else { fu }
}
