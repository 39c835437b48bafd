//! Scoring of a complete hand: decompose, evaluate every decomposition with
//! every possible winning block, and keep the highest.
pub mod fu;
pub mod yaku;

use super::decompose::{Hand, decompose_all};
use super::point::Point;
use crate::block::{BlockId, Group};
use crate::context::{RoundContext, WinningTile};
use crate::error::UnsupportedScoreError;
use crate::hand::tiles_to_string;
use crate::tile::Tile;
use fu::compute_fu;
use yaku::{YAKUMAN_HAN, YakuSet, evaluate_yaku};

use log::{debug, trace};
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

/// One scoring of one decomposition.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agari {
    #[serde_as(as = "DisplayFromStr")]
    pub hand: Hand,
    pub winning_block: BlockId,
    pub yaku: YakuSet,
    pub fu: u8,
    /// Yaku han plus dora. Dora are not counted for yakuman.
    pub han: u8,
    /// Dora and red fives.
    pub dora: u8,
    pub ura_dora: u8,
}

#[derive(Debug)]
pub struct AgariCalculator<'a> {
    /// Hidden tiles, without the winning tile.
    pub concealed: &'a [Tile],
    /// Groups declared before the win, concealed quads included.
    pub called: &'a [Group],
    pub winning: WinningTile,
    pub ctx: &'a RoundContext,
}

impl Agari {
    #[inline]
    #[must_use]
    pub fn has_yakuman(&self) -> bool {
        self.yaku.has_yakuman()
    }

    pub fn point(&self, is_oya: bool) -> Result<Point, UnsupportedScoreError> {
        if self.has_yakuman() {
            return Ok(Point::yakuman(is_oya, self.han / YAKUMAN_HAN));
        }
        Point::calc(is_oya, self.fu, self.han)
    }

    /// Ron payout first, then (han, fu). Unscorable hands rank as 0 points.
    #[must_use]
    pub fn rank_key(&self, is_oya: bool) -> (i32, u8, u8) {
        let ron = self.point(is_oya).map_or(0, |p| p.ron);
        (ron, self.han, self.fu)
    }
}

impl AgariCalculator<'_> {
    #[must_use]
    pub fn hands(&self) -> Vec<Hand> {
        decompose_all(self.concealed, self.winning.tile, self.called)
    }

    /// Every (decomposition, winning block) pair that has at least one yaku.
    #[must_use]
    pub fn candidates(&self) -> Vec<Agari> {
        let doras = self.ctx.doras();
        let ura_doras = self.ctx.ura_doras();

        let mut ret = vec![];
        for hand in self.hands() {
            for winning_block in hand.winning_blocks(self.winning.tile) {
                let yaku = evaluate_yaku(&hand, winning_block, self.winning, self.ctx);
                if yaku.is_empty() {
                    trace!("{hand} ({winning_block:?}): no yaku");
                    continue;
                }

                let fu = compute_fu(&hand, winning_block, self.winning, self.ctx);
                let (dora, ura_dora) = if yaku.has_yakuman() {
                    (0, 0)
                } else {
                    (hand.dora_count(&doras), hand.dora_matches(&ura_doras))
                };
                let han = yaku.han() + dora + ura_dora;
                trace!("{hand} ({winning_block:?}): {fu} fu {han} han {yaku:?}");

                ret.push(Agari {
                    hand: hand.clone(),
                    winning_block,
                    yaku,
                    fu,
                    han,
                    dora,
                    ura_dora,
                });
            }
        }
        ret
    }

    /// The best paying candidate, see [`Agari::rank_key`]. `None` if there is
    /// no decomposition with yaku.
    #[must_use]
    pub fn best(&self) -> Option<Agari> {
        let is_oya = self.ctx.is_dealer();
        let candidates = self.candidates();
        debug!(
            "{} + {}: {} candidates",
            tiles_to_string(self.concealed),
            self.winning.tile,
            candidates.len(),
        );
        candidates.into_iter().max_by_key(|a| a.rank_key(is_oya))
    }
}
