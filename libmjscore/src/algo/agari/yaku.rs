//! Yaku evaluation of a single decomposition.
//!
//! The worker collects every pattern whose shape condition holds, using loose
//! definitions where a stricter pattern exists (a chinitsu hand also reports
//! honitsu, a junchan hand also reports chanta). The result is then cleaned up
//! by [`YakuSet::new`]: concealed-only patterns are voided on an open hand,
//! any yakuman voids every regular pattern, and [`SUPERSEDES`] removes the
//! lower pattern of each pair.
use super::fu::{Wait, wait_shape};
use crate::algo::decompose::Hand;
use crate::block::{BlockId, Group, Pair};
use crate::context::{RoundContext, WinningTile};
use crate::hand::tiles_to_counts;
use crate::tile::{Suit, Tile};
use std::fmt;

use serde::Serialize;

/// Han of a single yakuman. Double yakuman weigh twice this.
pub const YAKUMAN_HAN: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Yaku {
    // situational, never produced by `evaluate_yaku`
    Riichi,
    DoubleRiichi,
    Ippatsu,
    Chankan,
    RinshanKaihou,
    HaiteiRaoyue,
    HouteiRaoyui,
    Tenhou,
    Chiihou,

    MenzenTsumo,
    Pinfu,
    Tanyao,
    Iipeikou,
    SeatWind,
    RoundWind,
    Haku,
    Hatsu,
    Chun,

    Chanta,
    SanshokuDoujun,
    Ittsuu,
    Toitoi,
    Sanankou,
    SanshokuDoukou,
    Sankantsu,
    Chiitoitsu,
    Honroutou,
    Shousangen,

    Honitsu,
    Junchan,
    Ryanpeikou,
    Chinitsu,

    KokushiMusou,
    KokushiMusou13,
    Suuankou,
    SuuankouTanki,
    Daisangen,
    Tsuuiisou,
    Ryuuiisou,
    Chinroutou,
    Shousuushii,
    Daisuushii,
    ChuurenPoutou,
    JunseiChuurenPoutou,
    Suukantsu,
}

/// `(higher, lower)`: when both are satisfied, only `higher` is kept.
pub const SUPERSEDES: &[(Yaku, Yaku)] = &[
    (Yaku::Chinitsu, Yaku::Honitsu),
    (Yaku::Ryanpeikou, Yaku::Iipeikou),
    (Yaku::Junchan, Yaku::Chanta),
    (Yaku::Honroutou, Yaku::Chanta),
    (Yaku::Suuankou, Yaku::Sanankou),
    (Yaku::SuuankouTanki, Yaku::Suuankou),
    (Yaku::Suukantsu, Yaku::Sankantsu),
    (Yaku::Daisangen, Yaku::Shousangen),
    (Yaku::Daisuushii, Yaku::Shousuushii),
    (Yaku::KokushiMusou13, Yaku::KokushiMusou),
    (Yaku::JunseiChuurenPoutou, Yaku::ChuurenPoutou),
    (Yaku::DoubleRiichi, Yaku::Riichi),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YakuHan {
    pub yaku: Yaku,
    pub han: u8,
}

/// Satisfied yaku of one decomposition, after exclusions. Sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct YakuSet {
    items: Vec<YakuHan>,
}

struct YakuWorker<'a> {
    hand: &'a Hand,
    winning_block: BlockId,
    winning: WinningTile,
    ctx: &'a RoundContext,
    tiles: Vec<Tile>,
    found: Vec<Yaku>,
}

impl Yaku {
    /// Han on a fully concealed hand.
    #[must_use]
    pub const fn closed_han(self) -> u8 {
        match self {
            Self::Riichi
            | Self::Ippatsu
            | Self::Chankan
            | Self::RinshanKaihou
            | Self::HaiteiRaoyue
            | Self::HouteiRaoyui
            | Self::MenzenTsumo
            | Self::Pinfu
            | Self::Tanyao
            | Self::Iipeikou
            | Self::SeatWind
            | Self::RoundWind
            | Self::Haku
            | Self::Hatsu
            | Self::Chun => 1,

            Self::DoubleRiichi
            | Self::Chanta
            | Self::SanshokuDoujun
            | Self::Ittsuu
            | Self::Toitoi
            | Self::Sanankou
            | Self::SanshokuDoukou
            | Self::Sankantsu
            | Self::Chiitoitsu
            | Self::Honroutou
            | Self::Shousangen => 2,

            Self::Honitsu | Self::Junchan | Self::Ryanpeikou => 3,

            Self::Chinitsu => 6,

            Self::Tenhou
            | Self::Chiihou
            | Self::KokushiMusou
            | Self::Suuankou
            | Self::Daisangen
            | Self::Tsuuiisou
            | Self::Ryuuiisou
            | Self::Chinroutou
            | Self::Shousuushii
            | Self::ChuurenPoutou
            | Self::Suukantsu => YAKUMAN_HAN,

            Self::KokushiMusou13
            | Self::SuuankouTanki
            | Self::Daisuushii
            | Self::JunseiChuurenPoutou => YAKUMAN_HAN * 2,
        }
    }

    /// Han on a hand with at least one open group. 0 means concealed-only.
    #[must_use]
    pub const fn open_han(self) -> u8 {
        match self {
            Self::Riichi
            | Self::DoubleRiichi
            | Self::Ippatsu
            | Self::Tenhou
            | Self::Chiihou
            | Self::MenzenTsumo
            | Self::Pinfu
            | Self::Iipeikou
            | Self::Chiitoitsu
            | Self::Ryanpeikou
            | Self::KokushiMusou
            | Self::KokushiMusou13
            | Self::Suuankou
            | Self::SuuankouTanki
            | Self::ChuurenPoutou
            | Self::JunseiChuurenPoutou => 0,

            Self::Chanta | Self::SanshokuDoujun | Self::Ittsuu => 1,
            Self::Honitsu | Self::Junchan => 2,
            Self::Chinitsu => 5,

            v => v.closed_han(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn han(self, is_concealed: bool) -> u8 {
        if is_concealed {
            self.closed_han()
        } else {
            self.open_han()
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_concealed_only(self) -> bool {
        self.open_han() == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_yakuman(self) -> bool {
        self.closed_han() >= YAKUMAN_HAN
    }

    /// Depends on the play history rather than the hand.
    #[must_use]
    pub const fn is_situational(self) -> bool {
        matches!(
            self,
            Self::Riichi
                | Self::DoubleRiichi
                | Self::Ippatsu
                | Self::Chankan
                | Self::RinshanKaihou
                | Self::HaiteiRaoyue
                | Self::HouteiRaoyui
                | Self::Tenhou
                | Self::Chiihou
        )
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Riichi => "riichi",
            Self::DoubleRiichi => "double riichi",
            Self::Ippatsu => "ippatsu",
            Self::Chankan => "chankan",
            Self::RinshanKaihou => "rinshan kaihou",
            Self::HaiteiRaoyue => "haitei raoyue",
            Self::HouteiRaoyui => "houtei raoyui",
            Self::Tenhou => "tenhou",
            Self::Chiihou => "chiihou",
            Self::MenzenTsumo => "menzen tsumo",
            Self::Pinfu => "pinfu",
            Self::Tanyao => "tanyao",
            Self::Iipeikou => "iipeikou",
            Self::SeatWind => "yakuhai: seat wind",
            Self::RoundWind => "yakuhai: round wind",
            Self::Haku => "yakuhai: haku",
            Self::Hatsu => "yakuhai: hatsu",
            Self::Chun => "yakuhai: chun",
            Self::Chanta => "chanta",
            Self::SanshokuDoujun => "sanshoku doujun",
            Self::Ittsuu => "ittsuu",
            Self::Toitoi => "toitoi",
            Self::Sanankou => "sanankou",
            Self::SanshokuDoukou => "sanshoku doukou",
            Self::Sankantsu => "sankantsu",
            Self::Chiitoitsu => "chiitoitsu",
            Self::Honroutou => "honroutou",
            Self::Shousangen => "shousangen",
            Self::Honitsu => "honitsu",
            Self::Junchan => "junchan",
            Self::Ryanpeikou => "ryanpeikou",
            Self::Chinitsu => "chinitsu",
            Self::KokushiMusou => "kokushi musou",
            Self::KokushiMusou13 => "kokushi musou juusan menmachi",
            Self::Suuankou => "suuankou",
            Self::SuuankouTanki => "suuankou tanki",
            Self::Daisangen => "daisangen",
            Self::Tsuuiisou => "tsuuiisou",
            Self::Ryuuiisou => "ryuuiisou",
            Self::Chinroutou => "chinroutou",
            Self::Shousuushii => "shousuushii",
            Self::Daisuushii => "daisuushii",
            Self::ChuurenPoutou => "chuuren poutou",
            Self::JunseiChuurenPoutou => "junsei chuuren poutou",
            Self::Suukantsu => "suukantsu",
        }
    }
}

impl fmt::Display for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl YakuSet {
    /// Applies the concealed-only gate, the yakuman filter and [`SUPERSEDES`]
    /// to the raw patterns.
    #[must_use]
    pub fn new(found: impl IntoIterator<Item = Yaku>, is_concealed: bool) -> Self {
        let mut yaku: Vec<_> = found
            .into_iter()
            .filter(|y| y.han(is_concealed) > 0)
            .collect();
        yaku.sort_unstable();
        yaku.dedup();

        if yaku.iter().any(|y| y.is_yakuman()) {
            yaku.retain(|y| y.is_yakuman());
        }

        let excluded: Vec<_> = SUPERSEDES
            .iter()
            .filter(|(higher, _)| yaku.contains(higher))
            .map(|&(_, lower)| lower)
            .collect();
        yaku.retain(|y| !excluded.contains(y));

        let items = yaku
            .into_iter()
            .map(|yaku| YakuHan {
                yaku,
                han: yaku.han(is_concealed),
            })
            .collect();
        Self { items }
    }

    /// Total han, without dora.
    #[must_use]
    pub fn han(&self) -> u8 {
        self.items.iter().map(|y| y.han).sum()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, yaku: Yaku) -> bool {
        self.items.iter().any(|y| y.yaku == yaku)
    }

    #[must_use]
    pub fn has_yakuman(&self) -> bool {
        self.items.iter().any(|y| y.yaku.is_yakuman())
    }

    pub fn iter(&self) -> impl Iterator<Item = &YakuHan> + '_ {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a YakuSet {
    type Item = &'a YakuHan;
    type IntoIter = std::slice::Iter<'a, YakuHan>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Evaluates `hand` with `winning_block` as the block completed by the
/// winning tile.
#[must_use]
pub fn evaluate_yaku(
    hand: &Hand,
    winning_block: BlockId,
    winning: WinningTile,
    ctx: &RoundContext,
) -> YakuSet {
    let found = YakuWorker::new(hand, winning_block, winning, ctx).search();
    YakuSet::new(found, hand.is_concealed())
}

/// Shared with the fu calculation, where pinfu changes the tsumo fu.
pub(crate) fn is_pinfu(
    hand: &Hand,
    winning_block: BlockId,
    tile: Tile,
    ctx: &RoundContext,
) -> bool {
    let Hand::Standard { pair, groups, .. } = hand else {
        return false;
    };
    if !hand.is_concealed() || !groups.iter().all(Group::is_sequence) {
        return false;
    }
    if is_valuable(pair.tile(), ctx) {
        return false;
    }
    matches!(
        hand.block(winning_block),
        Some(block) if wait_shape(block, tile) == Some(Wait::Ryanmen)
    )
}

/// Dragons and the winds of the seat and the round.
pub(crate) fn is_valuable(tile: Tile, ctx: &RoundContext) -> bool {
    tile.is_dragon() || tile == ctx.seat_wind.as_tile() || tile == ctx.round_wind.as_tile()
}

impl<'a> YakuWorker<'a> {
    fn new(
        hand: &'a Hand,
        winning_block: BlockId,
        winning: WinningTile,
        ctx: &'a RoundContext,
    ) -> Self {
        Self {
            hand,
            winning_block,
            winning,
            ctx,
            tiles: hand.tiles(),
            found: vec![],
        }
    }

    fn search(mut self) -> Vec<Yaku> {
        if self.winning.is_tsumo {
            self.found.push(Yaku::MenzenTsumo);
        }

        let hand = self.hand;
        match hand {
            Hand::ThirteenOrphans { pair, .. } => {
                self.found.push(Yaku::KokushiMusou);
                if pair.contains(self.winning.tile) {
                    self.found.push(Yaku::KokushiMusou13);
                }
            }
            Hand::SevenPairs { .. } => self.found.push(Yaku::Chiitoitsu),
            Hand::Standard { pair, groups, .. } => self.standard(pair, groups),
        }

        self.composition();
        self.found
    }

    /// Patterns that only look at which tiles are in the hand.
    fn composition(&mut self) {
        let tiles = &self.tiles;

        if tiles.iter().all(|t| t.is_simple()) {
            self.found.push(Yaku::Tanyao);
        }

        let has_honor = tiles.iter().any(|t| t.is_honor());
        let number_suits = Suit::NUMBERS
            .iter()
            .filter(|&&s| tiles.iter().any(|t| t.suit() == s))
            .count();
        match number_suits {
            0 => self.found.push(Yaku::Tsuuiisou),
            1 => {
                self.found.push(Yaku::Honitsu);
                if !has_honor {
                    self.found.push(Yaku::Chinitsu);
                }
            }
            _ => {}
        }

        if tiles.iter().all(|t| t.is_yaokyuu()) {
            self.found.push(Yaku::Honroutou);
        }
        if tiles.iter().all(|t| t.is_terminal()) {
            self.found.push(Yaku::Chinroutou);
        }

        let is_green = |t: &Tile| {
            *t == Tile::HATSU || t.suit() == Suit::Sou && matches!(t.rank(), 2 | 3 | 4 | 6 | 8)
        };
        if tiles.iter().all(is_green) {
            self.found.push(Yaku::Ryuuiisou);
        }
    }

    fn standard(&mut self, pair: &Pair, groups: &[Group; 4]) {
        let seat = self.ctx.seat_wind.as_tile();
        let round = self.ctx.round_wind.as_tile();
        let kotsu = || groups.iter().filter(|g| g.is_kotsu());

        for group in kotsu() {
            let tile = group.first();
            if tile == seat {
                self.found.push(Yaku::SeatWind);
            }
            if tile == round {
                self.found.push(Yaku::RoundWind);
            }
            match tile {
                t if t == Tile::HAKU => self.found.push(Yaku::Haku),
                t if t == Tile::HATSU => self.found.push(Yaku::Hatsu),
                t if t == Tile::CHUN => self.found.push(Yaku::Chun),
                _ => {}
            }
        }

        if is_pinfu(self.hand, self.winning_block, self.winning.tile, self.ctx) {
            self.found.push(Yaku::Pinfu);
        }

        let sequences: Vec<_> = groups.iter().filter(|g| g.is_sequence()).collect();
        let has_peikou = sequences
            .iter()
            .enumerate()
            .any(|(i, a)| sequences[i + 1..].contains(a));
        if has_peikou {
            self.found.push(Yaku::Iipeikou);
        }
        let is_ryanpeikou = sequences.len() == 4
            && sequences
                .iter()
                .all(|a| sequences.iter().filter(|b| a == *b).count() >= 2);
        if is_ryanpeikou {
            self.found.push(Yaku::Ryanpeikou);
        }

        if pair.tile().is_yaokyuu() && groups.iter().all(Group::contains_yaokyuu) {
            self.found.push(Yaku::Chanta);
        }
        let has_terminal = |g: &Group| g.tiles().iter().any(|t| t.is_terminal());
        if pair.tile().is_terminal() && groups.iter().all(has_terminal) {
            self.found.push(Yaku::Junchan);
        }

        let has_sequence = |suit: Suit, rank: u8| {
            sequences
                .iter()
                .any(|g| g.suit() == suit && g.first().rank() == rank)
        };
        if (1..=7).any(|r| Suit::NUMBERS.iter().all(|&s| has_sequence(s, r))) {
            self.found.push(Yaku::SanshokuDoujun);
        }
        if Suit::NUMBERS
            .iter()
            .any(|&s| [1, 4, 7].iter().all(|&r| has_sequence(s, r)))
        {
            self.found.push(Yaku::Ittsuu);
        }

        let has_kotsu = |suit: Suit, rank: u8| {
            kotsu().any(|g| g.suit() == suit && g.first().rank() == rank)
        };
        if (1..=9).any(|r| Suit::NUMBERS.iter().all(|&s| has_kotsu(s, r))) {
            self.found.push(Yaku::SanshokuDoukou);
        }

        if kotsu().count() == 4 {
            self.found.push(Yaku::Toitoi);
        }

        // a concealed triplet completed by ron counts as open
        let ron_completed = match self.winning_block {
            BlockId::Group(idx) if !self.winning.is_tsumo => groups
                .get(idx)
                .is_some_and(|g| g.is_kotsu() && g.is_concealed()),
            _ => false,
        };
        let ankou = kotsu().filter(|g| g.is_concealed()).count() - ron_completed as usize;
        if ankou >= 3 {
            self.found.push(Yaku::Sanankou);
        }
        if ankou == 4 {
            self.found.push(Yaku::Suuankou);
            if self.winning_block == BlockId::Pair(0) {
                self.found.push(Yaku::SuuankouTanki);
            }
        }

        match groups.iter().filter(|g| g.is_quad()).count() {
            4 => self.found.push(Yaku::Suukantsu),
            3 => self.found.push(Yaku::Sankantsu),
            _ => {}
        }

        let dragons = kotsu().filter(|g| g.first().is_dragon()).count();
        if dragons == 3 {
            self.found.push(Yaku::Daisangen);
        } else if dragons == 2 && pair.tile().is_dragon() {
            self.found.push(Yaku::Shousangen);
        }

        let winds = kotsu().filter(|g| g.first().is_wind()).count();
        if winds == 4 {
            self.found.push(Yaku::Daisuushii);
        } else if winds == 3 && pair.tile().is_wind() {
            self.found.push(Yaku::Shousuushii);
        }

        self.chuuren();
    }

    fn chuuren(&mut self) {
        if !self.hand.is_concealed() || self.tiles.len() != 14 {
            return;
        }
        let suit = self.winning.tile.suit();
        if !suit.is_number() || self.tiles.iter().any(|t| t.suit() != suit) {
            return;
        }

        let counts = tiles_to_counts(&self.tiles);
        let ranks = &counts[suit.as_usize() * 9..suit.as_usize() * 9 + 9];
        let is_chuuren = ranks[0] >= 3 && ranks[8] >= 3 && ranks.iter().all(|&c| c >= 1);
        if !is_chuuren {
            return;
        }
        self.found.push(Yaku::ChuurenPoutou);

        let mut before = [0; 9];
        before.copy_from_slice(ranks);
        before[self.winning.tile.rank() as usize - 1] -= 1;
        if before == [3, 1, 1, 1, 1, 1, 1, 1, 3] {
            self.found.push(Yaku::JunseiChuurenPoutou);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::decompose::{decompose, decompose_all};
    use crate::hand::{parse_group, parse_tile, parse_tiles};
    use crate::tile::Wind;

    struct Case<'a> {
        concealed: &'a str,
        winning: &'a str,
        tsumo: bool,
        called: &'a [&'a str],
        ankan: &'a [&'a str],
    }

    impl<'a> Case<'a> {
        const fn new(concealed: &'a str, winning: &'a str, tsumo: bool) -> Self {
            Self {
                concealed,
                winning,
                tsumo,
                called: &[],
                ankan: &[],
            }
        }

        /// Every evaluation of every decomposition and winning block.
        fn all(&self, ctx: &RoundContext) -> Vec<YakuSet> {
            let tile = parse_tile(self.winning).unwrap();
            let winning = WinningTile {
                tile,
                is_tsumo: self.tsumo,
            };
            let groups: Vec<_> = self
                .called
                .iter()
                .map(|s| parse_group(s, true).unwrap())
                .chain(self.ankan.iter().map(|s| parse_group(s, false).unwrap()))
                .collect();
            decompose_all(&parse_tiles(self.concealed).unwrap(), tile, &groups)
                .iter()
                .flat_map(|hand| {
                    hand.winning_blocks(tile)
                        .into_iter()
                        .map(|block| evaluate_yaku(hand, block, winning, ctx))
                        .collect::<Vec<_>>()
                })
                .collect()
        }

        fn best(&self, ctx: &RoundContext) -> YakuSet {
            self.all(ctx)
                .into_iter()
                .max_by_key(YakuSet::han)
                .unwrap_or_default()
        }
    }

    fn south_seat() -> RoundContext {
        RoundContext {
            seat_wind: Wind::South,
            ..Default::default()
        }
    }

    #[test]
    fn pinfu() {
        let ctx = south_seat();
        let set = Case::new("234m 456m 789m 23p 22s", "4p", true).best(&ctx);
        assert!(set.contains(Yaku::Pinfu));
        assert!(set.contains(Yaku::MenzenTsumo));

        // closed wait
        let set = Case::new("234m 456m 789m 24p 22s", "3p", true).best(&ctx);
        assert!(!set.contains(Yaku::Pinfu));
        // valuable pair
        let set = Case::new("234m 456m 789m 23p 22z", "4p", false).best(&ctx);
        assert!(!set.contains(Yaku::Pinfu));
        // edge wait
        let set = Case::new("234m 456m 789m 12p 22s", "3p", false).best(&ctx);
        assert!(!set.contains(Yaku::Pinfu));
        // open
        let case = Case {
            called: &["789m"],
            ..Case::new("234m 456m 23p 22s", "4p", false)
        };
        assert!(!case.best(&ctx).contains(Yaku::Pinfu));
    }

    #[test]
    fn pinfu_depends_on_winning_block() {
        // 5p completes either the 345p sequence or the 55p pair
        let ctx = south_seat();
        let sets = Case::new("234m 456m 789m 3455p", "5p", false).all(&ctx);
        assert!(sets.iter().any(|s| s.contains(Yaku::Pinfu)));
        assert!(sets.iter().any(|s| !s.contains(Yaku::Pinfu)));
    }

    #[test]
    fn yakuhai() {
        let ctx = RoundContext {
            round_wind: Wind::East,
            seat_wind: Wind::East,
            ..Default::default()
        };
        let set = Case::new("111z 555z 234m 678p 9s", "9s", false).best(&ctx);
        assert!(set.contains(Yaku::SeatWind));
        assert!(set.contains(Yaku::RoundWind));
        assert!(set.contains(Yaku::Haku));
        assert_eq!(set.han(), 3);

        let set = Case::new("222z 234m 678p 99s 77z", "7z", false).best(&ctx);
        assert!(set.contains(Yaku::Chun));
        assert!(!set.contains(Yaku::SeatWind));
    }

    #[test]
    fn tanyao_and_peikou() {
        let ctx = south_seat();
        let set = Case::new("223344m 567p 678s 5s", "5s", false).best(&ctx);
        assert!(set.contains(Yaku::Tanyao));
        assert!(set.contains(Yaku::Iipeikou));

        let open = Case {
            called: &["567p"],
            ..Case::new("223344m 678s 5s", "5s", false)
        };
        let set = open.best(&ctx);
        assert!(set.contains(Yaku::Tanyao));
        assert!(!set.contains(Yaku::Iipeikou));
    }

    #[test]
    fn ryanpeikou_supersedes_iipeikou() {
        let ctx = south_seat();
        let set = Case::new("223344m 556677p 8s", "8s", false).best(&ctx);
        assert!(set.contains(Yaku::Ryanpeikou));
        assert!(!set.contains(Yaku::Iipeikou));
        assert!(!set.contains(Yaku::Chiitoitsu));
        assert_eq!(set.han(), 4);
    }

    #[test]
    fn chinitsu_supersedes_honitsu() {
        let ctx = south_seat();
        let set = Case::new("123456789m 2355m", "4m", false).best(&ctx);
        assert!(set.contains(Yaku::Chinitsu));
        assert!(!set.contains(Yaku::Honitsu));
        let hon = Case::new("1123456789m 666z", "1m", false).best(&ctx);
        assert!(hon.contains(Yaku::Honitsu));
        assert!(hon.contains(Yaku::Ittsuu));
        assert!(!hon.contains(Yaku::Chinitsu));
    }

    #[test]
    fn chanta_family() {
        let ctx = south_seat();
        let set = Case::new("123m 789p 111s 999s 4z", "4z", false).best(&ctx);
        assert!(set.contains(Yaku::Chanta));
        assert!(!set.contains(Yaku::Junchan));

        let set = Case::new("123m 789p 111s 999s 1m", "1m", false).best(&ctx);
        assert!(set.contains(Yaku::Junchan));
        assert!(!set.contains(Yaku::Chanta));

        let case = Case {
            called: &["999p"],
            ..Case::new("111m 111s 555z 1z", "1z", false)
        };
        let set = case.best(&ctx);
        assert!(set.contains(Yaku::Honroutou));
        assert!(set.contains(Yaku::Sanankou));
        assert!(set.contains(Yaku::Toitoi));
        assert!(!set.contains(Yaku::Chanta));
    }

    #[test]
    fn sanshoku_and_ittsuu() {
        let ctx = south_seat();
        let set = Case::new("345m 345p 345s 789s 2z", "2z", false).best(&ctx);
        assert!(set.contains(Yaku::SanshokuDoujun));
        assert_eq!(
            set.iter().find(|y| y.yaku == Yaku::SanshokuDoujun).unwrap().han,
            2,
        );

        let open = Case {
            called: &["345s"],
            ..Case::new("345m 345p 789s 2z", "2z", false)
        };
        let set = open.best(&ctx);
        assert_eq!(
            set.iter().find(|y| y.yaku == Yaku::SanshokuDoujun).unwrap().han,
            1,
        );

        let set = Case::new("222m 222p 222s 567s 3z", "3z", false).best(&ctx);
        assert!(set.contains(Yaku::SanshokuDoukou));
        assert!(set.contains(Yaku::Sanankou));

        let set = Case::new("123456789p 234s 5z", "5z", false).best(&ctx);
        assert!(set.contains(Yaku::Ittsuu));
    }

    #[test]
    fn sanankou_ron() {
        let ctx = south_seat();
        // the ron tile completes one of the three triplets
        let case = Case::new("111m 222m 33m 44p 678s", "3m", false);
        assert!(case.all(&ctx).iter().all(|s| !s.contains(Yaku::Sanankou)));
        let tsumo = Case::new("111m 222m 33m 44p 678s", "3m", true);
        assert!(tsumo.best(&ctx).contains(Yaku::Sanankou));

        // the ron tile completes the sequence instead
        let case = Case::new("111m 222m 333m 44p 67s", "8s", false);
        assert!(case.best(&ctx).contains(Yaku::Sanankou));
    }

    #[test]
    fn toitoi_with_four_concealed() {
        let ctx = south_seat();
        let ron = Case::new("111m 222m 333m 444m 5p", "5p", false).best(&ctx);
        assert!(ron.has_yakuman());
        assert!(ron.contains(Yaku::SuuankouTanki));
        assert!(!ron.contains(Yaku::Suuankou));
        assert!(!ron.contains(Yaku::Toitoi));

        let shanpon = Case::new("111m 222m 333m 44m 55p", "4m", false).all(&ctx);
        assert!(shanpon.iter().any(|s| {
            s.contains(Yaku::Toitoi) && s.contains(Yaku::Sanankou) && !s.has_yakuman()
        }));
    }

    #[test]
    fn raw_patterns_before_yakuman_filter() {
        let ctx = south_seat();
        let concealed = parse_tiles("111m 222m 333m 444m 5p").unwrap();
        let tile = parse_tile("5p").unwrap();
        let hands = decompose(&concealed, tile, &[]);
        let raw = hands
            .iter()
            .find(|h| h.groups().iter().all(Group::is_kotsu))
            .map(|h| YakuWorker::new(h, BlockId::Pair(0), WinningTile::ron(tile), &ctx).search())
            .unwrap();
        assert!(raw.contains(&Yaku::Toitoi));
        assert!(raw.contains(&Yaku::Sanankou));
        assert!(raw.contains(&Yaku::Suuankou));
    }

    #[test]
    fn seven_pairs() {
        let ctx = south_seat();
        let set = Case::new("2244m 3366p 5588s 7s", "7s", true).best(&ctx);
        assert!(set.contains(Yaku::Chiitoitsu));
        assert!(set.contains(Yaku::Tanyao));
        assert!(set.contains(Yaku::MenzenTsumo));
        assert_eq!(set.han(), 4);

        let set = Case::new("1122334455667z", "7z", false).best(&ctx);
        assert!(set.contains(Yaku::Tsuuiisou));
        assert!(!set.contains(Yaku::Chiitoitsu));
    }

    #[test]
    fn yakuman() {
        let ctx = south_seat();
        let set = Case::new("19m 19p 19s 1234567z", "1m", false).best(&ctx);
        assert!(set.contains(Yaku::KokushiMusou13));
        assert!(!set.contains(Yaku::KokushiMusou));
        assert_eq!(set.han(), YAKUMAN_HAN * 2);
        let set = Case::new("119m 19p 19s 123456z", "7z", false).best(&ctx);
        assert!(set.contains(Yaku::KokushiMusou));
        assert!(!set.contains(Yaku::KokushiMusou13));

        let set = Case::new("555z 666z 77z 234m 11p", "7z", false).best(&ctx);
        assert!(set.contains(Yaku::Daisangen));
        assert_eq!(set.han(), YAKUMAN_HAN);

        let set = Case::new("555z 666z 77z 234m 11p", "1p", false).best(&ctx);
        assert!(set.contains(Yaku::Shousangen));
        assert!(set.contains(Yaku::Haku));
        assert!(set.contains(Yaku::Hatsu));

        let set = Case::new("111z 222z 333z 444z 5m", "5m", false).best(&ctx);
        assert!(set.contains(Yaku::Daisuushii));
        assert!(set.contains(Yaku::SuuankouTanki));
        assert!(!set.contains(Yaku::Shousuushii));
        assert_eq!(set.han(), YAKUMAN_HAN * 4);

        let set = Case::new("22334466888s 66z", "6z", false).best(&ctx);
        assert!(set.contains(Yaku::Ryuuiisou));

        let set = Case::new("111999m 111p 999s 9p", "9p", false).best(&ctx);
        assert!(set.contains(Yaku::Chinroutou));
        assert!(!set.contains(Yaku::Honroutou));
    }

    #[test]
    fn nine_gates() {
        let ctx = south_seat();
        let set = Case::new("1112345678999m", "5m", false).best(&ctx);
        assert!(set.contains(Yaku::JunseiChuurenPoutou));
        assert!(!set.contains(Yaku::ChuurenPoutou));
        assert_eq!(set.han(), YAKUMAN_HAN * 2);

        let set = Case::new("1112345678899m", "9m", false).best(&ctx);
        assert!(set.contains(Yaku::ChuurenPoutou));
        assert!(!set.contains(Yaku::JunseiChuurenPoutou));
    }

    #[test]
    fn quads() {
        let ctx = south_seat();
        let case = Case {
            called: &["2222m"],
            ankan: &["3333p", "4444s"],
            ..Case::new("567m 5s", "5s", false)
        };
        let set = case.best(&ctx);
        assert!(set.contains(Yaku::Sankantsu));
        assert!(set.contains(Yaku::Tanyao));
        assert!(!set.contains(Yaku::Sanankou));
    }

    #[test]
    fn no_yaku() {
        let ctx = south_seat();
        let case = Case {
            called: &["789m"],
            ..Case::new("234m 456p 23s 55s", "4s", false)
        };
        assert!(case.best(&ctx).is_empty());
        assert!(decompose(&[], Tile::EAST, &[]).is_empty());
    }

    #[test]
    fn exclusion_table() {
        let set = YakuSet::new([Yaku::Honitsu, Yaku::Chinitsu, Yaku::Tanyao], true);
        assert!(!set.contains(Yaku::Honitsu));
        assert_eq!(set.han(), 7);
        let set = YakuSet::new([Yaku::Honitsu, Yaku::Chinitsu, Yaku::Tanyao], false);
        assert_eq!(set.han(), 6);
        let set = YakuSet::new([Yaku::Pinfu, Yaku::Tanyao], false);
        assert_eq!(set.han(), 1);
        let set = YakuSet::new([Yaku::Daisangen, Yaku::Shousangen, Yaku::Chun], false);
        assert_eq!(set.han(), YAKUMAN_HAN);
        assert!(SUPERSEDES.iter().all(|(h, l)| h.closed_han() >= l.closed_han()));
        assert!(Yaku::Riichi.is_situational());
    }
}
