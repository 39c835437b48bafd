use crate::error::UnsupportedScoreError;

use derive_more::{Add, AddAssign};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreTier {
    Normal,
    Mangan,
    Haneman,
    Baiman,
    Sanbaiman,
    /// Number of yakuman stacked.
    Yakuman(u8),
}

/// Points won by one player.
///
/// For a dealer win `tsumo_oya` is 0 and `tsumo_ko` is what each of the three
/// others pays on tsumo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Add, AddAssign, Serialize)]
pub struct Point {
    pub ron: i32,
    pub tsumo_oya: i32,
    pub tsumo_ko: i32,
}

/// Tsumo payments for a non-dealer win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TsumoPayment {
    pub non_dealer: i32,
    pub dealer: i32,
}

/// `(ron_ko, ron_oya, tsumo_ko, tsumo_oya)`, the tsumo parts being what a
/// non-dealer and the dealer pay to a non-dealer winner. The dealer winner on
/// tsumo receives `tsumo_oya` from each player.
type Cell = (i32, i32, i32, i32);

/// Indexed by han - 1. `None` is mangan.
const TABLE: &[(u8, [Option<Cell>; 4])] = &[
    (20, [
        Some((700, 1000, 200, 400)),
        Some((1300, 2000, 400, 700)),
        Some((2600, 3900, 700, 1300)),
        Some((5200, 7700, 1300, 2600)),
    ]),
    (25, [
        Some((800, 1200, 200, 400)),
        Some((1600, 2400, 400, 800)),
        Some((3200, 4800, 800, 1600)),
        Some((6400, 9600, 1600, 3200)),
    ]),
    (30, [
        Some((1000, 1500, 300, 500)),
        Some((2000, 2900, 500, 1000)),
        Some((3900, 5800, 1000, 2000)),
        Some((7700, 11600, 2000, 3900)),
    ]),
    (40, [
        Some((1300, 2000, 400, 700)),
        Some((2600, 3900, 700, 1300)),
        Some((5200, 7700, 1300, 2600)),
        None,
    ]),
    (50, [
        Some((1600, 2400, 400, 800)),
        Some((3200, 4800, 800, 1600)),
        Some((6400, 9600, 1600, 3200)),
        None,
    ]),
    (60, [
        Some((2000, 2900, 500, 1000)),
        Some((3900, 5800, 1000, 2000)),
        Some((7700, 11600, 2000, 3900)),
        None,
    ]),
    (70, [
        Some((2300, 3400, 600, 1200)),
        Some((4500, 6800, 1200, 2300)),
        None,
        None,
    ]),
    (80, [
        Some((2600, 3900, 700, 1300)),
        Some((5200, 7700, 1300, 2600)),
        None,
        None,
    ]),
    (90, [
        Some((2900, 4400, 800, 1500)),
        Some((5800, 8700, 1500, 2900)),
        None,
        None,
    ]),
    (100, [
        Some((3200, 4800, 800, 1600)),
        Some((6400, 9600, 1600, 3200)),
        None,
        None,
    ]),
    (110, [
        Some((3600, 5300, 900, 1800)),
        Some((7100, 10600, 1800, 3600)),
        None,
        None,
    ]),
    (120, [
        Some((3900, 5800, 1000, 2000)),
        Some((7700, 11600, 2000, 3900)),
        None,
        None,
    ]),
    (130, [Some((4200, 6300, 1100, 2100)), None, None, None]),
    (140, [Some((4500, 6800, 1200, 2300)), None, None, None]),
];

impl ScoreTier {
    /// `None` if `han` is 0 or `fu` is not in the table for 1 to 4 han.
    /// Mangan is reached from 70 fu at 3 han and from 40 fu at 4 han.
    #[must_use]
    pub fn new(fu: u8, han: u8) -> Option<Self> {
        let tier = match han {
            0 => return None,
            3 if fu >= 70 => Self::Mangan,
            4 if fu >= 40 => Self::Mangan,
            1..=4 => match lookup(fu, han)? {
                Some(_) => Self::Normal,
                None => Self::Mangan,
            },
            5 => Self::Mangan,
            6..=7 => Self::Haneman,
            8..=10 => Self::Baiman,
            11..=12 => Self::Sanbaiman,
            _ => Self::Yakuman(han / 13),
        };
        Some(tier)
    }

    /// Literal cell of a limit hand. `None` for [`Self::Normal`].
    #[must_use]
    pub const fn fixed(self) -> Option<Cell> {
        let cell = match self {
            Self::Normal => return None,
            Self::Mangan => (8000, 12000, 2000, 4000),
            Self::Haneman => (12000, 18000, 3000, 6000),
            Self::Baiman => (16000, 24000, 4000, 8000),
            Self::Sanbaiman => (24000, 36000, 6000, 12000),
            Self::Yakuman(n) => {
                let n = n as i32;
                (32000 * n, 48000 * n, 8000 * n, 16000 * n)
            }
        };
        Some(cell)
    }
}

/// `None` if `fu` has no row, `Some(None)` if the cell is mangan.
fn lookup(fu: u8, han: u8) -> Option<Option<Cell>> {
    let (_, row) = TABLE.iter().find(|(f, _)| *f == fu)?;
    row.get(han as usize - 1).copied()
}

fn cell(fu: u8, han: u8) -> Result<Cell, UnsupportedScoreError> {
    let tier = ScoreTier::new(fu, han).ok_or(UnsupportedScoreError { fu, han })?;
    match tier.fixed() {
        Some(cell) => Ok(cell),
        None => lookup(fu, han)
            .flatten()
            .ok_or(UnsupportedScoreError { fu, han }),
    }
}

impl Point {
    pub fn calc(is_oya: bool, fu: u8, han: u8) -> Result<Self, UnsupportedScoreError> {
        let (ron_ko, ron_oya, tsumo_ko, tsumo_oya) = cell(fu, han)?;
        let point = if is_oya {
            Self {
                ron: ron_oya,
                tsumo_oya: 0,
                tsumo_ko: tsumo_oya,
            }
        } else {
            Self {
                ron: ron_ko,
                tsumo_oya,
                tsumo_ko,
            }
        };
        Ok(point)
    }

    #[must_use]
    pub fn yakuman(is_oya: bool, n: u8) -> Self {
        let (ron_ko, ron_oya, tsumo_ko, tsumo_oya) = ScoreTier::Yakuman(n)
            .fixed()
            .unwrap_or_default();
        if is_oya {
            Self {
                ron: ron_oya,
                tsumo_oya: 0,
                tsumo_ko: tsumo_oya,
            }
        } else {
            Self {
                ron: ron_ko,
                tsumo_oya,
                tsumo_ko,
            }
        }
    }

    #[inline]
    #[must_use]
    pub const fn tsumo_total(self, is_oya: bool) -> i32 {
        if is_oya {
            self.tsumo_ko * 3
        } else {
            self.tsumo_oya + self.tsumo_ko * 2
        }
    }

    /// 300 per repeat counter on ron, 100 from each payer on tsumo.
    #[must_use]
    pub fn with_honba(self, honba: u8) -> Self {
        let honba = honba as i32;
        let bonus = Self {
            ron: 300 * honba,
            tsumo_oya: if self.tsumo_oya > 0 { 100 * honba } else { 0 },
            tsumo_ko: 100 * honba,
        };
        self + bonus
    }
}

pub fn score_ron(fu: u8, han: u8, is_dealer: bool) -> Result<i32, UnsupportedScoreError> {
    Ok(Point::calc(is_dealer, fu, han)?.ron)
}

pub fn score_tsumo(fu: u8, han: u8) -> Result<TsumoPayment, UnsupportedScoreError> {
    let point = Point::calc(false, fu, han)?;
    Ok(TsumoPayment {
        non_dealer: point.tsumo_ko,
        dealer: point.tsumo_oya,
    })
}
