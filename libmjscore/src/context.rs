use crate::tile::{Tile, Wind};

use serde::Serialize;
use tinyvec::ArrayVec;

/// Everything about the round the evaluator needs but cannot derive from the
/// hand itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoundContext {
    pub round_wind: Wind,
    pub seat_wind: Wind,
    /// Honba.
    pub repeat_counter: u8,
    pub dora_indicators: ArrayVec<[Tile; 5]>,
    pub ura_dora_indicators: ArrayVec<[Tile; 5]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinningTile {
    pub tile: Tile,
    pub is_tsumo: bool,
}

impl RoundContext {
    #[inline]
    #[must_use]
    pub fn is_dealer(&self) -> bool {
        self.seat_wind == Wind::East
    }

    #[must_use]
    pub fn doras(&self) -> ArrayVec<[Tile; 5]> {
        self.dora_indicators.iter().map(|t| t.next_dora()).collect()
    }

    #[must_use]
    pub fn ura_doras(&self) -> ArrayVec<[Tile; 5]> {
        self.ura_dora_indicators
            .iter()
            .map(|t| t.next_dora())
            .collect()
    }
}

impl WinningTile {
    #[inline]
    #[must_use]
    pub const fn ron(tile: Tile) -> Self {
        Self {
            tile,
            is_tsumo: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn tsumo(tile: Tile) -> Self {
        Self {
            tile,
            is_tsumo: true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hand::parse_tiles;

    #[test]
    fn dora_conversion() {
        let ctx = RoundContext {
            seat_wind: Wind::South,
            dora_indicators: parse_tiles("9m4z7z").unwrap().into_iter().collect(),
            ura_dora_indicators: parse_tiles("0p").unwrap().into_iter().collect(),
            ..Default::default()
        };
        assert!(!ctx.is_dealer());
        assert_eq!(
            ctx.doras().as_slice(),
            parse_tiles("1m1z5z").unwrap().as_slice(),
        );
        assert_eq!(ctx.ura_doras().as_slice(), parse_tiles("6p").unwrap().as_slice());
        assert!(RoundContext::default().is_dealer());
    }
}
