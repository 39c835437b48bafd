//! Riichi mahjong hand scoring.
//!
//! Given the concealed tiles, the called groups, the winning tile and the
//! round context, [`AgariCalculator`] enumerates every decomposition of the
//! hand, evaluates yaku and fu for each of them, and picks the one worth the
//! most.
//!
//! ```
//! use mjscore::{AgariCalculator, RoundContext, WinningTile, parse_tile, parse_tiles};
//!
//! let concealed = parse_tiles("234m 456m 789m 23p 22s").unwrap();
//! let ctx = RoundContext::default();
//! let agari = AgariCalculator {
//!     concealed: &concealed,
//!     called: &[],
//!     winning: WinningTile::tsumo(parse_tile("4p").unwrap()),
//!     ctx: &ctx,
//! }
//! .best()
//! .unwrap();
//! assert_eq!((agari.fu, agari.han), (20, 2));
//! ```
#![warn(
    clippy::must_use_candidate,
    clippy::redundant_clone,
    clippy::semicolon_if_nothing_returned,
    clippy::unnested_or_patterns
)]

pub mod algo;
pub mod block;
pub mod context;
pub mod error;
pub mod hand;
pub mod tile;

pub use algo::agari::yaku::{Yaku, YakuSet, evaluate_yaku};
pub use algo::agari::{Agari, AgariCalculator, fu::compute_fu};
pub use algo::decompose::{Hand, decompose};
pub use algo::point::{Point, TsumoPayment, score_ron, score_tsumo};
pub use block::{Block, BlockId, Group, Pair};
pub use context::{RoundContext, WinningTile};
pub use error::{Error, ParseError, UnsupportedScoreError, ValidationError};
pub use hand::{parse_group, parse_tile, parse_tiles};
pub use tile::{Suit, Tile, Wind};
