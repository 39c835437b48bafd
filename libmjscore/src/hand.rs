//! Compact notation conversions, like `123456789m 1122s 1z`.
//!
//! A suit letter applies to every digit on its left up to the previous suit
//! letter, so the string is scanned from the right. `0` is the red five of
//! its suit. Letters are case-insensitive and whitespace is ignored.
use crate::block::Group;
use crate::error::{Error, ParseError};
use crate::tile::{Suit, Tile};

/// Parse compact notation into tiles, keeping the written order.
pub fn parse_tiles(s: &str) -> Result<Vec<Tile>, ParseError> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let without_trailing = compact.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_trailing.len() != compact.len() {
        return Err(ParseError::MissingSuit(
            compact[without_trailing.len()..].to_owned(),
        ));
    }

    let mut tiles = vec![];
    let mut suit = None;
    for c in compact.chars().rev() {
        if let Some(digit) = c.to_digit(10) {
            // a digit is always preceded (from the right) by a suit here
            let Some(suit) = suit else {
                return Err(ParseError::MissingSuit(c.to_string()));
            };
            let digit = digit as u8;
            let tile =
                Tile::new(suit, digit).map_err(|_| ParseError::InvalidRank { suit, digit })?;
            tiles.push(tile);
        } else if let Some(s) = Suit::from_char(c) {
            suit = Some(s);
        } else {
            return Err(ParseError::InvalidChar(c));
        }
    }
    tiles.reverse();

    Ok(tiles)
}

/// Parse exactly one tile.
pub fn parse_tile(s: &str) -> Result<Tile, ParseError> {
    let tiles = parse_tiles(s)?;
    match tiles.as_slice() {
        &[tile] => Ok(tile),
        _ => Err(ParseError::TileCount {
            expected: 1,
            actual: tiles.len(),
        }),
    }
}

/// Parse a group, e.g. a called `555z` or `345p`.
pub fn parse_group(s: &str, is_open: bool) -> Result<Group, Error> {
    let tiles = parse_tiles(s)?;
    Ok(Group::new(&tiles, is_open)?)
}

/// 34-D count array, red fives folded into their plain rank.
#[must_use]
pub fn tiles_to_counts(tiles: &[Tile]) -> [u8; 34] {
    let mut ret = [0; 34];
    for tile in tiles {
        ret[tile.as_usize()] += 1;
    }
    ret
}

/// Render tiles back to notation, sorted by suit and rank, one chunk per suit.
#[must_use]
pub fn tiles_to_string(tiles: &[Tile]) -> String {
    Suit::ALL
        .iter()
        .filter_map(|&suit| {
            let mut in_suit: Vec<_> = tiles.iter().filter(|t| t.suit() == suit).collect();
            if in_suit.is_empty() {
                return None;
            }
            in_suit.sort_by_key(|t| (t.rank(), !t.is_aka()));
            let mut partial: String = in_suit.iter().map(|t| t.to_string().remove(0)).collect();
            partial.push(suit.as_char());
            Some(partial)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
