mod logger;
mod report;

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use log::{debug, info};
use mjscore::{
    AgariCalculator, Group, RoundContext, Tile, Wind, WinningTile, parse_group, parse_tile,
    parse_tiles,
};
use report::Report;

/// Score a winning riichi mahjong hand.
///
/// Tiles are written in compact notation: digits followed by a suit letter,
/// `m`/`p`/`s` for the number suits and `z` for honors (1-4 winds, 5-7
/// dragons). `0` is a red five.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Concealed tiles without the winning tile, e.g. "234m 456p 78s 11z"
    #[arg(long)]
    hand: String,
    /// The winning tile
    #[arg(long)]
    win: String,
    /// Won by self-draw instead of ron
    #[arg(long)]
    tsumo: bool,
    /// Called sequence, repeatable
    #[arg(long)]
    chi: Vec<String>,
    /// Called triplet, repeatable
    #[arg(long)]
    pon: Vec<String>,
    /// Open quad, repeatable
    #[arg(long)]
    kan: Vec<String>,
    /// Concealed quad, repeatable
    #[arg(long)]
    ankan: Vec<String>,
    /// Round wind, E/S/W/N
    #[arg(long, default_value_t = Wind::East)]
    round: Wind,
    /// Seat wind, E/S/W/N. East is the dealer
    #[arg(long, default_value_t = Wind::East)]
    seat: Wind,
    /// Dora indicators
    #[arg(long, default_value = "")]
    dora: String,
    /// Ura dora indicators
    #[arg(long, default_value = "")]
    ura: String,
    /// Repeat counter
    #[arg(long, default_value_t = 0)]
    honba: u8,
    /// Print every decomposition instead of only the best one
    #[arg(long)]
    all: bool,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
    /// More logging on stderr, repeatable
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug)]
struct Input {
    concealed: Vec<Tile>,
    called: Vec<Group>,
    winning: WinningTile,
    ctx: RoundContext,
}

fn parse_called(
    specs: &[String],
    is_open: bool,
    what: &str,
    valid: fn(&Group) -> bool,
) -> Result<Vec<Group>> {
    specs
        .iter()
        .map(|s| {
            let group = parse_group(s, is_open).with_context(|| format!("invalid {what} {s:?}"))?;
            ensure!(valid(&group), "{s:?} is not a {what}");
            Ok(group)
        })
        .collect()
}

fn parse_indicators(s: &str, what: &str) -> Result<Vec<Tile>> {
    let tiles = parse_tiles(s).with_context(|| format!("invalid {what} indicators {s:?}"))?;
    ensure!(
        tiles.len() <= 5,
        "at most 5 {what} indicators, got {}",
        tiles.len()
    );
    Ok(tiles)
}

impl Args {
    fn input(&self) -> Result<Input> {
        let concealed = parse_tiles(&self.hand).context("invalid --hand")?;
        let tile = parse_tile(&self.win).context("invalid --win")?;

        let mut called = parse_called(&self.chi, true, "sequence", Group::is_sequence)?;
        called.extend(parse_called(&self.pon, true, "triplet", |g| {
            g.is_kotsu() && !g.is_quad()
        })?);
        called.extend(parse_called(&self.kan, true, "quad", Group::is_quad)?);
        called.extend(parse_called(&self.ankan, false, "quad", Group::is_quad)?);

        let expected = 13 - 3 * called.len().min(4);
        if called.len() > 4 || concealed.len() != expected {
            bail!(
                "{} concealed tiles and {} called groups do not make a hand of 13 before the win",
                concealed.len(),
                called.len(),
            );
        }

        let ctx = RoundContext {
            round_wind: self.round,
            seat_wind: self.seat,
            repeat_counter: self.honba,
            dora_indicators: parse_indicators(&self.dora, "dora")?.into_iter().collect(),
            ura_dora_indicators: parse_indicators(&self.ura, "ura dora")?
                .into_iter()
                .collect(),
        };
        let winning = WinningTile {
            tile,
            is_tsumo: self.tsumo,
        };
        Ok(Input {
            concealed,
            called,
            winning,
            ctx,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose).context("failed to install the logger")?;
    debug!("{args:?}");

    let input = args.input()?;
    let calc = AgariCalculator {
        concealed: &input.concealed,
        called: &input.called,
        winning: input.winning,
        ctx: &input.ctx,
    };
    ensure!(!calc.hands().is_empty(), "not a complete hand");

    let agaris = if args.all {
        calc.candidates()
    } else {
        calc.best().into_iter().collect()
    };
    info!("{} result(s)", agaris.len());

    let report = Report::new(&input.ctx, input.winning, agaris).context("failed to score")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(["mjcalc"].iter().chain(argv)).unwrap()
    }

    #[test]
    fn parse_args() {
        let args = args(&[
            "--hand", "234m 5p", "--win", "5p", "--pon", "777z", "--chi", "678s", "--ankan",
            "1111m", "--seat", "S", "--dora", "4p", "-vv",
        ]);
        assert_eq!(args.seat, Wind::South);
        assert_eq!(args.round, Wind::East);
        assert_eq!(args.verbose, 2);

        let input = args.input().unwrap();
        assert_eq!(input.called.len(), 3);
        assert!(input.called.iter().any(|g| g.is_quad() && g.is_concealed()));
        assert_eq!(input.ctx.doras().as_slice(), &[parse_tile("5p").unwrap()]);
        assert!(!input.winning.is_tsumo);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(args(&["--hand", "234m", "--win", "5p"]).input().is_err());
        assert!(
            args(&["--hand", "234m 55p", "--win", "5p", "--chi", "777z"])
                .input()
                .is_err()
        );
        assert!(
            args(&["--hand", "123456789m 1234p", "--win", "5p", "--dora", "1m2m3m4m5m6m"])
                .input()
                .is_err()
        );
        let bad_seat = ["mjcalc", "--hand", "1m", "--win", "1m", "--seat", "5z"];
        assert!(Args::try_parse_from(bad_seat).is_err());
    }
}
