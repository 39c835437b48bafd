//! Rendering of scored hands as styled text or JSON.
use mjscore::algo::point::ScoreTier;
use mjscore::{Agari, Point, RoundContext, Tile, UnsupportedScoreError, Wind, WinningTile};
use std::fmt;

use console::style;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

#[serde_as]
#[derive(Debug, Serialize)]
pub struct Report {
    #[serde_as(as = "DisplayFromStr")]
    pub round: Wind,
    #[serde_as(as = "DisplayFromStr")]
    pub seat: Wind,
    pub honba: u8,
    pub winning: Tile,
    pub is_tsumo: bool,
    pub results: Vec<Scored>,
}

#[derive(Debug, Serialize)]
pub struct Scored {
    #[serde(flatten)]
    pub agari: Agari,
    pub tier: Option<ScoreTier>,
    pub point: Point,
    /// Everything the winner collects, honba included.
    pub total: i32,
}

const fn tier_name(tier: ScoreTier) -> Option<&'static str> {
    let name = match tier {
        ScoreTier::Normal => return None,
        ScoreTier::Mangan => "mangan",
        ScoreTier::Haneman => "haneman",
        ScoreTier::Baiman => "baiman",
        ScoreTier::Sanbaiman => "sanbaiman",
        ScoreTier::Yakuman(1) => "yakuman",
        ScoreTier::Yakuman(_) => "multiple yakuman",
    };
    Some(name)
}

impl Report {
    pub fn new(
        ctx: &RoundContext,
        winning: WinningTile,
        agaris: Vec<Agari>,
    ) -> Result<Self, UnsupportedScoreError> {
        let is_dealer = ctx.is_dealer();
        let results: Vec<Scored> = agaris
            .into_iter()
            .map(|agari| {
                let point = agari.point(is_dealer)?.with_honba(ctx.repeat_counter);
                let total = if winning.is_tsumo {
                    point.tsumo_total(is_dealer)
                } else {
                    point.ron
                };
                Ok(Scored {
                    tier: ScoreTier::new(agari.fu, agari.han),
                    agari,
                    point,
                    total,
                })
            })
            .collect::<Result<_, UnsupportedScoreError>>()?;

        Ok(Self {
            round: ctx.round_wind,
            seat: ctx.seat_wind,
            honba: ctx.repeat_counter,
            winning: winning.tile,
            is_tsumo: winning.is_tsumo,
            results,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let how = if self.is_tsumo { "tsumo" } else { "ron" };
        writeln!(
            f,
            "{} {how}, round {} seat {}, {} honba",
            style(self.winning).bold(),
            self.round,
            self.seat,
            self.honba,
        )?;
        if self.results.is_empty() {
            return writeln!(f, "{}", style("no yaku").red());
        }
        for scored in &self.results {
            write!(f, "\n{scored}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Scored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let agari = &self.agari;
        writeln!(f, "{} ({:?})", style(&agari.hand).cyan(), agari.winning_block)?;
        for item in &agari.yaku {
            writeln!(f, "  {:<30}{:>3}", item.yaku.name(), item.han)?;
        }
        if agari.dora > 0 {
            writeln!(f, "  {:<30}{:>3}", "dora", agari.dora)?;
        }
        if agari.ura_dora > 0 {
            writeln!(f, "  {:<30}{:>3}", "ura dora", agari.ura_dora)?;
        }

        let tier = self.tier.and_then(tier_name).unwrap_or_default();
        writeln!(
            f,
            "  {} fu {} han {} = {}",
            agari.fu,
            agari.han,
            tier,
            style(self.total).green().bold(),
        )
    }
}
