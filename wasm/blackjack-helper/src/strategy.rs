use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::card::{CardError, Rank};
use crate::hand::{evaluate, HandValue};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum Decision {
    Hit,
    Stand,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Hit => "Hit",
            Decision::Stand => "Stand",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of decks in the shoe. Accepted for interface stability; the chart
/// below does not vary with it yet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckCount(pub u8);

impl DeckCount {
    pub const OPTIONS: [u8; 5] = [1, 2, 4, 6, 8];
}

impl Default for DeckCount {
    fn default() -> Self {
        DeckCount(6)
    }
}

impl From<Option<u8>> for DeckCount {
    fn from(value: Option<u8>) -> Self {
        value.map(DeckCount).unwrap_or_default()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rule {
    Hit,
    Stand,
    /// Stand only against one of the listed upcard values.
    StandAgainst(&'static [u8]),
    /// Hit when the upcard value is at least this high, otherwise stand.
    HitAgainstAtLeast(u8),
}

impl Rule {
    fn apply(&self, up_card: u8) -> Decision {
        match self {
            Rule::Hit => Decision::Hit,
            Rule::Stand => Decision::Stand,
            Rule::StandAgainst(values) if values.contains(&up_card) => Decision::Stand,
            Rule::StandAgainst(_) => Decision::Hit,
            Rule::HitAgainstAtLeast(min) if up_card >= *min => Decision::Hit,
            Rule::HitAgainstAtLeast(_) => Decision::Stand,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    pub totals: RangeInclusive<u32>,
    pub rule: Rule,
}

const fn band(lo: u32, hi: u32, rule: Rule) -> Band {
    Band {
        totals: lo..=hi,
        rule,
    }
}

/// A hit/stand chart split into hard and soft totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    pub hard: &'static [Band],
    pub soft: &'static [Band],
}

const HARD_BANDS: [Band; 4] = [
    band(17, u32::MAX, Rule::Stand),
    band(0, 11, Rule::Hit),
    band(12, 12, Rule::StandAgainst(&[4, 5, 6])),
    band(13, 16, Rule::HitAgainstAtLeast(7)),
];

const SOFT_BANDS: [Band; 3] = [
    band(19, u32::MAX, Rule::Stand),
    band(0, 17, Rule::Hit),
    band(18, 18, Rule::StandAgainst(&[2, 7, 8])),
];

pub const BASIC_HIT_STAND: RuleTable = RuleTable {
    hard: &HARD_BANDS,
    soft: &SOFT_BANDS,
};

impl RuleTable {
    /// Finds the first band covering the hand's total. `None` means the chart
    /// has a gap at this total.
    pub fn lookup(&self, value: HandValue, up_card: u8) -> Option<Decision> {
        let bands = if value.is_soft { self.soft } else { self.hard };
        bands
            .iter()
            .find(|band| band.totals.contains(&value.total))
            .map(|band| band.rule.apply(up_card))
    }

    pub fn decide(&self, value: HandValue, up_card: u8) -> Decision {
        match self.lookup(value, up_card) {
            Some(decision) => decision,
            None => {
                // Chart gap: hitting is the safe default.
                warn!(
                    total = value.total,
                    is_soft = value.is_soft,
                    up_card,
                    "no rule covers hand, defaulting to Hit"
                );
                Decision::Hit
            }
        }
    }
}

/// Recommends Hit or Stand for `player_hand` against the dealer's `up_card`.
///
/// `num_decks` defaults to six and does not change the recommendation. The
/// dealer's Ace always counts as 11. An unrecognised token in either argument
/// is returned as [`CardError::InvalidCard`].
pub fn decide<S: AsRef<str>>(
    player_hand: &[S],
    up_card: &str,
    num_decks: Option<u8>,
) -> Result<Decision, CardError> {
    let deck_count = DeckCount::from(num_decks);
    let value = evaluate(player_hand)?;
    let up_card = Rank::from_token(up_card)?.value();

    let decision = BASIC_HIT_STAND.decide(value, up_card);
    debug!(
        total = value.total,
        is_soft = value.is_soft,
        up_card,
        num_decks = deck_count.0,
        %decision,
        "decided"
    );
    Ok(decision)
}
