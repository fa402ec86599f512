use serde::Serialize;

use crate::card::{parse_cards, CardError, Rank};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandValue {
    pub total: u32,
    pub is_soft: bool,
}

/// Totals a hand, counting each Ace as 11 and demoting Aces to 1 only while the
/// hand would otherwise bust.
///
/// A non-busted hand that held any Ace is reported soft, even when every Ace
/// had to be demoted (`A,A,K,9` is a soft 21).
pub fn hand_value(hand: &[Rank]) -> HandValue {
    let mut total: u32 = 0;
    let mut aces = 0;

    for card in hand {
        total += u32::from(card.value());
        if card.is_ace() {
            aces += 1;
        }
    }

    let initial_aces = aces;
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    HandValue {
        total,
        is_soft: initial_aces > 0 && total <= 21,
    }
}

pub fn evaluate<S: AsRef<str>>(hand: &[S]) -> Result<HandValue, CardError> {
    let cards = parse_cards(hand)?;
    Ok(hand_value(&cards))
}
