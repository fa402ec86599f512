use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::card::Rank;
use crate::hand::hand_value;
use crate::strategy::{Decision, DeckCount, BASIC_HIT_STAND};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdviceError {
    #[error("Please enter both player hand and dealer upcard")]
    MissingInput,
    #[error("Invalid cards in hand: {}", .0.join(", "))]
    InvalidHand(Vec<String>),
    #[error("Invalid dealer upcard: {0}")]
    InvalidUpCard(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceInput {
    pub player_hand: String,
    pub dealer_upcard: String,
    #[serde(default)]
    pub num_decks: DeckCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    pub hand_value: u32,
    pub is_soft: bool,
    pub decision: Decision,
    pub player_cards: Vec<Rank>,
    pub dealer_card: Rank,
    pub num_decks: DeckCount,
}

fn normalise(token: &str) -> String {
    token.trim().to_uppercase()
}

/// Parses a comma-separated hand such as `"a, 7"`. Tokens are trimmed and
/// uppercased; every unrecognised token is reported, not just the first.
pub fn parse_hand(input: &str) -> Result<Vec<Rank>, AdviceError> {
    if input.trim().is_empty() {
        return Err(AdviceError::MissingInput);
    }

    let mut cards = Vec::new();
    let mut invalid = Vec::new();
    for token in input.split(',').map(normalise) {
        match Rank::from_token(&token) {
            Ok(rank) => cards.push(rank),
            Err(_) => invalid.push(token),
        }
    }

    if invalid.is_empty() {
        Ok(cards)
    } else {
        warn!(?invalid, "rejected hand");
        Err(AdviceError::InvalidHand(invalid))
    }
}

pub fn parse_up_card(input: &str) -> Result<Rank, AdviceError> {
    let token = normalise(input);
    if token.is_empty() {
        return Err(AdviceError::MissingInput);
    }
    Rank::from_token(&token).map_err(|_| {
        warn!(%token, "rejected dealer upcard");
        AdviceError::InvalidUpCard(token)
    })
}

pub fn advise(input: &AdviceInput) -> Result<Advice, AdviceError> {
    if input.player_hand.trim().is_empty() || input.dealer_upcard.trim().is_empty() {
        return Err(AdviceError::MissingInput);
    }

    let player_cards = parse_hand(&input.player_hand)?;
    let dealer_card = parse_up_card(&input.dealer_upcard)?;

    let value = hand_value(&player_cards);
    let decision = BASIC_HIT_STAND.decide(value, dealer_card.value());

    Ok(Advice {
        hand_value: value.total,
        is_soft: value.is_soft,
        decision,
        player_cards,
        dealer_card,
        num_decks: input.num_decks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn input(hand: &str, up: &str) -> AdviceInput {
        AdviceInput {
            player_hand: hand.to_string(),
            dealer_upcard: up.to_string(),
            num_decks: DeckCount::default(),
        }
    }

    #[test]
    fn hand_tokens_are_trimmed_and_uppercased() {
        assert_eq!(
            parse_hand(" a, 7 ,k"),
            Ok(vec![Rank::Ace, Rank::Seven, Rank::King])
        );
    }

    #[test]
    fn all_invalid_hand_tokens_are_reported() {
        let err = parse_hand("A, x, 11, 5").unwrap_err();
        assert_eq!(
            err,
            AdviceError::InvalidHand(vec!["X".to_string(), "11".to_string()])
        );
        assert_eq!(err.to_string(), "Invalid cards in hand: X, 11");
    }

    #[test]
    fn trailing_comma_is_an_invalid_token() {
        assert_eq!(
            parse_hand("A,"),
            Err(AdviceError::InvalidHand(vec![String::new()]))
        );
    }

    #[rstest]
    #[case("", "7")]
    #[case("A,7", "  ")]
    #[case("   ", "")]
    fn test_missing_input(#[case] hand: &str, #[case] up: &str) {
        assert_eq!(advise(&input(hand, up)), Err(AdviceError::MissingInput));
    }

    #[test]
    fn invalid_up_card() {
        assert_eq!(
            advise(&input("A,7", "z")),
            Err(AdviceError::InvalidUpCard("Z".to_string()))
        );
    }

    #[test]
    fn advice_matches_decide() {
        let advice = advise(&input("a,6", "2")).unwrap();
        assert_eq!(
            advice,
            Advice {
                hand_value: 17,
                is_soft: true,
                decision: Decision::Hit,
                player_cards: vec![Rank::Ace, Rank::Six],
                dealer_card: Rank::Two,
                num_decks: DeckCount(6),
            }
        );
    }

    #[test]
    fn input_defaults_to_six_decks() {
        let parsed: AdviceInput =
            serde_json::from_str(r#"{"playerHand":"10,6","dealerUpcard":"7"}"#).unwrap();
        assert_eq!(parsed.num_decks, DeckCount(6));

        let parsed: AdviceInput =
            serde_json::from_str(r#"{"playerHand":"10,6","dealerUpcard":"7","numDecks":2}"#)
                .unwrap();
        assert_eq!(parsed.num_decks, DeckCount(2));
    }

    #[test]
    fn advice_serialises_camel_case() {
        let advice = advise(&input("10,6", "7")).unwrap();
        let json = serde_json::to_value(&advice).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "handValue": 16,
                "isSoft": false,
                "decision": "Hit",
                "playerCards": ["10", "6"],
                "dealerCard": "7",
                "numDecks": 6,
            })
        );
    }
}
