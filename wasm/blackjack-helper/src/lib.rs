use wasm_bindgen::prelude::*;

pub mod advice;
pub mod card;
pub mod hand;
pub mod strategy;

pub use advice::{advise, Advice, AdviceError, AdviceInput};
pub use card::{CardError, Rank};
pub use hand::{evaluate, hand_value, HandValue};
pub use strategy::{decide, Decision, DeckCount, RuleTable, BASIC_HIT_STAND};

#[wasm_bindgen(js_name = evaluateHand)]
pub fn evaluate_hand(cards: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let cards: Vec<String> = serde_wasm_bindgen::from_value(cards.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let value = hand::evaluate(&cards)
        .map_err(|err| JsValue::from_str(&format!("Evaluation failed: {err}")))?;

    serde_wasm_bindgen::to_value(&value)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

#[wasm_bindgen(js_name = getDecision)]
pub fn get_decision(
    player_hand: &JsValue,
    up_card: &str,
    num_decks: Option<u8>,
) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();
    let cards: Vec<String> = serde_wasm_bindgen::from_value(player_hand.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let decision = strategy::decide(&cards, up_card, num_decks)
        .map_err(|err| JsValue::from_str(&format!("Decision failed: {err}")))?;

    Ok(decision.as_str().to_string())
}

#[wasm_bindgen(js_name = advise)]
pub fn advise_js(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: AdviceInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let result = advice::advise(&input)
        .map_err(|err| JsValue::from_str(&format!("Advice failed: {err}")))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

#[wasm_bindgen(js_name = deckCountOptions)]
pub fn deck_count_options() -> Vec<u8> {
    DeckCount::OPTIONS.to_vec()
}
