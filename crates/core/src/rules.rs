//! Big Two play rules: combination classification, the beat relation, and
//! legality checks. Everything here is a pure function of its inputs.

use crate::Card;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayType {
    #[default]
    Invalid,
    Single,
    Pair,
    Triple,
    FiveCard,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FiveCardType {
    #[default]
    None,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl FiveCardType {
    /// Combination strength used when two five-card plays meet.
    pub fn strength(self) -> u8 {
        match self {
            FiveCardType::None => 0,
            FiveCardType::Straight => 1,
            FiveCardType::Flush => 2,
            FiveCardType::FullHouse => 3,
            FiveCardType::FourOfAKind => 4,
            FiveCardType::StraightFlush => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Error)]
pub enum PlayError {
    #[error("No cards selected")]
    NoCardsSelected,
    #[error("First play must include 3 of Diamonds")]
    MissingThreeOfDiamonds,
    #[error("Invalid card combination")]
    InvalidCombination,
    #[error("Invalid five-card combination")]
    InvalidFiveCard,
    #[error("Must play same number of cards as last play")]
    CountMismatch,
    #[error("Play does not beat the previous play")]
    DoesNotBeat,
}

/// Outcome of [`validate_play`]. Built fresh per call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayValidation {
    pub play_type: PlayType,
    pub five_card_type: FiveCardType,
    pub error: Option<PlayError>,
}

impl PlayValidation {
    fn rejected(mut self, error: PlayError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Empty when the play is valid.
    pub fn error_message(&self) -> String {
        self.error.map(|err| err.to_string()).unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        play_type_name(self.play_type, self.five_card_type)
    }
}

pub fn validate_play(
    cards: &[Card],
    last_play: &[Card],
    is_first_play: bool,
    must_include_three_of_diamonds: bool,
) -> PlayValidation {
    let mut result = PlayValidation::default();

    if cards.is_empty() {
        return result.rejected(PlayError::NoCardsSelected);
    }
    if must_include_three_of_diamonds && !contains_three_of_diamonds(cards) {
        return result.rejected(PlayError::MissingThreeOfDiamonds);
    }

    result.play_type = determine_play_type(cards);
    if result.play_type == PlayType::Invalid {
        return result.rejected(PlayError::InvalidCombination);
    }
    if result.play_type == PlayType::FiveCard {
        result.five_card_type = determine_five_card_type(cards);
        if result.five_card_type == FiveCardType::None {
            return result.rejected(PlayError::InvalidFiveCard);
        }
    }

    // An empty table accepts any legal combination.
    if is_first_play || last_play.is_empty() {
        return result;
    }
    if cards.len() != last_play.len() {
        return result.rejected(PlayError::CountMismatch);
    }
    if !does_play_beat(cards, last_play) {
        return result.rejected(PlayError::DoesNotBeat);
    }
    result
}

/// Whether `new_play` supersedes `last_play`. Dispatches on the new play's
/// own type; sizes must match.
pub fn does_play_beat(new_play: &[Card], last_play: &[Card]) -> bool {
    if last_play.is_empty() {
        return true;
    }
    if new_play.len() != last_play.len() {
        return false;
    }
    match determine_play_type(new_play) {
        PlayType::Single => single_beats(new_play[0], last_play[0]),
        PlayType::Pair => pair_beats(new_play, last_play),
        PlayType::Triple => triple_beats(new_play, last_play),
        PlayType::FiveCard => five_card_beats(new_play, last_play),
        PlayType::Invalid => false,
    }
}

pub fn determine_play_type(cards: &[Card]) -> PlayType {
    match cards.len() {
        1 => PlayType::Single,
        2 if is_pair(cards) => PlayType::Pair,
        3 if is_triple(cards) => PlayType::Triple,
        5 if determine_five_card_type(cards) != FiveCardType::None => PlayType::FiveCard,
        _ => PlayType::Invalid,
    }
}

/// Checked strongest first; the first match wins.
pub fn determine_five_card_type(cards: &[Card]) -> FiveCardType {
    if cards.len() != 5 {
        return FiveCardType::None;
    }
    if is_straight_flush(cards) {
        FiveCardType::StraightFlush
    } else if is_four_of_a_kind(cards) {
        FiveCardType::FourOfAKind
    } else if is_full_house(cards) {
        FiveCardType::FullHouse
    } else if is_flush(cards) {
        FiveCardType::Flush
    } else if is_straight(cards) {
        FiveCardType::Straight
    } else {
        FiveCardType::None
    }
}

pub fn is_single(cards: &[Card]) -> bool {
    cards.len() == 1
}

pub fn is_pair(cards: &[Card]) -> bool {
    cards.len() == 2 && cards[0].rank() == cards[1].rank()
}

pub fn is_triple(cards: &[Card]) -> bool {
    cards.len() == 3 && cards[0].rank() == cards[1].rank() && cards[1].rank() == cards[2].rank()
}

/// Five strictly consecutive rank values. Two only ever sits at the top.
pub fn is_straight(cards: &[Card]) -> bool {
    if cards.len() != 5 {
        return false;
    }
    let values = sorted_rank_values(cards);
    values.windows(2).all(|w| w[1] == w[0] + 1)
}

pub fn is_flush(cards: &[Card]) -> bool {
    if cards.len() != 5 {
        return false;
    }
    let suit = cards[0].suit();
    cards.iter().all(|card| card.suit() == suit)
}

/// AAABB or AABBB.
pub fn is_full_house(cards: &[Card]) -> bool {
    if cards.len() != 5 {
        return false;
    }
    let v = sorted_rank_values(cards);
    let low_triple = v[0] == v[1] && v[1] == v[2] && v[3] == v[4];
    let high_triple = v[0] == v[1] && v[2] == v[3] && v[3] == v[4];
    low_triple || high_triple
}

/// AAAA+B or A+BBBB.
pub fn is_four_of_a_kind(cards: &[Card]) -> bool {
    if cards.len() != 5 {
        return false;
    }
    let v = sorted_rank_values(cards);
    let low_quad = v[0] == v[1] && v[1] == v[2] && v[2] == v[3];
    let high_quad = v[1] == v[2] && v[2] == v[3] && v[3] == v[4];
    low_quad || high_quad
}

pub fn is_straight_flush(cards: &[Card]) -> bool {
    is_straight(cards) && is_flush(cards)
}

pub fn single_beats(new_card: Card, last_card: Card) -> bool {
    new_card > last_card
}

pub fn pair_beats(new_pair: &[Card], last_pair: &[Card]) -> bool {
    new_pair.len() == 2 && last_pair.len() == 2 && highest_beats(new_pair, last_pair)
}

pub fn triple_beats(new_triple: &[Card], last_triple: &[Card]) -> bool {
    new_triple.len() == 3 && last_triple.len() == 3 && highest_beats(new_triple, last_triple)
}

/// Combination strength first, highest card on ties.
pub fn five_card_beats(new_cards: &[Card], last_cards: &[Card]) -> bool {
    let new_strength = determine_five_card_type(new_cards).strength();
    let last_strength = determine_five_card_type(last_cards).strength();
    if new_strength != last_strength {
        return new_strength > last_strength;
    }
    highest_beats(new_cards, last_cards)
}

pub fn highest_card(cards: &[Card]) -> Option<Card> {
    cards.iter().max().copied()
}

pub fn contains_three_of_diamonds(cards: &[Card]) -> bool {
    cards.contains(&Card::THREE_OF_DIAMONDS)
}

pub fn play_type_name(play_type: PlayType, five_card_type: FiveCardType) -> &'static str {
    match play_type {
        PlayType::Single => "Single",
        PlayType::Pair => "Pair",
        PlayType::Triple => "Triple",
        PlayType::FiveCard => match five_card_type {
            FiveCardType::Straight => "Straight",
            FiveCardType::Flush => "Flush",
            FiveCardType::FullHouse => "Full House",
            FiveCardType::FourOfAKind => "Four of a Kind",
            FiveCardType::StraightFlush => "Straight Flush",
            FiveCardType::None => "Five Card",
        },
        PlayType::Invalid => "Invalid",
    }
}

fn highest_beats(new_cards: &[Card], last_cards: &[Card]) -> bool {
    match (highest_card(new_cards), highest_card(last_cards)) {
        (Some(new_high), Some(last_high)) => new_high > last_high,
        _ => false,
    }
}

fn sorted_rank_values(cards: &[Card]) -> Vec<u8> {
    let mut values: Vec<u8> = cards.iter().map(|card| card.rank().value()).collect();
    values.sort_unstable();
    values
}
