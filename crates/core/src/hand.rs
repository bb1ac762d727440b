use crate::Card;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortOrder {
    /// Rank first, then suit.
    #[default]
    ByRank,
    /// Suit first, then rank.
    BySuit,
}

impl SortOrder {
    fn compare(self, a: &Card, b: &Card) -> Ordering {
        match self {
            SortOrder::ByRank => a.cmp(b),
            SortOrder::BySuit => a
                .suit()
                .cmp(&b.suit())
                .then_with(|| a.rank().cmp(&b.rank())),
        }
    }
}

/// Cards held by one player. Never holds the same card twice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut hand = Self::new();
        hand.add_cards(cards);
        hand
    }

    /// Returns false when the card was already held.
    pub fn add_card(&mut self, card: Card) -> bool {
        if self.cards.contains(&card) {
            return false;
        }
        self.cards.push(card);
        true
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.add_card(card);
        }
    }

    pub fn remove_card(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|held| *held == card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    /// All or nothing: the hand is untouched unless every card is held.
    pub fn remove_cards(&mut self, cards: &[Card]) -> bool {
        if !self.has_cards(cards) {
            return false;
        }
        for card in cards {
            self.remove_card(*card);
        }
        true
    }

    pub fn has_card(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_cards(&self, cards: &[Card]) -> bool {
        cards.iter().all(|card| self.has_card(*card))
    }

    pub fn has_three_of_diamonds(&self) -> bool {
        self.has_card(Card::THREE_OF_DIAMONDS)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn lowest(&self) -> Option<Card> {
        self.cards.iter().min().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn sort(&mut self, order: SortOrder) {
        self.cards.sort_by(|a, b| order.compare(a, b));
    }

    /// Looks up held cards by their text form. Tokens that do not parse or
    /// name a card outside the hand are skipped.
    pub fn find_cards<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<Card> {
        tokens
            .iter()
            .filter_map(|token| token.as_ref().parse::<Card>().ok())
            .filter(|card| self.has_card(*card))
            .collect()
    }

    pub fn display_string(&self) -> String {
        if self.is_empty() {
            return "Empty hand".to_string();
        }
        self.cards
            .iter()
            .map(Card::display_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Empty hand");
        }
        for (idx, card) in self.cards.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
