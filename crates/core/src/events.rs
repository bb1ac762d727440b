use crate::{Card, FiveCardType, PlayError, PlayType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    GameStarted {
        starter: usize,
        players: usize,
    },
    CardsDealt {
        player: usize,
        count: usize,
    },
    CardsPlayed {
        player: usize,
        cards: Vec<Card>,
        play_type: PlayType,
        five_card_type: FiveCardType,
    },
    PlayRejected {
        player: usize,
        reason: PlayError,
    },
    Passed {
        player: usize,
    },
    TrickWon {
        player: usize,
    },
    GameWon {
        player: usize,
        points: u32,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
