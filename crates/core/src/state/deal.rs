use super::*;
use crate::{Event, EventBus, SortOrder, DECK_SIZE};

impl GameState {
    /// Shuffles a fresh deck, deals, and hands the lead to whoever holds the
    /// Three of Diamonds. A finished table may start another game.
    pub fn start_new_game(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        if self.phase == GamePhase::InProgress {
            return Err(GameError::InvalidPhase(self.phase));
        }
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }

        self.deck.reset();
        let mut shuffle_rng = self.rng.fork();
        self.deck.shuffle(&mut shuffle_rng);

        for player in &mut self.players {
            player.hand.clear();
            player.reset_pass();
        }
        self.deal_cards(events)?;

        self.opener_dealt = self
            .players
            .iter()
            .any(|player| player.hand.has_three_of_diamonds());
        self.current_player_index = self.find_starting_player();
        self.last_play.clear();
        self.last_playing_player_index = self.current_player_index;
        self.reset_passes();
        self.first_play_of_game = true;
        self.phase = GamePhase::InProgress;

        log::info!(
            "new game: {} players, {} leads (shuffle seed {})",
            self.players.len(),
            self.players[self.current_player_index].name,
            shuffle_rng.seed()
        );
        events.push(Event::GameStarted {
            starter: self.current_player_index,
            players: self.players.len(),
        });
        Ok(())
    }

    /// Round-robin from seat 0, `52 / players` cards each. Remainder cards
    /// stay in the deck. Hands are sorted by rank afterwards.
    pub fn deal_cards(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        let count = self.players.len();
        if count == 0 {
            return Ok(());
        }
        let per_player = DECK_SIZE / count;
        for idx in 0..per_player * count {
            let card = self.deck.deal()?;
            self.players[idx % count].hand.add_card(card);
        }
        for (idx, player) in self.players.iter_mut().enumerate() {
            player.hand.sort(SortOrder::ByRank);
            events.push(Event::CardsDealt {
                player: idx,
                count: player.hand.len(),
            });
        }
        if !self.deck.is_empty() {
            log::debug!("{} cards left undealt", self.deck.len());
        }
        Ok(())
    }

    /// Seat holding the Three of Diamonds, or seat 0 when nobody does.
    pub fn find_starting_player(&self) -> usize {
        self.players
            .iter()
            .position(|player| player.hand.has_three_of_diamonds())
            .unwrap_or(0)
    }
}
