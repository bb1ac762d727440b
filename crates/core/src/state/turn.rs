use super::*;
use crate::{parse_cards, validate_play, Event, EventBus, PlayValidation};

impl GameState {
    /// Judges `cards` against the table without touching it.
    pub fn validate(&self, cards: &[Card]) -> PlayValidation {
        validate_play(
            cards,
            &self.last_play,
            self.last_play.is_empty(),
            self.opener_required(),
        )
    }

    /// The only path that puts cards on the table. The current player must
    /// hold every card. A rejected play leaves the state untouched; an
    /// accepted one removes the cards, records the play, and starts a new
    /// contest for the trick. The turn does not advance.
    pub fn commit_play(
        &mut self,
        cards: &[Card],
        events: &mut EventBus,
    ) -> Result<PlayValidation, GameError> {
        self.ensure_in_progress()?;
        let idx = self.current_player_index;
        let player = self.players.get(idx).ok_or(GameError::NoPlayers)?;
        for (pos, card) in cards.iter().enumerate() {
            if cards[..pos].contains(card) {
                return Err(GameError::DuplicateCard(*card));
            }
            if !player.hand.has_card(*card) {
                return Err(GameError::CardNotInHand {
                    card: *card,
                    player: player.name.clone(),
                });
            }
        }

        let validation = self.validate(cards);
        if let Some(reason) = validation.error {
            log::debug!("{} tried {}: {}", player.name, format_cards(cards), reason);
            events.push(Event::PlayRejected {
                player: idx,
                reason,
            });
            return Ok(validation);
        }

        let removed = self.players[idx].hand.remove_cards(cards);
        debug_assert!(removed, "cards were checked against the hand");
        self.set_last_play(cards, idx);
        self.reset_all_passes();
        self.set_first_play_made();

        log::debug!(
            "{} played {} {}",
            self.players[idx].name,
            validation.name(),
            format_cards(cards)
        );
        events.push(Event::CardsPlayed {
            player: idx,
            cards: cards.to_vec(),
            play_type: validation.play_type,
            five_card_type: validation.five_card_type,
        });
        Ok(validation)
    }

    /// Marks the current player as passed. The turn does not advance.
    pub fn commit_pass(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        let idx = self.current_player_index;
        let player = self.players.get_mut(idx).ok_or(GameError::NoPlayers)?;
        player.has_passed = true;
        log::debug!("{} passes", player.name);
        self.increment_passes();
        events.push(Event::Passed { player: idx });
        Ok(())
    }

    /// A human seat plays. On success the win check and turn advance run,
    /// followed by any AI seats up to the next human.
    pub fn play_turn(
        &mut self,
        cards: &[Card],
        events: &mut EventBus,
    ) -> Result<PlayValidation, GameError> {
        self.ensure_human_turn()?;
        let validation = self.commit_play(cards, events)?;
        if validation.is_valid() {
            self.after_play(events)?;
            self.run_ai_turns(events)?;
        }
        Ok(validation)
    }

    /// Same as [`GameState::play_turn`] with cards given as text, e.g. `"3D 3S"`.
    pub fn play_from_text(
        &mut self,
        text: &str,
        events: &mut EventBus,
    ) -> Result<PlayValidation, GameError> {
        let cards = parse_cards(text)?;
        self.play_turn(&cards, events)
    }

    /// A human seat passes, then AI seats act up to the next human.
    pub fn pass_turn(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.ensure_human_turn()?;
        self.commit_pass(events)?;
        self.after_pass(events);
        self.run_ai_turns(events)
    }

    /// AI seats pass. The one exception is leading an empty table, where an
    /// AI plays its lowest card if that is legal so an all-AI table keeps
    /// moving.
    pub fn run_ai_turns(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        while self.phase == GamePhase::InProgress {
            let Some(player) = self.current_player() else {
                return Err(GameError::NoPlayers);
            };
            if player.is_human() {
                break;
            }
            let lead = if self.last_play.is_empty() {
                player
                    .hand
                    .lowest()
                    .map(|card| vec![card])
                    .filter(|cards| self.validate(cards).is_valid())
            } else {
                None
            };
            match lead {
                Some(cards) => {
                    self.commit_play(&cards, events)?;
                    self.after_play(events)?;
                }
                None => {
                    self.commit_pass(events)?;
                    self.after_pass(events);
                }
            }
        }
        Ok(())
    }

    fn ensure_human_turn(&self) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        let player = self.current_player().ok_or(GameError::NoPlayers)?;
        if !player.is_human() {
            return Err(GameError::NotHumanTurn(player.name.clone()));
        }
        Ok(())
    }

    fn after_play(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        let idx = self.current_player_index;
        if self.players[idx].has_won() {
            return self.award_win(idx, events);
        }
        self.next_turn();
        Ok(())
    }

    fn after_pass(&mut self, events: &mut EventBus) {
        self.next_turn();
        if !self.all_others_have_passed() {
            return;
        }
        if let Some(winner) = self.last_playing_player_index() {
            log::info!("{} wins the trick", self.players[winner].name);
            events.push(Event::TrickWon { player: winner });
        }
        self.clear_last_play();
    }

    /// The winner scores one point per card still held by the others.
    fn award_win(&mut self, winner: usize, events: &mut EventBus) -> Result<(), GameError> {
        self.finish()?;
        let points: usize = self
            .players
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != winner)
            .map(|(_, player)| player.hand.len())
            .sum();
        let points = u32::try_from(points).unwrap_or(u32::MAX);
        let player = self
            .players
            .get_mut(winner)
            .ok_or(GameError::InvalidPlayer(winner))?;
        player.add_score(points);
        log::info!("{} wins the game (+{} points)", player.name, points);
        events.push(Event::GameWon {
            player: winner,
            points,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{cards, table};
    use super::*;
    use crate::{PlayError, PlayType};

    fn drain(events: &mut EventBus) -> Vec<Event> {
        events.drain().collect()
    }

    #[test]
    fn rejected_play_leaves_state_untouched() {
        let mut state = table(["3D 4H 5S", "6D", "7D", "8D"], 4);
        let mut events = EventBus::default();
        let validation = state.commit_play(&cards("4H"), &mut events).expect("commit");
        assert_eq!(validation.error, Some(PlayError::MissingThreeOfDiamonds));
        assert_eq!(
            validation.error_message(),
            "First play must include 3 of Diamonds"
        );
        assert_eq!(state.players()[0].hand.len(), 3);
        assert!(state.last_play().is_empty());
        assert!(state.is_first_play_of_game());
        assert_eq!(
            drain(&mut events),
            vec![Event::PlayRejected {
                player: 0,
                reason: PlayError::MissingThreeOfDiamonds
            }]
        );
    }

    #[test]
    fn accepted_play_commits_atomically() {
        let mut state = table(["3D 4H 5S", "6D", "7D", "8D"], 4);
        state.players[2].has_passed = true;
        state.increment_passes();
        let mut events = EventBus::default();
        let validation = state.commit_play(&cards("3D"), &mut events).expect("commit");
        assert!(validation.is_valid());
        assert_eq!(validation.play_type, PlayType::Single);
        assert_eq!(state.players()[0].hand.cards(), cards("4H 5S").as_slice());
        assert_eq!(state.last_play(), cards("3D").as_slice());
        assert_eq!(state.last_playing_player_index(), Some(0));
        assert_eq!(state.consecutive_passes(), 0);
        assert!(!state.players()[2].has_passed);
        assert!(!state.is_first_play_of_game());
        assert_eq!(state.current_player_index(), 0);
    }

    #[test]
    fn cards_must_be_held_once() {
        let mut state = table(["3D 4H 5S", "6D", "7D", "8D"], 4);
        let mut events = EventBus::default();
        assert!(matches!(
            state.commit_play(&cards("6D"), &mut events),
            Err(GameError::CardNotInHand { .. })
        ));
        assert_eq!(
            state.commit_play(&cards("3D 3D"), &mut events),
            Err(GameError::DuplicateCard(cards("3D")[0]))
        );
        assert!(events.is_empty());
    }

    #[test]
    fn commits_require_a_game_in_progress() {
        let mut state = GameState::new(0);
        state.initialize_players(4, 1);
        let mut events = EventBus::default();
        assert_eq!(
            state.commit_pass(&mut events),
            Err(GameError::InvalidPhase(GamePhase::NotStarted))
        );
    }

    #[test]
    fn ai_seats_pass_back_to_the_human_and_clear_the_trick() {
        let mut state = table(["3D 4H 5S", "6D 7C", "8D 9C", "TD JC"], 1);
        let mut events = EventBus::default();
        let validation = state.play_turn(&cards("3D"), &mut events).expect("play");
        assert!(validation.is_valid());
        assert_eq!(state.current_player_index(), 0);
        assert!(state.last_play().is_empty());
        assert!(state.players().iter().all(|p| !p.has_passed));
        let events = drain(&mut events);
        assert_eq!(
            &events[1..],
            &[
                Event::Passed { player: 1 },
                Event::Passed { player: 2 },
                Event::Passed { player: 3 },
                Event::TrickWon { player: 0 },
            ]
        );
    }

    #[test]
    fn invalid_human_play_does_not_advance() {
        let mut state = table(["3D 4H 5S", "6D", "7D", "8D"], 1);
        let mut events = EventBus::default();
        let validation = state.play_from_text("4h 5s", &mut events).expect("play");
        assert_eq!(validation.error, Some(PlayError::MissingThreeOfDiamonds));
        assert_eq!(state.current_player_index(), 0);
        assert!(matches!(
            state.play_from_text("zz", &mut events),
            Err(GameError::Parse(_))
        ));
    }

    #[test]
    fn human_cannot_act_on_ai_turn() {
        let mut state = table(["3D", "6D", "7D", "8D"], 1);
        state.current_player_index = 2;
        let mut events = EventBus::default();
        assert_eq!(
            state.pass_turn(&mut events),
            Err(GameError::NotHumanTurn("CPU Charlie".to_string()))
        );
    }

    #[test]
    fn emptying_the_hand_wins_and_scores() {
        let mut state = table(["3D", "6D 7C", "8D", "TD JC QH"], 1);
        let mut events = EventBus::default();
        state.play_turn(&cards("3D"), &mut events).expect("play");
        assert_eq!(state.phase(), GamePhase::Finished);
        assert_eq!(state.winner_index(), Some(0));
        assert_eq!(state.players()[0].score, 6);
        assert_eq!(state.status_message(), "You wins!");
        assert_eq!(
            drain(&mut events).last(),
            Some(&Event::GameWon {
                player: 0,
                points: 6
            })
        );
        assert_eq!(
            state.pass_turn(&mut events),
            Err(GameError::InvalidPhase(GamePhase::Finished))
        );
    }

    #[test]
    fn human_pass_lets_ai_lead_an_empty_table() {
        // Opening requirement already met; the table is empty and the human passes.
        let mut state = table(["5D 9S", "4C 8H", "6D 7C", "TD JC"], 1);
        state.set_first_play_made();
        let mut events = EventBus::default();
        state.pass_turn(&mut events).expect("pass");
        // Seat 1 leads 4C; seats 2 and 3 pass; the human is up against 4C.
        assert_eq!(state.current_player_index(), 0);
        assert_eq!(state.last_play(), cards("4C").as_slice());
        assert_eq!(state.last_playing_player_index(), Some(1));
        assert!(!state.players()[0].has_passed);
        assert!(state.players()[2].has_passed);
        assert!(state.players()[3].has_passed);
    }

    #[test]
    fn round_winner_leads_after_others_pass() {
        let mut state = table(["3D 9S", "4C 8H", "6D 7C", "TD JC"], 2);
        state.set_first_play_made();
        state.set_last_play(&cards("5H"), 3);
        let mut events = EventBus::default();
        state.pass_turn(&mut events).expect("seat 0 passes");
        assert_eq!(state.current_player_index(), 1);
        state.pass_turn(&mut events).expect("seat 1 passes");
        // Seat 2 passes, then seat 3 leads a fresh trick with its lowest card.
        assert_eq!(state.last_play(), cards("TD").as_slice());
        assert_eq!(state.last_playing_player_index(), Some(3));
        assert_eq!(state.current_player_index(), 0);
        assert!(drain(&mut events).contains(&Event::TrickWon { player: 3 }));
    }

    #[test]
    fn all_ai_table_plays_to_a_winner() {
        let mut state = GameState::from_config(&TableConfig::new(4, 0).with_seed(77));
        let mut events = EventBus::default();
        state.start_new_game(&mut events).expect("start");
        state.run_ai_turns(&mut events).expect("ai turns");
        assert_eq!(state.phase(), GamePhase::Finished);
        let winner = state.winner_index().expect("winner");
        assert!(state.players()[winner].hand.is_empty());
        assert!(state.players()[winner].score > 0);
    }
}
