use crate::{
    default_player_name, format_cards, Card, CardParseError, Deck, DeckError, Player, PlayerKind,
    RngState, TableConfig,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod deal;
mod turn;

/// Lifecycle of one game. Moves forward only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Finished,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(GamePhase),
    #[error("no players at the table")]
    NoPlayers,
    #[error("invalid player index {0}")]
    InvalidPlayer(usize),
    #[error("not your turn: {0} is to act")]
    NotHumanTurn(String),
    #[error("{card} is not in {player}'s hand")]
    CardNotInHand { card: Card, player: String },
    #[error("{0} selected more than once")]
    DuplicateCard(Card),
    #[error("deck error: {0}")]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Parse(#[from] CardParseError),
}

/// Turn, trick and phase bookkeeping for one table. Single owner; callers
/// serialize every mutation through it.
#[derive(Debug, Clone)]
pub struct GameState {
    players: Vec<Player>,
    deck: Deck,
    rng: RngState,
    current_player_index: usize,
    last_play: Vec<Card>,
    last_playing_player_index: usize,
    consecutive_passes: u32,
    phase: GamePhase,
    first_play_of_game: bool,
    opener_dealt: bool,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(RngState::from_seed(seed))
    }

    fn with_rng(rng: RngState) -> Self {
        Self {
            players: Vec::new(),
            deck: Deck::standard52(),
            rng,
            current_player_index: 0,
            last_play: Vec::new(),
            last_playing_player_index: 0,
            consecutive_passes: 0,
            phase: GamePhase::NotStarted,
            first_play_of_game: true,
            opener_dealt: true,
        }
    }

    /// Seats players per the config. Cards are dealt by `start_new_game`.
    pub fn from_config(config: &TableConfig) -> Self {
        let config = config.normalized();
        let rng = match config.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        let mut state = Self::with_rng(rng);
        state.initialize_players(config.players, config.humans);
        for (idx, player) in state.players.iter_mut().enumerate() {
            if let Some(name) = config.name_override(idx) {
                player.name = name.to_string();
            }
        }
        state
    }

    /// Humans take the first seats. Counts are clamped to a legal table.
    pub fn initialize_players(&mut self, count: usize, humans: usize) {
        let config = TableConfig::new(count, humans).normalized();
        self.players = (0..config.players)
            .map(|idx| {
                let kind = if idx < config.humans {
                    PlayerKind::Human
                } else {
                    PlayerKind::Ai
                };
                Player::new(default_player_name(idx, kind), kind)
            })
            .collect();
        self.current_player_index = 0;
        self.last_playing_player_index = 0;
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn player_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn current_player_mut(&mut self) -> Option<&mut Player> {
        self.players.get_mut(self.current_player_index)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn last_play(&self) -> &[Card] {
        &self.last_play
    }

    /// Seat that made the last play, while a play is on the table.
    pub fn last_playing_player_index(&self) -> Option<usize> {
        if self.last_play.is_empty() {
            None
        } else {
            Some(self.last_playing_player_index)
        }
    }

    pub fn last_playing_player(&self) -> Option<&Player> {
        self.last_playing_player_index()
            .and_then(|idx| self.players.get(idx))
    }

    pub fn is_first_play_of_game(&self) -> bool {
        self.first_play_of_game
    }

    pub fn set_first_play_made(&mut self) {
        self.first_play_of_game = false;
    }

    /// The game's first play must contain the Three of Diamonds, unless that
    /// card was left undealt.
    pub fn opener_required(&self) -> bool {
        self.first_play_of_game && self.opener_dealt
    }

    pub fn set_last_play(&mut self, cards: &[Card], player_index: usize) {
        self.last_play = cards.to_vec();
        self.last_playing_player_index = player_index;
        self.reset_passes();
    }

    /// Empties the table at the end of a trick.
    pub fn clear_last_play(&mut self) {
        self.last_play.clear();
        self.reset_all_passes();
        self.reset_passes();
    }

    pub fn next_turn(&mut self) {
        if self.players.is_empty() {
            return;
        }
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        log::debug!(
            "turn passes to seat {} ({})",
            self.current_player_index,
            self.players[self.current_player_index].name
        );
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    pub fn increment_passes(&mut self) {
        self.consecutive_passes += 1;
    }

    pub fn reset_passes(&mut self) {
        self.consecutive_passes = 0;
    }

    /// Every seat other than the last one to play has passed. Does not look
    /// at whose turn it is.
    pub fn all_others_have_passed(&self) -> bool {
        if self.players.len() <= 1 {
            return true;
        }
        let passed = self
            .players
            .iter()
            .enumerate()
            .filter(|(idx, player)| *idx != self.last_playing_player_index && player.has_passed)
            .count();
        passed >= self.players.len() - 1
    }

    pub fn reset_all_passes(&mut self) {
        for player in &mut self.players {
            player.reset_pass();
        }
    }

    pub fn winner_index(&self) -> Option<usize> {
        if self.phase == GamePhase::NotStarted {
            return None;
        }
        self.players.iter().position(Player::has_won)
    }

    pub fn find_winner(&self) -> Option<&Player> {
        self.winner_index().and_then(|idx| self.players.get(idx))
    }

    /// InProgress -> Finished.
    pub fn finish(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::InvalidPhase(self.phase));
        }
        self.phase = GamePhase::Finished;
        Ok(())
    }

    pub fn status_message(&self) -> String {
        match self.phase {
            GamePhase::NotStarted => "Game not started. Waiting to begin...".to_string(),
            GamePhase::InProgress => {
                let Some(current) = self.current_player() else {
                    return String::new();
                };
                match self.last_playing_player() {
                    Some(last) => format!(
                        "{}'s turn - Last play: {} by {}",
                        current.name,
                        format_cards(&self.last_play),
                        last.name
                    ),
                    None => format!("{}'s turn - No cards played yet", current.name),
                }
            }
            GamePhase::Finished => match self.find_winner() {
                Some(winner) => format!("{} wins!", winner.name),
                None => "Game finished".to_string(),
            },
        }
    }

    pub(crate) fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::InvalidPhase(self.phase));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_cards, Hand};

    pub(super) fn cards(text: &str) -> Vec<Card> {
        parse_cards(text).expect("cards")
    }

    /// Four seats, game in progress, hands set by hand.
    pub(super) fn table(hands: [&str; 4], humans: usize) -> GameState {
        let mut state = GameState::new(1);
        state.initialize_players(4, humans);
        for (player, text) in state.players.iter_mut().zip(hands) {
            player.hand = Hand::from_cards(cards(text));
        }
        state.phase = GamePhase::InProgress;
        state
    }

    #[test]
    fn initialize_players_clamps_and_names() {
        let mut state = GameState::new(0);
        state.initialize_players(6, 2);
        assert_eq!(state.player_count(), 4);
        let names: Vec<&str> = state.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["You", "Player 2", "CPU Charlie", "CPU Dana"]);
        assert!(state.players()[1].is_human());
        assert!(!state.players()[2].is_human());
    }

    #[test]
    fn from_config_applies_name_overrides() {
        let config = TableConfig {
            names: vec!["Mei".to_string()],
            ..TableConfig::new(3, 1).with_seed(5)
        };
        let state = GameState::from_config(&config);
        assert_eq!(state.player_count(), 3);
        assert_eq!(state.players()[0].name, "Mei");
        assert_eq!(state.players()[1].name, "CPU Bob");
        assert_eq!(state.seed(), 5);
    }

    #[test]
    fn all_others_passed_ignores_last_player_flag() {
        let mut state = table(["3D", "4D", "5D", "6D"], 1);
        state.set_last_play(&cards("3D"), 0);
        for idx in 1..4 {
            state.players[idx].has_passed = true;
        }
        state.players[0].has_passed = false;
        assert!(state.all_others_have_passed());
        state.players[0].has_passed = true;
        assert!(state.all_others_have_passed());
        state.players[2].has_passed = false;
        assert!(!state.all_others_have_passed());
    }

    #[test]
    fn all_others_passed_is_vacuous_for_one_seat() {
        let mut state = GameState::new(0);
        assert!(state.all_others_have_passed());
        state.players.push(Player::new("solo", PlayerKind::Human));
        assert!(state.all_others_have_passed());
    }

    #[test]
    fn set_and_clear_last_play() {
        let mut state = table(["3D", "4D", "5D", "6D"], 1);
        state.increment_passes();
        state.increment_passes();
        state.players[1].has_passed = true;
        state.set_last_play(&cards("4D"), 1);
        assert_eq!(state.consecutive_passes(), 0);
        assert_eq!(state.last_playing_player_index(), Some(1));
        assert!(state.players[1].has_passed);

        state.increment_passes();
        state.clear_last_play();
        assert!(state.last_play().is_empty());
        assert_eq!(state.last_playing_player_index(), None);
        assert_eq!(state.consecutive_passes(), 0);
        assert!(state.players().iter().all(|p| !p.has_passed));
    }

    #[test]
    fn next_turn_wraps() {
        let mut state = table(["3D", "4D", "5D", "6D"], 1);
        state.current_player_index = 3;
        state.next_turn();
        assert_eq!(state.current_player_index(), 0);
        state.next_turn();
        assert_eq!(state.current_player_index(), 1);
    }

    #[test]
    fn finish_only_from_in_progress() {
        let mut state = GameState::new(0);
        assert_eq!(
            state.finish(),
            Err(GameError::InvalidPhase(GamePhase::NotStarted))
        );
        state.phase = GamePhase::InProgress;
        assert_eq!(state.finish(), Ok(()));
        assert_eq!(
            state.finish(),
            Err(GameError::InvalidPhase(GamePhase::Finished))
        );
    }

    #[test]
    fn status_messages() {
        let mut state = GameState::new(0);
        assert_eq!(
            state.status_message(),
            "Game not started. Waiting to begin..."
        );
        let mut state_in_play = table(["3D", "4D", "5D", "6D"], 1);
        assert_eq!(
            state_in_play.status_message(),
            "You's turn - No cards played yet"
        );
        state_in_play.set_last_play(&cards("4D"), 1);
        assert_eq!(
            state_in_play.status_message(),
            "You's turn - Last play: 4D by CPU Bob"
        );
        state.initialize_players(2, 1);
        state.phase = GamePhase::InProgress;
        state.players[0].hand = Hand::from_cards(cards("3D"));
        state.finish().expect("finish");
        assert_eq!(state.status_message(), "CPU Bob wins!");
    }
}
