use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

fn default_players() -> usize {
    4
}

fn default_humans() -> usize {
    1
}

/// Table setup. Deserializes from partial JSON; missing fields take the
/// defaults of a four seat table with one human.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    #[serde(default = "default_players")]
    pub players: usize,
    #[serde(default = "default_humans")]
    pub humans: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Seat name overrides, by seat index.
    #[serde(default)]
    pub names: Vec<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
            humans: default_humans(),
            seed: None,
            names: Vec::new(),
        }
    }
}

impl TableConfig {
    pub fn new(players: usize, humans: usize) -> Self {
        Self {
            players,
            humans,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clamps the seat count to 2..=4 and the human count to the seats.
    pub fn normalized(&self) -> Self {
        let players = self.players.clamp(MIN_PLAYERS, MAX_PLAYERS);
        Self {
            players,
            humans: self.humans.min(players),
            seed: self.seed,
            names: self.names.clone(),
        }
    }

    pub fn name_override(&self, index: usize) -> Option<&str> {
        self.names
            .get(index)
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
    }
}
