use bigtwo_core::{format_cards, play_type_name, Event, EventBus, GamePhase, GameState, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStyle {
    Text,
    Json,
}

pub fn drain_events(state: &GameState, events: &mut EventBus, style: EventStyle) {
    for event in events.drain() {
        match style {
            EventStyle::Text => println!("{}", format_event(state.players(), &event)),
            EventStyle::Json => match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(err) => log::warn!("could not encode {event:?}: {err}"),
            },
        }
    }
}

fn seat_name(players: &[Player], index: usize) -> String {
    players
        .get(index)
        .map(|player| player.name.clone())
        .unwrap_or_else(|| format!("seat {index}"))
}

pub fn format_event(players: &[Player], event: &Event) -> String {
    match event {
        Event::GameStarted { starter, players: count } => format!(
            "new game with {count} players, {} leads",
            seat_name(players, *starter)
        ),
        Event::CardsDealt { player, count } => {
            format!("{} is dealt {count} cards", seat_name(players, *player))
        }
        Event::CardsPlayed {
            player,
            cards,
            play_type,
            five_card_type,
        } => format!(
            "{} plays {} ({})",
            seat_name(players, *player),
            format_cards(cards),
            play_type_name(*play_type, *five_card_type)
        ),
        Event::PlayRejected { player, reason } => {
            format!("{} cannot play that: {reason}", seat_name(players, *player))
        }
        Event::Passed { player } => format!("{} passes", seat_name(players, *player)),
        Event::TrickWon { player } => {
            format!("{} takes the trick and leads", seat_name(players, *player))
        }
        Event::GameWon { player, points } => format!(
            "{} wins the game (+{points} points)",
            seat_name(players, *player)
        ),
    }
}

pub fn print_hand(state: &GameState) {
    if state.phase() != GamePhase::InProgress {
        println!("no game in progress");
        return;
    }
    let Some(player) = state.current_player() else {
        println!("no players at the table");
        return;
    };
    println!("{}'s hand: {}", player.name, player.hand.display_string());
}

pub fn print_state(state: &GameState) {
    println!("{}", state.status_message());
    for (index, player) in state.players().iter().enumerate() {
        let marker = if index == state.current_player_index()
            && state.phase() == GamePhase::InProgress
        {
            ">"
        } else {
            " "
        };
        println!("{marker} {player}");
    }
    if state.opener_required() {
        println!("the opening play must include 3♦");
    }
}

pub fn prompt(state: &GameState) -> String {
    match state.phase() {
        GamePhase::InProgress => match state.current_player() {
            Some(player) => format!("{}> ", player.name),
            None => "> ".to_string(),
        },
        GamePhase::Finished => "game over (new/quit)> ".to_string(),
        GamePhase::NotStarted => "> ".to_string(),
    }
}
