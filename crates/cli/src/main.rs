mod args;
mod command;
mod view;

use anyhow::{Context, Result};
use args::Args;
use bigtwo_core::{EventBus, GamePhase, GameState};
use clap::Parser;
use command::{parse_command, Command, HELP};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use view::{drain_events, print_hand, print_state, prompt, EventStyle};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .init();

    let config = args.table_config()?;
    log::info!(
        "table: {} players, {} human, seed {:?}",
        config.players,
        config.humans,
        config.seed
    );
    let style = if args.json_events {
        EventStyle::Json
    } else {
        EventStyle::Text
    };

    let mut state = GameState::from_config(&config);
    let mut events = EventBus::default();
    state
        .start_new_game(&mut events)
        .context("Failed to start the game")?;

    if args.auto {
        run_auto(&mut state, &mut events, style)
    } else {
        run_interactive(&mut state, &mut events, style)
    }
}

fn run_auto(state: &mut GameState, events: &mut EventBus, style: EventStyle) -> Result<()> {
    println!("seed: {}", state.seed());
    state
        .run_ai_turns(events)
        .context("Failed while computer seats were playing")?;
    drain_events(state, events, style);
    print_state(state);
    Ok(())
}

/// Stdin is read on its own thread; this loop owns the game and applies
/// one command per line.
fn run_interactive(state: &mut GameState, events: &mut EventBus, style: EventStyle) -> Result<()> {
    let lines = spawn_stdin_reader();
    println!("{HELP}");
    settle(state, events, style);

    loop {
        print!("{}", prompt(state));
        io::stdout().flush().context("Failed to flush stdout")?;
        let Ok(line) = lines.recv() else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        let moved = apply_command(state, events, command);
        drain_events(state, events, style);
        if moved {
            announce_turn(state);
        }
    }
    Ok(())
}

/// Returns true when the command moved the game along.
fn apply_command(state: &mut GameState, events: &mut EventBus, command: Command) -> bool {
    let outcome = match command {
        Command::Play(text) => state
            .play_from_text(&text, events)
            .map(|validation| validation.is_valid()),
        Command::Pass => state.pass_turn(events).map(|()| true),
        Command::Sort(order) => {
            if let Some(player) = state.current_player_mut() {
                player.hand.sort(order);
            }
            print_hand(state);
            Ok(false)
        }
        Command::Hand => {
            print_hand(state);
            Ok(false)
        }
        Command::State => {
            print_state(state);
            Ok(false)
        }
        Command::New => state
            .start_new_game(events)
            .and_then(|()| state.run_ai_turns(events))
            .map(|()| true),
        Command::Help => {
            println!("{HELP}");
            Ok(false)
        }
        Command::Quit => Ok(false),
    };
    outcome.unwrap_or_else(|err| {
        log::debug!("command rejected: {err:?}");
        println!("error: {err}");
        false
    })
}

/// Lets computer seats act until a human is up, then shows the table.
fn settle(state: &mut GameState, events: &mut EventBus, style: EventStyle) {
    if let Err(err) = state.run_ai_turns(events) {
        println!("error: {err}");
    }
    drain_events(state, events, style);
    print_state(state);
    announce_turn(state);
}

fn announce_turn(state: &GameState) {
    match state.phase() {
        GamePhase::InProgress => print_hand(state),
        GamePhase::Finished => {
            println!("{}", state.status_message());
            println!("type `new` for another game or `quit` to leave");
        }
        GamePhase::NotStarted => {}
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
