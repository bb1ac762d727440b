use bigtwo_core::SortOrder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(String),
    Pass,
    Sort(SortOrder),
    Hand,
    State,
    New,
    Help,
    Quit,
}

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();
    let command = match cmd.to_ascii_lowercase().as_str() {
        "play" | "p" => {
            if args.is_empty() {
                return Err("missing cards, e.g. `play 3D 3S`".to_string());
            }
            Command::Play(args.join(" "))
        }
        "pass" => Command::Pass,
        "sort" => Command::Sort(parse_sort_order(args.first().copied())?),
        "hand" => Command::Hand,
        "state" | "s" => Command::State,
        "new" => Command::New,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`, type `help`")),
    };
    Ok(Some(command))
}

fn parse_sort_order(arg: Option<&str>) -> Result<SortOrder, String> {
    match arg.map(str::to_ascii_lowercase).as_deref() {
        None | Some("rank") => Ok(SortOrder::ByRank),
        Some("suit") => Ok(SortOrder::BySuit),
        Some(other) => Err(format!("unknown sort order `{other}`, use rank or suit")),
    }
}

pub const HELP: &str = "\
commands:
  play <cards>, p     play cards, e.g. `play 3D` or `p 10H 10S`
  pass                pass this trick
  sort [rank|suit]    reorder your hand
  hand                show your hand
  state, s            show the table
  new                 start another game once this one is over
  help, h, ?          show this help
  quit, exit          leave";
