//! Ultimate Games - command-line front end
//!
//! Every subcommand except `play` works on the save file: load, act, save.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use cli::{Cli, Command};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;
use ultimate_games::{
    AppConfig, GameSession, LoadError, LoadPolicy, Move, Player, Position, SessionEvent, Target,
};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let mut session = GameSession::from_config(&config);

    match cli.command {
        Command::New => {
            session.save()?;
            println!("New game saved to {}", session.store().path().display());
            print!("{}", session.render());
            Ok(())
        }
        Command::Show => {
            load_existing(&mut session)?;
            print!("{}", session.render());
            Ok(())
        }
        Command::Move {
            player,
            sub_row,
            sub_col,
            cell_row,
            cell_col,
        } => {
            let event = move_saved_game(
                &mut session,
                Move::from_coords(player, sub_row, sub_col, cell_row, cell_col)?,
            )?;
            report(&event);
            print!("{}", session.render());
            Ok(())
        }
        Command::Targets => {
            load_existing(&mut session)?;
            for target in session.engine().legal_targets() {
                println!("{}", target);
            }
            Ok(())
        }
        Command::Reset => {
            session.reset();
            session.save()?;
            println!("Game reset");
            Ok(())
        }
        Command::Play { resume } => {
            if resume {
                load_existing(&mut session)?;
            }
            run_interactive(&mut session)
        }
    }
}

/// Reads the config file and applies command-line overrides.
#[instrument(skip(cli))]
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(save) = &cli.save {
        config = config.with_save_path(save.clone());
    }
    if cli.recompute_on_load {
        let rules = config.rules().with_load_policy(LoadPolicy::Recompute);
        config = config.with_rules(rules);
    }
    debug!(?config, "Effective configuration");
    Ok(config)
}

/// Loads the saved game into the session.
///
/// A missing file is a notice and play continues from a fresh game. Any
/// other failure stops the command so the broken file is not overwritten.
fn load_existing(session: &mut GameSession) -> Result<()> {
    match session.load() {
        Ok(()) => Ok(()),
        Err(LoadError::Missing(path)) => {
            println!("No saved game at {}, starting a new one", path.display());
            Ok(())
        }
        Err(e) => bail!(e),
    }
}

/// Loads the saved game, applies one move and saves again if it was
/// accepted. A save that fails to load is left on disk as it was.
#[instrument(skip(session))]
fn move_saved_game(session: &mut GameSession, action: Move) -> Result<SessionEvent> {
    load_existing(session)?;
    let event = session.submit(action);
    if !matches!(event, SessionEvent::Rejected(_)) {
        session.save()?;
    }
    Ok(event)
}

fn report(event: &SessionEvent) {
    match event {
        SessionEvent::Rejected(reason) => println!("Move ignored: {}", reason),
        SessionEvent::Played(outcome) => {
            if let Some(winner) = outcome.sub_board_won {
                println!("{} takes the sub-board", winner);
            }
        }
        SessionEvent::GameOver {
            winner,
            winner_name,
        } => {
            println!("Game over! {} ({}) won! Starting a new game.", winner_name, winner);
        }
    }
}

/// One line of input in interactive mode.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Place(Target),
    Rename(Player, String),
    Avatar(Player, Option<PathBuf>),
    Save,
    Load,
    Reset,
    Show,
    Targets,
    Quit,
    Help,
}

fn parse_input(line: &str) -> Option<Input> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["save"] => Some(Input::Save),
        ["load"] => Some(Input::Load),
        ["reset"] => Some(Input::Reset),
        ["show"] => Some(Input::Show),
        ["targets"] => Some(Input::Targets),
        ["quit"] | ["exit"] => Some(Input::Quit),
        ["help"] | ["?"] => Some(Input::Help),
        ["name", mark, name @ ..] => Some(Input::Rename(mark.parse().ok()?, name.join(" "))),
        ["avatar", mark] => Some(Input::Avatar(mark.parse().ok()?, None)),
        ["avatar", mark, path @ ..] => Some(Input::Avatar(
            mark.parse().ok()?,
            Some(PathBuf::from(path.join(" "))),
        )),
        [a, b, c, d] => {
            let n: Vec<usize> = [a, b, c, d]
                .iter()
                .map(|w| w.parse().ok())
                .collect::<Option<_>>()?;
            let board = Position::from_row_col(n[0], n[1])?;
            let cell = Position::from_row_col(n[2], n[3])?;
            Some(Input::Place(Target::new(board, cell)))
        }
        _ => None,
    }
}

const HELP: &str = "Commands: <sub_row> <sub_col> <cell_row> <cell_col> | name <x|o> <name> | avatar <x|o> [path] | save | load | reset | show | targets | help | quit";

/// Runs the line-oriented game loop until `quit` or end of input.
#[instrument(skip(session))]
fn run_interactive(session: &mut GameSession) -> Result<()> {
    info!("Starting interactive game");
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("{}", HELP);
    print!("{}", session.render());

    for line in stdin.lock().lines() {
        let line = line.context("reading input")?;
        match parse_input(&line) {
            Some(Input::Place(target)) => {
                let event = session.submit_at(target);
                report(&event);
                if !matches!(event, SessionEvent::Rejected(_)) {
                    print!("{}", session.render());
                }
            }
            Some(Input::Rename(mark, name)) => {
                session.rename_player(mark, &name);
                println!("{}", session.turn_line());
            }
            Some(Input::Avatar(mark, avatar)) => {
                session.set_avatar(mark, avatar);
                println!("{}", session.players().badge(mark));
            }
            Some(Input::Save) => match session.save() {
                Ok(()) => println!("Saved to {}", session.store().path().display()),
                Err(e) => println!("{}", e),
            },
            Some(Input::Load) => match session.load() {
                Ok(()) => print!("{}", session.render()),
                Err(e) => println!("{}", e),
            },
            Some(Input::Reset) => {
                session.reset();
                print!("{}", session.render());
            }
            Some(Input::Show) => print!("{}", session.render()),
            Some(Input::Targets) => {
                let targets = session.engine().legal_targets();
                let listed = targets
                    .iter()
                    .map(|t| format!("[{}]", t))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{}", listed);
            }
            Some(Input::Help) => println!("{}", HELP),
            Some(Input::Quit) => break,
            None => println!("Unrecognized input. {}", HELP),
        }
        stdout.flush()?;
    }

    info!("Interactive game ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use ultimate_games::{GameState, Players, RulesConfig, SaveStore};

    fn session_in(dir: &TempDir) -> GameSession {
        GameSession::new(
            Players::default(),
            SaveStore::new(dir.path().join("save.txt")),
            RulesConfig::default(),
        )
    }

    #[test]
    fn test_move_leaves_malformed_save_untouched() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("save.txt");
        std::fs::write(&path, "{\"currentPlayer\": ").expect("write");
        let mut session = session_in(&dir);

        let result = move_saved_game(
            &mut session,
            Move::new(Player::X, Position::Center, Position::Center),
        );
        assert!(result.is_err());
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "{\"currentPlayer\": "
        );
        assert_eq!(session.engine().state(), &GameState::new());
    }

    #[test]
    fn test_move_without_save_starts_fresh() {
        let dir = TempDir::new().expect("temp dir");
        let mut session = session_in(&dir);

        let event = move_saved_game(
            &mut session,
            Move::new(Player::X, Position::Center, Position::TopLeft),
        )
        .expect("move applied");
        assert!(matches!(event, SessionEvent::Played(_)));

        let mut reloaded = session_in(&dir);
        reloaded.load().expect("saved by the move");
        assert_eq!(reloaded.engine().state(), session.engine().state());
    }

    #[test]
    fn test_rejected_move_is_not_saved() {
        let dir = TempDir::new().expect("temp dir");
        let mut session = session_in(&dir);

        let event = move_saved_game(
            &mut session,
            Move::new(Player::O, Position::Center, Position::Center),
        )
        .expect("runs");
        assert!(matches!(event, SessionEvent::Rejected(_)));
        assert!(!dir.path().join("save.txt").exists());
    }

    #[test]
    fn test_parse_place() {
        assert_eq!(
            parse_input(" 1 1  0 2 "),
            Some(Input::Place(Target::new(Position::Center, Position::TopRight)))
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(parse_input("0 0 0 3"), None);
        assert_eq!(parse_input("a b c d"), None);
        assert_eq!(parse_input("1 2 3"), None);
    }

    #[test]
    fn test_parse_name() {
        assert_eq!(
            parse_input("name o  Mary   Jane "),
            Some(Input::Rename(Player::O, "Mary Jane".to_string()))
        );
        assert_eq!(
            parse_input("name X"),
            Some(Input::Rename(Player::X, String::new()))
        );
        assert_eq!(parse_input("name z Bob"), None);
    }

    #[test]
    fn test_parse_avatar() {
        assert_eq!(
            parse_input("avatar x pics/me.png"),
            Some(Input::Avatar(Player::X, Some(PathBuf::from("pics/me.png"))))
        );
        assert_eq!(parse_input("avatar O"), Some(Input::Avatar(Player::O, None)));
        assert_eq!(parse_input("avatar"), None);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_input("save"), Some(Input::Save));
        assert_eq!(parse_input("exit"), Some(Input::Quit));
        assert_eq!(parse_input("targets"), Some(Input::Targets));
    }
}
