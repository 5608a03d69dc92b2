mod config;
mod game_loop;
mod human;
mod renderer;

use std::time::Duration;

use clap::Parser;
use nrow_engine::config::Validate;
use nrow_engine::{GameState, Mark, RandomPlayer, SearchPlayer, SessionRng, log, logger};

use config::{CONFIG_FILE, MatchConfig, PlayerConfig, PlayerKind, get_config_manager};
use game_loop::{Seat, run_match};
use human::HumanPlayer;

#[derive(Parser)]
#[command(name = "nrow", about = "N-in-a-row against the console or the computer")]
struct Args {
    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    #[arg(long)]
    dimension: Option<usize>,

    #[arg(long)]
    run_length: Option<usize>,

    /// Search depth for every computer player that searches.
    #[arg(long)]
    depth: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_parser = parse_mark)]
    starting_mark: Option<Mark>,

    /// Write the config, overrides included, back to the config file.
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut MatchConfig) {
        if let Some(dimension) = self.dimension {
            config.dimension = dimension;
        }
        if let Some(run_length) = self.run_length {
            config.run_length = run_length;
        }
        if let Some(depth) = self.depth {
            for player in config.players.iter_mut().filter(|p| p.kind == PlayerKind::Search) {
                player.depth = depth;
            }
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(mark) = self.starting_mark {
            config.starting_mark = mark;
        }
    }
}

fn parse_mark(text: &str) -> Result<Mark, String> {
    match text.trim().to_ascii_uppercase().as_str() {
        "X" => Ok(Mark::X),
        "O" => Ok(Mark::O),
        _ => Err(format!("expected X or O, got {:?}", text)),
    }
}

/// Config file contents with command line overrides applied, validated,
/// and written back when `--save-config` is given.
fn load_config(args: &Args) -> Result<MatchConfig, String> {
    let config_manager = get_config_manager(&args.config);
    let mut config = config_manager.get_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;
    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Saved config to {}", args.config);
    }
    Ok(config)
}

fn create_seat(player: &PlayerConfig, config: &MatchConfig) -> Seat {
    let computer_delay = Duration::from_millis(config.move_delay_ms);
    match player.kind {
        PlayerKind::Human => Seat {
            player: Box::new(HumanPlayer::new(player.mark, std::io::stdin())),
            delay: Duration::ZERO,
            prompt: true,
        },
        PlayerKind::Random => Seat {
            player: Box::new(RandomPlayer::new(player.mark)),
            delay: computer_delay,
            prompt: false,
        },
        PlayerKind::Search => Seat {
            player: Box::new(SearchPlayer::new(player.mark, player.depth, config.search)),
            delay: computer_delay,
            prompt: false,
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = load_config(&args)?;
    log!("Loaded config from {}: {:?}", args.config, config);

    let mut rng = config.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    log!("Session seed {}", rng.seed());

    let state = GameState::empty(config.dimension, config.run_length, config.starting_mark)?;
    let seats: Vec<Seat> = config.players.iter().map(|p| create_seat(p, &config)).collect();
    for player in &config.players {
        log!("{} is played by {:?}", player.mark, player.kind);
    }

    let stdout = std::io::stdout();
    run_match(state, seats, &mut rng, &mut stdout.lock())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let args = Args::parse_from([
            "nrow",
            "--dimension",
            "7",
            "--run-length",
            "4",
            "--depth",
            "3",
            "--seed",
            "99",
            "--starting-mark",
            "o",
        ]);
        let mut config = MatchConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.dimension, 7);
        assert_eq!(config.run_length, 4);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.starting_mark, Mark::O);
        assert_eq!(config.players[0].depth, 0);
        assert_eq!(config.players[1].depth, 3);
        assert_eq!(args.config, CONFIG_FILE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let args = Args::parse_from(["nrow", "--config", "other.yaml"]);
        let mut config = MatchConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config, MatchConfig::default());
        assert_eq!(args.config, "other.yaml");
    }

    #[test]
    fn test_saved_overrides_are_loaded_next_time() {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_nrow_saved_config_{}.yaml", random_number));
        let file_path = path.to_string_lossy().into_owned();

        let save = Args::parse_from(["nrow", "--config", &file_path, "--dimension", "5", "--save-config"]);
        let saved = load_config(&save).unwrap();
        assert_eq!(saved.dimension, 5);

        let reload = Args::parse_from(["nrow", "--config", &file_path]);
        assert_eq!(load_config(&reload).unwrap(), saved);

        std::fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn test_invalid_override_is_not_saved() {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_nrow_rejected_config_{}.yaml", random_number));
        let file_path = path.to_string_lossy().into_owned();

        let args = Args::parse_from(["nrow", "--config", &file_path, "--run-length", "9", "--save-config"]);
        assert!(load_config(&args).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_parse_mark() {
        assert_eq!(parse_mark("x"), Ok(Mark::X));
        assert_eq!(parse_mark("O"), Ok(Mark::O));
        assert!(parse_mark("Z").is_err());
    }
}
