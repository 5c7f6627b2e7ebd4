use std::path::{Path, PathBuf};
use std::thread;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{info, trace};

use memory_match::{
    Card, GameRng, GameSettings, Level, MemoryGame, Phase, SessionSnapshot, SystemClock,
    ThemeCatalog,
};

const COLUMNS: usize = 4;

#[derive(Parser)]
#[command(name = "memory-match")]
#[command(about = "Find all the pairs in a grid of face-down cards")]
#[command(version)]
struct Cli {
    /// Difficulty: beginner (4 pairs) or advanced (8 pairs)
    #[arg(short, long, default_value = "beginner")]
    level: Level,

    /// Image theme
    #[arg(short, long, default_value = "space")]
    theme: String,

    /// Seed for the deck shuffle (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML theme catalog (built-in themes if omitted)
    #[arg(long)]
    themes: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.themes {
        Some(path) => ThemeCatalog::load(path)?,
        None => ThemeCatalog::builtin(),
    };
    let rng = match cli.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };

    info!(seed = rng.seed(), "deck shuffle seeded");

    let mut game = MemoryGame::with_parts(catalog, rng, SystemClock)
        .with_settings(GameSettings::new(cli.level, cli.theme.as_str()));

    run(&mut game)
}

fn run(game: &mut MemoryGame) -> Result<()> {
    let mut editor = DefaultEditor::new()?;

    println!("{}", "Memory Game".bold());
    print_settings(game);

    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = editor.add_history_entry(line) {
            trace!(error = %e, "history entry not recorded");
        }

        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("quit" | "q" | "exit"), _) => break,
            (Some("help" | "?"), _) => print_help(),
            (Some("start" | "new"), _) => match game.restart() {
                Ok(snapshot) => print_board(&snapshot, game.catalog().card_back()),
                Err(e) => println!("{}", e.to_string().red()),
            },
            (Some("settings"), _) => {
                game.return_to_settings();
                print_settings(game);
            }
            (Some("level"), Some(value)) => match value.parse::<Level>() {
                Ok(level) => {
                    game.set_level(level);
                    print_settings(game);
                }
                Err(e) => println!("{}", e.to_string().red()),
            },
            (Some("theme"), Some(value)) => {
                game.set_theme(value);
                print_settings(game);
            }
            (Some("show"), _) => print_board(&game.snapshot(), game.catalog().card_back()),
            (Some(word), None) => match word.parse::<usize>() {
                Ok(position) => select(game, position),
                Err(_) => println!("Unknown command. Type 'help' for a list."),
            },
            _ => println!("Unknown command. Type 'help' for a list."),
        }
    }

    Ok(())
}

/// Select the card at a 1-based grid position.
fn select(game: &mut MemoryGame, position: usize) {
    let snapshot = game.snapshot();
    if snapshot.phase == Phase::NotStarted {
        println!("No game in progress. Type 'start'.");
        return;
    }

    let Some(id) = position
        .checked_sub(1)
        .and_then(|i| snapshot.card_at(i))
        .map(|c| c.id)
    else {
        println!("No card at position {}.", position);
        return;
    };

    let snapshot = game.select_card(id);
    print_board(&snapshot, game.catalog().card_back());

    // Let the player see the mismatch, then flip it back
    if let Some(wait) = game.time_until_flip_back() {
        thread::sleep(wait);
        if game.poll() {
            print_board(&game.snapshot(), game.catalog().card_back());
        }
    }

    if let Some(message) = game.snapshot().win_message() {
        println!("{}", "Congratulations! You won!".green().bold());
        println!("{}", message);
        println!("Type 'start' to play again or 'settings' to change the game.");
    }
}

fn print_settings(game: &MemoryGame) {
    let settings = game.settings();
    println!("{}", "Game Settings".bold());
    println!("  Level: {}", settings.level.label());
    let theme_name = game
        .catalog()
        .get(&settings.theme)
        .map_or_else(|| format!("{} (unknown)", settings.theme), |t| t.name.clone());
    println!("  Image Theme: {}", theme_name);

    let levels: Vec<_> = Level::ALL.iter().map(|l| l.as_str()).collect();
    let themes: Vec<_> = game.catalog().themes().map(|t| t.id.as_str()).collect();
    println!("  Levels: {}   Themes: {}", levels.join(", "), themes.join(", "));
    println!("Type 'start' to begin.");
}

fn print_help() {
    println!("  <n>            flip the card at position n");
    println!("  show           redraw the board");
    println!("  start | new    start a new game with the current settings");
    println!("  settings       abandon the game and show settings");
    println!("  level <name>   set the level for the next game");
    println!("  theme <name>   set the theme for the next game");
    println!("  quit           exit");
}

fn print_board(snapshot: &SessionSnapshot, card_back: &str) {
    if snapshot.phase == Phase::NotStarted {
        println!("No game in progress.");
        return;
    }

    println!("{}", snapshot.status_line());
    for (row, chunk) in snapshot.cards.iter().collect::<Vec<_>>().chunks(COLUMNS).enumerate() {
        let cells: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(col, card)| cell(card, row * COLUMNS + col + 1, card_back))
            .collect();
        println!("  {}", cells.join(" "));
    }
}

fn cell(card: &Card, position: usize, card_back: &str) -> String {
    let text = format!("{:^14}", label(card, position, card_back));
    if card.is_matched {
        text.green().to_string()
    } else if card.is_flipped {
        text.yellow().bold().to_string()
    } else {
        text.dimmed().to_string()
    }
}

fn label(card: &Card, position: usize, card_back: &str) -> String {
    if card.is_face_up() {
        asset_name(card.visible_image(card_back))
    } else {
        format!("[{}]", position)
    }
}

fn asset_name(image: &str) -> String {
    Path::new(image)
        .file_stem()
        .map_or_else(|| image.to_string(), |s| s.to_string_lossy().into_owned())
}
