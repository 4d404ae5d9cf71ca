//! Terminal front end for the memory game.
//!
//! Renders the grid as text on stdout and reads commands from stdin:
//!
//! - `<row> <col>`: reveal a card (1-based)
//! - `s` / `stats`: show average clicks over stored games
//! - `r` / `restart`: deal a new board
//! - `q` / `quit`: leave
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `info`).

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use memory_match::{
    Board, Card, CardRef, Color, Dimensions, GameConfig, GameController, JsonlStore, MemoryStore,
    Presenter, ResultStore, Shape, UiEvent,
};

#[derive(Parser, Debug)]
#[command(name = "memory", about = "Play a card-matching memory game in the terminal")]
struct Args {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid size, e.g. "3 x 4". Overrides the configuration file.
    #[arg(long, short)]
    dimensions: Option<Dimensions>,

    /// Shuffle seed. Overrides the configuration file.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON-lines file for game results. Results are kept in memory if absent.
    #[arg(long)]
    store: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "memory game failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> memory_match::Result<()> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(dimensions) = args.dimensions {
        config = config.with_dimensions(dimensions);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;

    let (tx, rx) = mpsc::channel(32);
    let dimensions = config.dimensions;
    std::thread::spawn(move || read_commands(tx, dimensions));

    let presenter = TerminalPresenter::new(std::io::stdout());
    match args.store {
        Some(path) => play(config, presenter, JsonlStore::new(path), rx).await,
        None => play(config, presenter, MemoryStore::new(), rx).await,
    }
}

async fn play<S: ResultStore>(
    config: GameConfig,
    presenter: TerminalPresenter<std::io::Stdout>,
    store: S,
    events: mpsc::Receiver<UiEvent>,
) -> memory_match::Result<()> {
    let mut controller = GameController::new(config, presenter, store)?;
    controller.run(events).await
}

/// Blocking stdin reader, run on its own thread so an unfinished read never
/// holds up runtime shutdown.
fn read_commands(tx: mpsc::Sender<UiEvent>, dimensions: Dimensions) {
    for line in std::io::stdin().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "stdin closed");
                break;
            }
        };

        match parse_command(&line, dimensions) {
            Some(event) => {
                if tx.blocking_send(event).is_err() || event == UiEvent::Quit {
                    return;
                }
            }
            None => eprintln!("commands: <row> <col> | s(tats) | r(estart) | q(uit)"),
        }
    }
    let _ = tx.blocking_send(UiEvent::Quit);
}

/// Parse one line of input. Rows and columns are 1-based.
fn parse_command(line: &str, dimensions: Dimensions) -> Option<UiEvent> {
    match line.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" => return Some(UiEvent::Quit),
        "s" | "stats" => return Some(UiEvent::ShowStats),
        "r" | "restart" => return Some(UiEvent::Restart),
        _ => {}
    }

    let mut parts = line.split_whitespace();
    let row: u32 = parts.next()?.parse().ok()?;
    let col: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if !(1..=dimensions.rows).contains(&row) || !(1..=dimensions.cols).contains(&col) {
        return None;
    }

    Some(UiEvent::Select(CardRef::at(
        (row - 1) as usize,
        (col - 1) as usize,
        dimensions.cols as usize,
    )))
}

/// Text rendering of the board.
struct TerminalPresenter<W> {
    out: W,
    cards: Vec<Card>,
    cols: usize,
    face_up: Vec<bool>,
    matched: Vec<bool>,
    clicks: u32,
    stats: String,
}

impl<W: Write> TerminalPresenter<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            cards: Vec::new(),
            cols: 1,
            face_up: Vec::new(),
            matched: Vec::new(),
            clicks: 0,
            stats: String::new(),
        }
    }

    fn redraw(&mut self) {
        if let Err(err) = self.draw() {
            warn!(error = %err, "could not draw board");
        }
    }

    fn draw(&mut self) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Clicks: {}", self.clicks)?;
        for (row, cards) in self.cards.chunks(self.cols).enumerate() {
            let mut line = String::new();
            for (col, card) in cards.iter().enumerate() {
                let index = row * self.cols + col;
                let cell = if self.matched[index] {
                    format!("({})", label(card))
                } else if self.face_up[index] {
                    format!("[{}]", label(card))
                } else {
                    "[  ]".to_string()
                };
                line.push_str(&cell);
                line.push(' ');
            }
            writeln!(self.out, "{}", line.trim_end())?;
        }
        if !self.stats.is_empty() {
            writeln!(self.out, "{}", self.stats)?;
        }
        self.out.flush()
    }

    fn announce(&mut self, clicks: u32) -> std::io::Result<()> {
        writeln!(
            self.out,
            "Congratulations! You found all matches in {clicks} clicks!"
        )?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_board(&mut self, board: &Board) {
        self.cards = board.cards().to_vec();
        self.cols = (board.dimensions().cols as usize).max(1);
        self.face_up = vec![false; board.len()];
        self.matched = vec![false; board.len()];
        self.clicks = 0;
        self.redraw();
    }

    fn flip(&mut self, card: CardRef, face_up: bool) {
        if let Some(slot) = self.face_up.get_mut(card.index()) {
            *slot = face_up;
        }
        self.redraw();
    }

    fn mark_matched(&mut self, first: CardRef, second: CardRef) {
        for card in [first, second] {
            if let Some(slot) = self.matched.get_mut(card.index()) {
                *slot = true;
            }
        }
        self.redraw();
    }

    fn show_clicks(&mut self, clicks: u32) {
        self.clicks = clicks;
    }

    fn show_stats(&mut self, text: &str) {
        self.stats = text.to_string();
        self.redraw();
    }

    fn clear_stats(&mut self) {
        self.stats.clear();
    }

    fn announce_win(&mut self, clicks: u32) {
        if let Err(err) = self.announce(clicks) {
            warn!(error = %err, "could not announce win");
        }
    }
}

/// Two-character label: color initial and shape glyph.
fn label(card: &Card) -> String {
    let color = match card.color {
        Color::Red => 'R',
        Color::Blue => 'B',
        Color::Green => 'G',
        Color::Yellow => 'Y',
        Color::Purple => 'P',
        Color::Orange => 'O',
    };
    let shape = match card.shape {
        Shape::Circle => 'o',
        Shape::Square => '#',
        Shape::Triangle => '^',
    };
    format!("{color}{shape}")
}
