//! Terminal pathfinding visualizer using crossterm.
//!
//! Run: cargo run --bin pathlab -- --algorithm bfs --seed 7
//!
//! Press `q` or Esc to stop the animation early.

use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathlab_demo::{Config, Session, DEFAULT_COLS, DEFAULT_ROWS};
use pathlab_search::AlgorithmKind;

#[derive(Parser)]
#[command(name = "pathlab", version, about = "Animate BFS and A* on a grid or maze")]
struct Cli {
    /// Search algorithm: bfs or astar
    #[arg(short, long, default_value_t = AlgorithmKind::AStar)]
    algorithm: AlgorithmKind,

    /// Grid rows (odd values give a fully connected maze)
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    rows: i32,

    /// Grid columns
    #[arg(short, long, default_value_t = DEFAULT_COLS)]
    cols: i32,

    /// Use an open grid instead of a maze
    #[arg(long)]
    open: bool,

    /// Random walls on an open grid
    #[arg(short, long, default_value_t = 0)]
    walls: usize,

    /// Random seed for reproducible grids
    #[arg(short, long)]
    seed: Option<u64>,

    /// Milliseconds between search steps
    #[arg(short, long, default_value_t = 16)]
    tick: u64,

    /// Skip the animation and print the final grid
    #[arg(short, long)]
    instant: bool,

    /// Print the last N step log entries
    #[arg(short, long, default_value_t = 0)]
    log: usize,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            rows: self.rows,
            cols: self.cols,
            algorithm: self.algorithm,
            maze: !self.open,
            walls: self.walls,
            seed: self.seed,
            tick: Duration::from_millis(self.tick),
        }
    }
}

fn glyph_color(ch: char) -> Color {
    match ch {
        'S' => Color::Green,
        'G' => Color::Red,
        '#' => Color::DarkGrey,
        '*' => Color::Yellow,
        'o' => Color::Cyan,
        '.' => Color::Blue,
        _ => Color::Reset,
    }
}

fn draw(out: &mut impl Write, session: &Session) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0))?;
    for (y, line) in session.frame().iter().enumerate() {
        queue!(out, cursor::MoveTo(0, y as u16))?;
        for ch in line.chars() {
            queue!(out, SetForegroundColor(glyph_color(ch)), Print(ch))?;
        }
    }
    let y = session.grid().rows() as u16 + 1;
    queue!(
        out,
        ResetColor,
        cursor::MoveTo(0, y),
        terminal::Clear(ClearType::CurrentLine),
        Print(session.status_line())
    )?;
    out.flush()
}

/// Restores the terminal when dropped.
struct Screen;

impl Screen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = crossterm::execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn quit_requested(timeout: Duration) -> io::Result<bool> {
    if !event::poll(timeout)? {
        return Ok(false);
    }
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn animate(session: &mut Session, tick: Duration) -> Result<(), Box<dyn Error>> {
    let _screen = Screen::enter()?;
    let mut stdout = io::stdout();
    draw(&mut stdout, session)?;
    while session.is_running() {
        if quit_requested(tick)? {
            log::info!("animation stopped after {} steps", session.steps());
            break;
        }
        session.tick();
        draw(&mut stdout, session)?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.config();
    let mut session = Session::new(&config);
    session.apply(pathlab_demo::Command::Run(config.algorithm))?;

    if cli.instant {
        while session.is_running() {
            session.tick();
        }
    } else {
        animate(&mut session, config.tick)?;
    }

    let mut stdout = io::stdout();
    for line in session.frame() {
        writeln!(stdout, "{line}")?;
    }
    writeln!(stdout, "{}", session.status_line())?;
    if let Some(search) = session.search() {
        for e in search.log().tail(cli.log) {
            let at = e.pos.map(|p| p.to_string()).unwrap_or_default();
            writeln!(
                stdout,
                "{:>9.3} ms  {:<18} {at:<9} {}",
                e.elapsed.as_secs_f64() * 1000.0,
                format!("{:?}", e.kind),
                e.description
            )?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
