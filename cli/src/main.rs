//! FILENAME: cli/src/main.rs
//! PURPOSE: Headless shell for the calculator engine.
//! CONTEXT: Stands in for the graphical keypads. Either evaluates one
//! expression with -e, or runs a line-oriented REPL that feeds each typed
//! line through the keymap into a Session and prints the history and
//! display lines a keypad UI would render.

use anyhow::Result;
use clap::Parser;
use engine::{evaluate_with, events_from_str, EvalOptions, InputEvent, Mode, Session};
use std::io::{BufRead, Write};

#[derive(Parser)]
#[command(name = "neoncalc", version, about = "Calculator expression engine shell")]
struct Args {
    /// Evaluate one expression and exit
    #[arg(short, long)]
    expression: Option<String>,

    /// Start the REPL in scientific mode
    #[arg(long)]
    scientific: bool,

    /// Treat adjacent operands ("2pi") as multiplication
    #[arg(long)]
    implicit_mul: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let options = EvalOptions {
        implicit_multiplication: args.implicit_mul,
    };

    if let Some(expression) = args.expression {
        let result = evaluate_with(&expression, options)?;
        println!("{}", result);
        return Ok(());
    }

    repl(options, args.scientific)
}

fn repl(options: EvalOptions, scientific: bool) -> Result<()> {
    let mut session = Session::with_options(options);
    if scientific {
        session.apply(InputEvent::ToggleMode);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "neoncalc — type keys (e.g. 2+3*4=), :mode, :clear, :quit"
    )?;
    render(&mut out, &session)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        match trimmed {
            ":quit" | ":q" => break,
            ":clear" => session.apply(InputEvent::Clear),
            ":mode" => session.apply(InputEvent::ToggleMode),
            _ => {
                let events = events_from_str(trimmed);
                log::debug!("line {:?} -> {} events", trimmed, events.len());
                for event in events {
                    session.apply(event);
                }
            }
        }

        render(&mut out, &session)?;
    }

    Ok(())
}

/// Prints what a keypad UI would render: the history line (when present)
/// above the current display line.
fn render(out: &mut impl Write, session: &Session) -> Result<()> {
    if !session.history_text().is_empty() {
        writeln!(out, "      {}", session.history_text())?;
    }
    let mode = match session.mode() {
        Mode::Standard => "std",
        Mode::Scientific => "sci",
    };
    writeln!(out, "[{}] {}", mode, session.display_text())?;
    Ok(())
}
