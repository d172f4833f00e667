//! spelldrill main entry point
//!
//! Single-threaded line loop: read one action from stdin, handle it to
//! completion, re-render the quiz state, repeat. Nothing past startup
//! is fatal to the process.

use log::{error, info};
use spelldrill::session::Session;
use spelldrill::ui::{self, Command};
use spelldrill::Result;
use std::io::{self, BufRead, Write};
use std::process;

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to spelldrill.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("spelldrill.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to open spelldrill.log for debug logging: {}",
                    e
                );
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "spelldrill version {} starting (debug mode, logging to spelldrill.log)",
            spelldrill::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    // Run the application
    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut session = Session::new()?;
    info!("Session initialized - config from {:?}", session.config.path());

    let stdin = io::stdin();
    let mut out = io::stdout();

    writeln!(
        out,
        "{} {} - spelling practice with spoken words",
        spelldrill::APP_NAME,
        spelldrill::VERSION
    )?;
    writeln!(out, "Speech backend: {}", session.backend_description())?;
    ui::render_help(&mut out)?;
    ui::render(session.quiz(), session.warning(), &mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match command {
            Command::Play => {
                if let Err(e) = session.play_current() {
                    // Diagnostic detail is already logged at the
                    // synthesizer boundary; show the short message here
                    ui::render_action_error(&e, &mut out)?;
                    if e.is_configuration() {
                        session.set_warning(e.to_string());
                    }
                }
            }
            Command::Submit(input) => {
                if session.submit(&input).is_none() {
                    writeln!(out, "The quiz is already complete - :r to restart.")?;
                }
            }
            Command::Next => {
                if !session.next() {
                    writeln!(out, "Nothing to advance - submit an answer first.")?;
                }
            }
            Command::Restart => {
                if !session.restart() {
                    writeln!(out, "Restart is only available after the last word.")?;
                }
            }
            Command::Help => {
                ui::render_help(&mut out)?;
            }
            Command::Unknown(name) => {
                writeln!(out, "Unknown command :{} - :h for help.", name)?;
            }
            Command::Quit => {
                info!("Quit requested");
                break;
            }
        }

        // Mutate state, then re-render
        ui::render(session.quiz(), session.warning(), &mut out)?;
        out.flush()?;
    }

    info!("Session ended");
    Ok(())
}
