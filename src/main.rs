mod app;
mod config;
mod error;
mod event;
mod jump;
mod link;
mod logging;
mod parents;
mod picker;
mod ui;
mod vault;

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use event::run_app;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!("topicjump {}", VERSION);
    println!("A terminal markdown note viewer that jumps to parent topic notes");
    println!();
    println!("USAGE:");
    println!("    topicjump [OPTIONS] [PATH]");
    println!();
    println!("ARGUMENTS:");
    println!("    [PATH]           Open a file or folder directly");
    println!("                     - If PATH is a folder, opens it as the notes directory");
    println!("                     - If PATH is a .md file, opens it and its parent folder");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
    println!("    -c, --config     Print config file path");
    println!("    -d, --dir        Print notes directory path");
    println!("    -l, --log        Print log file path");
    println!("    --reset          Reset config to defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    {}    Log filter, e.g. debug or topicjump=trace", logging::LOG_ENV);
}

fn reset_config() {
    let config_path = config::Config::config_path();

    println!("Resetting topicjump configuration...");
    println!();

    if config_path.exists() {
        match fs::remove_file(&config_path) {
            Ok(_) => println!("  Deleted: {}", config_path.display()),
            Err(e) => eprintln!("  Failed to remove config: {}", e),
        }
    } else {
        println!("  Config file not found (skipped)");
    }

    match config::Config::default().save() {
        Ok(()) => println!("  Created: {}", config_path.display()),
        Err(e) => eprintln!("  Failed to write config: {}", e),
    }

    println!();
    println!("Reset complete! Configuration restored to v{} defaults.", VERSION);
}

fn resolve_path(path_str: &str) -> Option<PathBuf> {
    let expanded = shellexpand::tilde(path_str).to_string();
    let path = PathBuf::from(&expanded);
    let absolute = if path.is_absolute() {
        path
    } else {
        env::current_dir().ok()?.join(path)
    };

    absolute.canonicalize().ok().or(Some(absolute))
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = env::args().collect();
    let mut initial_path: Option<PathBuf> = None;

    if args.len() > 1 {
        match args[1].as_str() {
            "-v" | "--version" => {
                println!("topicjump {}", VERSION);
                return Ok(());
            }
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-c" | "--config" => {
                println!("{}", config::Config::config_path().display());
                return Ok(());
            }
            "-d" | "--dir" => {
                let config = config::Config::load();
                println!("{}", config.notes_path().display());
                return Ok(());
            }
            "-l" | "--log" => {
                println!("{}", logging::log_path().display());
                return Ok(());
            }
            "--reset" => {
                reset_config();
                return Ok(());
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Run 'topicjump --help' for usage information");
                return Ok(());
            }
            path_arg => match resolve_path(path_arg) {
                Some(path) => {
                    if !path.exists() {
                        eprintln!("Path does not exist: {}", path.display());
                        return Ok(());
                    }
                    initial_path = Some(path);
                }
                None => {
                    eprintln!("Invalid path: {}", path_arg);
                    return Ok(());
                }
            },
        }
    }

    logging::init();
    tracing::info!(version = VERSION, "starting");

    // Create app state before taking over the terminal so load errors stay readable
    let mut app = App::new_with_path(initial_path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "terminal loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}
