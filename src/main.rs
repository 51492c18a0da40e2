//! mw - medium wave style folder player.
//!
//! Plays every audio file in a chosen folder through a fixed filter chain that
//! imitates an old medium wave receiver: mono, band limited, lightly crushed,
//! with a quiet heterodyne whistle and hard staccato crackle on top.
//!
//! Rendering is done by `ffmpeg` and playback by `ffplay`; both must be
//! installed. In an interactive terminal `n` skips to the next track and `q`
//! quits.

use clap::{CommandFactory, Parser, Subcommand, builder::PossibleValuesParser};
use clap_complete::{Generator, Shell, generate};
use medium_wave::config::CONFIG_KEYS;
use medium_wave::utils::console;
use std::error::Error;
use std::io;
use std::process::ExitCode;

mod cli;

#[derive(Parser)]
#[command(name = "mw")]
#[command(about = "Play a folder of audio files with a medium wave radio sound")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play every audio file in a folder through the medium wave filter
    Play {
        /// Folder with audio files (asks interactively when omitted)
        folder: Option<String>,
        /// Interval in milliseconds between skip/quit checks
        #[arg(long = "poll-ms")]
        poll_ms: Option<u64>,
        /// Write debug output to the log file
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the ffmpeg filter graph used for every track
    Filter {
        /// One filter chain per line
        #[arg(short, long)]
        pretty: bool,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// View current configuration
    View,
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_parser = PossibleValuesParser::new(CONFIG_KEYS.iter().copied()))]
        key: String,
        /// Configuration value
        value: String,
    },
    /// Edit configuration file in your editor
    Edit,
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let command = cli.command.unwrap_or(Commands::Play {
        folder: None,
        poll_ms: None,
        verbose: false,
    });

    match command {
        Commands::Play {
            folder,
            poll_ms,
            verbose,
        } => {
            cli::play::handle_play(folder.as_deref(), poll_ms, verbose)?;
        }
        Commands::Filter { pretty } => {
            cli::filter::handle_filter(pretty);
        }
        Commands::Config { action } => match action {
            ConfigAction::View => {
                cli::config::handle_config_view()?;
            }
            ConfigAction::Set { key, value } => {
                cli::config::handle_config_set(&key, &value)?;
            }
            ConfigAction::Edit => {
                cli::config::handle_config_edit()?;
            }
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            console::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
