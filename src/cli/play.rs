use medium_wave::config::Config;
use medium_wave::constants::{MAX_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS};
use medium_wave::logging::{init_logging, level_from_name};
use medium_wave::picker::{FolderPicker, PromptPicker};
use medium_wave::playback::{PlaybackController, SessionSummary};
use medium_wave::signal::SignalCell;
use medium_wave::tools::Tools;
use medium_wave::tracks::{self, Track, supported_extensions_list};
use medium_wave::utils::console;
use medium_wave::utils::validation::validate_directory;
use owo_colors::OwoColorize;
use simplelog::LevelFilter;
use std::error::Error;
use std::path::{Path, PathBuf};

pub fn handle_play(
    folder: Option<&str>,
    poll_ms: Option<u64>,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    if let Some(ms) = poll_ms {
        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&ms) {
            return Err(format!(
                "--poll-ms must be between {MIN_POLL_INTERVAL_MS} and {MAX_POLL_INTERVAL_MS}"
            )
            .into());
        }
        config.poll_interval_ms = ms;
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        level_from_name(&config.log_level)
    };
    let log_file = init_logging(level);

    println!(
        "{} {}",
        "📻".cyan(),
        "mw - medium wave style player with whistle and crackle".bold()
    );
    match log_file {
        Ok(path) => {
            log::info!("Starting medium wave player");
            println!("{} {}", "Log:".bright_black(), path.display());
        }
        Err(e) => console::warn(&format!("{e}; continuing without a log file")),
    }
    println!();

    let tools = match Tools::locate(&config) {
        Ok(tools) => tools,
        Err(e) => {
            print_install_hint();
            return Err(e.into());
        }
    };

    let Some(folder) = choose_folder(folder)? else {
        println!("No folder selected. Exiting.");
        return Ok(());
    };

    if let Err(e) = validate_directory(&folder) {
        println!("{e}");
        return Ok(());
    }

    let tracks = tracks::enumerate(&folder)?;
    if tracks.is_empty() {
        println!("No supported audio files found in the selected folder.");
        println!("Supported extensions: {}", supported_extensions_list().cyan());
        return Ok(());
    }

    print_track_list(&folder, &tracks);

    let signal = SignalCell::new();
    let watcher = start_keyboard_control(&config, &signal);

    let mut controller = PlaybackController::new(tools, signal, config.poll_interval());
    let result = controller.run(&tracks);

    // Leave raw mode before the final report
    drop(watcher);

    let summary = result?;
    print_summary(&summary);
    log::info!("Session finished: {summary:?}");

    Ok(())
}

fn choose_folder(folder: Option<&str>) -> Result<Option<PathBuf>, Box<dyn Error>> {
    match folder {
        Some(folder) => Ok(Some(PathBuf::from(shellexpand::tilde(folder).as_ref()))),
        None => PromptPicker::default().pick(),
    }
}

fn print_install_hint() {
    eprintln!(
        "{} Install an ffmpeg build that includes ffplay and either put both tools",
        "Hint:".yellow()
    );
    eprintln!("      next to the mw executable or add them to PATH.");
    eprintln!(
        "      Explicit paths can be set with {}",
        "mw config set ffmpeg_path <path>".cyan()
    );
}

fn print_track_list(folder: &Path, tracks: &[Track]) {
    println!(
        "Found {} audio files in '{}':",
        tracks.len().to_string().cyan(),
        folder.display()
    );
    for track in tracks {
        println!("  - {} {}", track.name(), format!("({})", track.format()).bright_black());
    }
    println!();
    println!("Starting playback with medium wave style effect ...");
    println!();
}

#[cfg(feature = "keys")]
fn start_keyboard_control(
    config: &Config,
    signal: &SignalCell,
) -> Option<medium_wave::input::InputWatcher> {
    use medium_wave::input::{InputWatcher, KeyBindings};

    let bindings = KeyBindings::from_config(config);
    if !InputWatcher::is_supported() {
        print_reduced_mode();
        return None;
    }

    println!(
        "Keys: {} = next track, {} = quit",
        bindings.next.to_string().cyan().bold(),
        bindings.quit.to_string().cyan().bold()
    );
    println!();

    let watcher = InputWatcher::start(bindings, signal.clone());
    if watcher.is_none() {
        print_reduced_mode();
    }
    watcher
}

#[cfg(not(feature = "keys"))]
fn start_keyboard_control(_config: &Config, _signal: &SignalCell) -> Option<()> {
    println!(
        "{} This build has no keyboard control (the 'keys' feature is disabled).",
        "Note:".yellow()
    );
    println!("Playback ends after the last track. Ctrl+C stops the program.");
    println!();
    None
}

#[cfg(feature = "keys")]
fn print_reduced_mode() {
    println!(
        "{} Keyboard control is not available in this terminal.",
        "Note:".yellow()
    );
    println!("Playback ends after the last track. Ctrl+C stops the program.");
    println!();
}

fn print_summary(summary: &SessionSummary) {
    console::line("");
    if summary.quit {
        console::line(&format!("{} Playback stopped.", "■".yellow()));
    } else {
        console::line(&format!("{} All files processed.", "✓".green().bold()));
    }
    console::line(&format!(
        "  Played: {}  Skipped: {}  Failed: {}",
        summary.played, summary.skipped, summary.failed
    ));
}
