use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;
use wordgrep::cli::{CliInterface, parse_cli};
use wordgrep::logging::{default_log_path, init_logging};
use wordgrep::tui::TuiInterface;
use wordgrep::{GameInterface, game_loop, resolve_wordbank};

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Some(path) = cli.log_file.clone().or_else(default_log_path)
        && let Err(e) = init_logging(&path)
    {
        eprintln!("Logging disabled, cannot open '{}': {e}", path.display());
    }

    let words = match resolve_wordbank(cli.wordbank_path.as_deref()) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("Failed to load word list: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut interface: Box<dyn GameInterface> = if cli.plain {
        Box::new(CliInterface::new(io::stdin().lock(), io::stdout()))
    } else {
        match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                eprintln!("Try again with --plain.");
                return ExitCode::FAILURE;
            }
        }
    };

    let result = game_loop(&words, interface.as_mut(), &mut rng);
    // Restore the terminal before printing anything
    drop(interface);

    match result {
        Ok(stats) => {
            log::info!("Session ended: {} won, {} lost", stats.won, stats.lost);
            if stats.played() > 0 {
                println!("Games won: {}/{}", stats.won, stats.played());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Session aborted: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
