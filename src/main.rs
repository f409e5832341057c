use std::io;
use std::process::ExitCode;
use wordle_heart::cli::{CliInterface, parse_cli, run_plain};
use wordle_heart::tui::{TuiInterface, run_tui};
use wordle_heart::{PuzzleSession, SystemClock, logging};

fn main() -> ExitCode {
    let cli = parse_cli();

    let config = match cli.puzzle_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(cli.log_file.clone()) {
        eprintln!("Logging disabled: {e}");
    }
    log::info!(
        "Starting puzzle ({} mode, speed {})",
        if cli.plain { "plain" } else { "tui" },
        cli.speed
    );

    let mut session = PuzzleSession::new(config, SystemClock::new());

    let result = if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(io::stdout());
        run_plain(&mut session, stdin.lock(), &mut interface).map(|()| interface.navigated())
    } else {
        TuiInterface::new().and_then(|mut interface| run_tui(&mut session, &mut interface))
    };

    match result {
        Ok(true) => {
            if !cli.plain {
                println!("💜");
            }
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("Exiting.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Puzzle aborted: {e}");
            eprintln!("Puzzle aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
