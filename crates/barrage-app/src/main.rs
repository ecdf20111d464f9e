use std::path::Path;
use std::process::ExitCode;

use barrage_app::game_loop;
use barrage_core::constants::RECORDINGS_DIR;
use barrage_replay::storage;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => run_session(),
        Some("replay") => match args.next() {
            Some(path) => run_replay(Path::new(&path)),
            None => {
                // Without an explicit log, replay the most recent session.
                let dir = Path::new(RECORDINGS_DIR);
                match storage::list_recordings(dir).pop() {
                    Some(path) => run_replay(&path),
                    None => {
                        eprintln!("no recordings under {}", dir.display());
                        ExitCode::FAILURE
                    }
                }
            }
        },
        Some(other) => {
            eprintln!("unknown argument {other:?}; usage: barrage-app [replay [LOG]]");
            ExitCode::FAILURE
        }
    }
}

/// Run a live session until game over, recording into a fresh log.
fn run_session() -> ExitCode {
    let path = storage::session_path(Path::new(RECORDINGS_DIR));
    tracing::info!(path = %path.display(), "starting session");

    let (_commands, handle) = game_loop::spawn_game_loop(path);
    if handle.join().is_err() {
        tracing::error!("game loop thread panicked");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_replay(path: &Path) -> ExitCode {
    match game_loop::run_replay(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "replay failed");
            ExitCode::FAILURE
        }
    }
}
