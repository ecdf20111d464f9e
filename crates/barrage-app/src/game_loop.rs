//! Game loop thread — runs the simulation engine at 60Hz and records it.
//!
//! The engine and recorder are created inside the thread because it's
//! cleaner for ownership. Commands arrive via `mpsc` channel. With no
//! frontend attached, input is synthesized: the player flies a slow
//! square patrol so every system sees motion.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use barrage_core::constants::{DT, FIELD_HEIGHT, FIELD_WIDTH, TICK_RATE};
use barrage_core::input::{InputState, Key};
use barrage_replay::recorder::{Recorder, RecorderConfig};
use barrage_replay::replay::{ReplayEngine, ReplayState};
use barrage_replay::ReplayError;
use barrage_sim::engine::{GamePhase, SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Ticks the synthesized input holds each patrol direction.
const PATROL_LEG_TICKS: u64 = 2 * TICK_RATE as u64;

/// Spawns the game loop in a new thread, recording into `recording_path`.
///
/// Returns the command sender and the thread handle. Dropping the sender
/// shuts the loop down the same way an explicit `Shutdown` does.
pub fn spawn_game_loop(
    recording_path: PathBuf,
) -> (mpsc::Sender<GameLoopCommand>, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("barrage-game-loop".into())
        .spawn(move || {
            run_game_loop(cmd_rx, recording_path);
        })
        .expect("Failed to spawn game loop thread");

    (cmd_tx, handle)
}

/// The game loop. Runs until game over, Shutdown, or channel disconnect.
fn run_game_loop(cmd_rx: mpsc::Receiver<GameLoopCommand>, recording_path: PathBuf) {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut recorder = Recorder::new(RecorderConfig::new(recording_path));
    if let Err(err) = recorder.start(FIELD_WIDTH, FIELD_HEIGHT) {
        tracing::warn!(error = %err, "recording unavailable, session runs unrecorded");
    }

    let mut input = InputState::default();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Shutdown) => {
                    recorder.stop();
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    recorder.stop();
                    return;
                }
            }
        }

        // 2. Advance one tick with synthesized input
        synthesize_input(&mut input, engine.time().tick);
        engine.tick(&input);
        input.end_frame();

        // 3. Drive the recorder on its own cadence
        if let Err(err) = recorder.sample(engine.world(), DT) {
            tracing::warn!(error = %err, "sample failed, recording stops");
            recorder.stop();
        }

        if engine.phase() == GamePhase::GameOver {
            recorder.stop();
            tracing::info!(ticks = engine.time().tick, "session over");
            return;
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Hold one direction key per patrol leg, cycling clockwise.
fn synthesize_input(input: &mut InputState, tick: u64) {
    for key in [Key::Up, Key::Down, Key::Left, Key::Right] {
        input.release(key);
    }
    let key = match (tick / PATROL_LEG_TICKS) % 4 {
        0 => Key::Right,
        1 => Key::Down,
        2 => Key::Left,
        _ => Key::Up,
    };
    input.press(key);
}

/// Play a recorded log back to completion at real-time pace, logging
/// progress along the way.
pub fn run_replay(path: &Path) -> Result<(), ReplayError> {
    let mut engine = ReplayEngine::new();
    if engine.load(path)? == 0 {
        tracing::warn!(path = %path.display(), "nothing to replay");
        return Ok(());
    }

    let mut last_decile = 0;
    while engine.state() != ReplayState::Finished {
        engine.tick(DT);

        let decile = (engine.progress() * 10.0) as u32;
        if decile > last_decile {
            last_decile = decile;
            tracing::info!(
                percent = decile * 10,
                clock = engine.clock(),
                entities = engine.current_entities().len(),
                "replay progress"
            );
        }

        std::thread::sleep(TICK_DURATION);
    }
    tracing::info!(path = %path.display(), "replay finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_replay::codec;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_synthesized_input_cycles_directions() {
        let mut input = InputState::default();

        synthesize_input(&mut input, 0);
        assert!(input.is_pressed(Key::Right));
        assert!(!input.is_pressed(Key::Down));

        synthesize_input(&mut input, PATROL_LEG_TICKS);
        assert!(input.is_pressed(Key::Down));
        assert!(!input.is_pressed(Key::Right), "previous leg released");

        synthesize_input(&mut input, 3 * PATROL_LEG_TICKS);
        assert!(input.is_pressed(Key::Up));
    }

    #[test]
    fn test_game_loop_records_and_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");

        let (tx, handle) = spawn_game_loop(path.clone());
        std::thread::sleep(Duration::from_millis(300));
        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let frames = codec::read_keyframes(&path).unwrap();
        assert!(!frames.is_empty());
        // Player + initial enemies + decorations; no bullet fired yet.
        assert_eq!(frames[0].entities.len(), 12);
        assert!(frames[0].all_uids());
    }

    #[test]
    fn test_replay_of_recorded_session_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");

        let (tx, handle) = spawn_game_loop(path.clone());
        std::thread::sleep(Duration::from_millis(250));
        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        run_replay(&path).unwrap();
    }
}
