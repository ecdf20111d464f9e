//! Command protocol between the driver and the game loop thread.

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Shut down the game loop thread gracefully.
    Shutdown,
}
