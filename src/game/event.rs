use std::time::Duration;

/// Notification emitted by the engine for the host to act on.
///
/// Events are queued in the order the engine produced them; hosts drain
/// them after every command or tick and must apply them in that order so
/// that a cancellation always lands before the re-arm that follows it.
/// `ScoreChanged` and `SpeedChanged` are informational: a host that reads
/// score and speed straight from `GameState` when drawing may ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Board contents changed and should be drawn again
    Redraw,
    /// New score after eating or a reset
    ScoreChanged(u32),
    /// Tick interval in milliseconds
    SpeedChanged(u64),
    /// Start ticking with this period, replacing any existing timer
    TimerArmed(Duration),
    /// Stop ticking
    TimerCancelled,
    /// A new game began running
    Started,
    /// Show the pause overlay
    Paused,
    /// Hide the pause overlay
    Resumed,
    /// Show the game-over overlay with the final score
    GameOver { score: u32 },
    /// Remove every overlay
    OverlaysCleared,
}
