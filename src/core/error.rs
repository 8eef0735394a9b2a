/// Errors surfaced by the turn core. None of these are fatal to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// No actor is acting: the round is over or was never started.
    #[error("no turn in progress")]
    NoActiveTurn,

    /// The acting actor's thinking delay has not finished.
    #[error("{name} is still thinking")]
    StillThinking { name: String },

    #[error("invalid think time: min {min_secs}s is greater than max {max_secs}s")]
    InvalidThinkTime { min_secs: u64, max_secs: u64 },

    #[error("invalid think time: max {max_secs}s exceeds the {limit_secs}s limit")]
    ThinkTimeTooLong { max_secs: u64, limit_secs: u64 },
}
