pub mod core {
	pub mod actor;
	pub mod error;
	pub mod thinking;
	pub mod turn;
}

pub mod cli;
pub mod config;
pub mod engine;

// Re-export for convenience
pub use crate::core::actor::{Actor, ActorKind};
pub use crate::core::error::TurnError;
pub use crate::core::thinking::{ThinkDriver, ThinkTime, ThinkingTask};
pub use crate::core::turn::{RoundState, TurnCoordinator, TurnEvent};
