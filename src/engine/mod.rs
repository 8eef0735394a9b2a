pub mod renderer;
pub mod runner;
pub mod simulate;

pub use runner::TableEngine;
pub use simulate::simulate;
