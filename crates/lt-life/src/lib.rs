// Game of Life update kernel and board seeding for lifeterm.

pub mod automaton;
pub mod error;
pub mod pattern;
pub mod seed;

pub use automaton::Automaton;
pub use error::LifeError;
pub use seed::seed_board;
