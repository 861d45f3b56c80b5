//! Crossword puzzle engine.
//!
//! Parses structure and word lists into a [`Crossword`], solves it through the
//! [`SolverAdapter`] contract and renders or exports the resulting
//! [`Assignment`].

mod assignment;
mod crossword;
mod error;
mod export;
mod solver;

pub use assignment::Assignment;
pub use crossword::{Crossword, Direction, Overlap, Position, Variable};
pub use error::{ExportError, PuzzleError};
pub use export::{save_image, ExportStyle};
pub use solver::{CrosswordSolver, SolverAdapter};
