//! Solver adapter contract and the default backtracking solver.

use crate::assignment::Assignment;
use crate::crossword::Crossword;
use crate::error::{ExportError, PuzzleError};
use crate::export::{save_image, ExportStyle};
use log::debug;
use std::path::Path;

/// Operations a front-end needs from a crossword solver.
///
/// Implementations are shared with worker threads, so they must be
/// `Send + Sync`. Every method except [`SolverAdapter::solve`] has a default
/// built on [`Crossword`] itself.
pub trait SolverAdapter: Send + Sync {
    /// Parse the two input files into a puzzle model
    fn construct(&self, structure: &Path, words: &Path) -> Result<Crossword, PuzzleError> {
        Crossword::from_files(structure, words)
    }

    /// Fill every variable, or `None` when no consistent fill exists.
    /// May run for a long time.
    fn solve(&self, crossword: &Crossword) -> Option<Assignment>;

    /// Per-cell letters for an assignment
    fn render_letters(
        &self,
        crossword: &Crossword,
        assignment: &Assignment,
    ) -> Vec<Vec<Option<char>>> {
        crossword.letter_grid(assignment)
    }

    /// Write the solved grid to an image file
    fn save(
        &self,
        crossword: &Crossword,
        assignment: &Assignment,
        path: &Path,
    ) -> Result<(), ExportError> {
        save_image(crossword, assignment, path, &ExportStyle::default())
    }
}

/// Backtracking solver with unary length filtering.
///
/// Variables are chosen by fewest candidates, ties broken by most crossings;
/// candidates are tried in lexicographic order, so results are deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosswordSolver;

impl CrosswordSolver {
    pub fn new() -> Self {
        Self
    }
}

impl SolverAdapter for CrosswordSolver {
    fn solve(&self, crossword: &Crossword) -> Option<Assignment> {
        let variables = crossword.variables();
        let domains: Vec<Vec<&str>> = variables
            .iter()
            .map(|var| {
                crossword
                    .words()
                    .iter()
                    .filter(|w| w.len() == var.length)
                    .map(String::as_str)
                    .collect()
            })
            .collect();

        if let Some(empty) = domains.iter().position(Vec::is_empty) {
            debug!("no word fits {}", variables[empty]);
            return None;
        }

        let mut chosen: Vec<Option<&str>> = vec![None; variables.len()];
        if !backtrack(crossword, &domains, &mut chosen) {
            return None;
        }

        Some(
            variables
                .iter()
                .zip(chosen)
                .filter_map(|(var, word)| word.map(|w| (*var, w.to_string())))
                .collect(),
        )
    }
}

fn backtrack<'a>(
    crossword: &Crossword,
    domains: &[Vec<&'a str>],
    chosen: &mut [Option<&'a str>],
) -> bool {
    let Some(var) = select_unassigned(crossword, domains, chosen) else {
        return true;
    };

    for &word in &domains[var] {
        if is_consistent(crossword, chosen, var, word) {
            chosen[var] = Some(word);
            if backtrack(crossword, domains, chosen) {
                return true;
            }
            chosen[var] = None;
        }
    }

    false
}

fn select_unassigned(
    crossword: &Crossword,
    domains: &[Vec<&str>],
    chosen: &[Option<&str>],
) -> Option<usize> {
    (0..chosen.len())
        .filter(|&var| chosen[var].is_none())
        .min_by_key(|&var| {
            let degree = crossword.neighbors(var).count();
            (domains[var].len(), usize::MAX - degree)
        })
}

fn is_consistent(crossword: &Crossword, chosen: &[Option<&str>], var: usize, word: &str) -> bool {
    if chosen.iter().flatten().any(|&used| used == word) {
        return false;
    }

    crossword.neighbors(var).all(|other| {
        let (Some(other_word), Some(overlap)) = (chosen[other], crossword.overlap(var, other))
        else {
            return true;
        };
        word.as_bytes()[overlap.first] == other_word.as_bytes()[overlap.second]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_sample_puzzle() {
        let crossword = Crossword::parse(
            "#___#\n#_##_\n#_##_\n#_##_\n#____\n",
            "one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten\n",
        )
        .unwrap();

        let assignment = CrosswordSolver::new().solve(&crossword).unwrap();
        assert_eq!(assignment.len(), 4);

        let grid = crossword.letter_grid(&assignment);
        let rows: Vec<String> = grid
            .iter()
            .map(|row| row.iter().map(|c| c.unwrap_or(' ')).collect())
            .collect();
        assert_eq!(rows[0], " SIX ");
        assert_eq!(rows[4], " NINE");
    }

    #[test]
    fn test_words_are_distinct() {
        // Two crossing slots, only one word that can cross itself.
        let crossword = Crossword::parse("___\n_##\n_##\n", "AXA\n").unwrap();
        assert!(CrosswordSolver::new().solve(&crossword).is_none());

        let crossword = Crossword::parse("___\n_##\n_##\n", "AXA\nABC\n").unwrap();
        let assignment = CrosswordSolver::new().solve(&crossword).unwrap();
        assert_eq!(assignment.len(), 2);
    }

    #[test]
    fn test_no_word_long_enough() {
        let crossword = Crossword::parse("_____\n", "cat\ndog\n").unwrap();
        assert!(CrosswordSolver::new().solve(&crossword).is_none());
    }

    #[test]
    fn test_no_variables_is_trivially_solved() {
        let crossword = Crossword::parse("_#\n#_\n", "cat\n").unwrap();
        let assignment = CrosswordSolver::new().solve(&crossword).unwrap();
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let crossword = Crossword::parse("___\n___\n___\n", "bat\nore\nwed\nbow\nare\nted\n").unwrap();
        let solver = CrosswordSolver::new();
        assert_eq!(solver.solve(&crossword), solver.solve(&crossword));
    }
}
