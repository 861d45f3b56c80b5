use crate::assignment::Assignment;
use crate::error::PuzzleError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

/// Character marking an open cell in a structure file
pub const OPEN_CELL: char = '_';

/// Grid coordinate (row, column), both zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Orientation of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Across,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A run of open cells that must hold one word
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub start: Position,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(start: Position, direction: Direction, length: usize) -> Self {
        Self {
            start,
            direction,
            length,
        }
    }

    /// Position of the `k`th letter of this variable
    pub fn cell(&self, k: usize) -> Position {
        match self.direction {
            Direction::Across => Position::new(self.start.row, self.start.col + k),
            Direction::Down => Position::new(self.start.row + k, self.start.col),
        }
    }

    /// All cells covered by this variable, in reading order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.length).map(move |k| self.cell(k))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} : {}",
            self.start.row, self.start.col, self.direction, self.length
        )
    }
}

/// Shared cell of two variables, as a letter index into each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub first: usize,
    pub second: usize,
}

/// Parsed puzzle: grid shape, vocabulary and derived variables
#[derive(Debug, Clone)]
pub struct Crossword {
    height: usize,
    width: usize,
    structure: Vec<Vec<bool>>,
    words: BTreeSet<String>,
    variables: Vec<Variable>,
    overlaps: HashMap<(usize, usize), Overlap>,
    neighbors: Vec<Vec<usize>>,
}

impl Crossword {
    /// Load a puzzle from a structure file and a words file
    pub fn from_files(
        structure_path: impl AsRef<Path>,
        words_path: impl AsRef<Path>,
    ) -> Result<Self, PuzzleError> {
        let structure_path = structure_path.as_ref();
        let words_path = words_path.as_ref();

        let structure = read_input(structure_path)?;
        let words = read_input(words_path)?;

        Self::parse(&structure, &words).map_err(|reason| PuzzleError::Malformed {
            path: structure_path.to_path_buf(),
            reason,
        })
    }

    /// Build a puzzle from in-memory structure and word list text
    pub fn parse(structure: &str, words: &str) -> Result<Self, String> {
        let lines: Vec<Vec<char>> = structure.lines().map(|l| l.chars().collect()).collect();
        if lines.is_empty() {
            return Err("structure is empty".to_string());
        }

        let height = lines.len();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return Err("structure has no columns".to_string());
        }

        let structure: Vec<Vec<bool>> = lines
            .iter()
            .map(|line| {
                (0..width)
                    .map(|j| line.get(j) == Some(&OPEN_CELL))
                    .collect()
            })
            .collect();

        let words = words
            .lines()
            .map(|w| w.trim().to_uppercase())
            .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();

        let variables = find_variables(&structure, height, width);
        let overlaps = find_overlaps(&variables);

        let mut neighbors = vec![Vec::new(); variables.len()];
        for &(a, b) in overlaps.keys() {
            neighbors[a].push(b);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Ok(Self {
            height,
            width,
            structure,
            words,
            variables,
            overlaps,
            neighbors,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell belongs to the puzzle (false for blocked cells and
    /// anything outside the grid)
    pub fn is_open(&self, pos: Position) -> bool {
        self.structure
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .copied()
            .unwrap_or(false)
    }

    /// Vocabulary, upper-cased and de-duplicated
    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Shared cell of the variables at indices `a` and `b`, if any
    pub fn overlap(&self, a: usize, b: usize) -> Option<Overlap> {
        self.overlaps.get(&(a, b)).copied()
    }

    /// Indices of variables crossing the variable at index `var`
    pub fn neighbors(&self, var: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.get(var).into_iter().flatten().copied()
    }

    /// Letter at every cell, `None` where no assigned word covers the cell
    pub fn letter_grid(&self, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
        let mut letters = vec![vec![None; self.width]; self.height];
        for (variable, word) in assignment.iter() {
            for (pos, letter) in variable.cells().zip(word.chars()) {
                if let Some(cell) = letters.get_mut(pos.row).and_then(|r| r.get_mut(pos.col)) {
                    *cell = Some(letter);
                }
            }
        }
        letters
    }
}

fn read_input(path: &Path) -> Result<String, PuzzleError> {
    fs::read_to_string(path).map_err(|source| PuzzleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn find_variables(structure: &[Vec<bool>], height: usize, width: usize) -> Vec<Variable> {
    let open = |i: usize, j: usize| i < height && j < width && structure[i][j];
    let mut variables = Vec::new();

    for i in 0..height {
        for j in 0..width {
            if !open(i, j) {
                continue;
            }

            if i == 0 || !open(i - 1, j) {
                let length = (i..height).take_while(|&k| open(k, j)).count();
                if length > 1 {
                    variables.push(Variable::new(Position::new(i, j), Direction::Down, length));
                }
            }

            if j == 0 || !open(i, j - 1) {
                let length = (j..width).take_while(|&k| open(i, k)).count();
                if length > 1 {
                    variables.push(Variable::new(Position::new(i, j), Direction::Across, length));
                }
            }
        }
    }

    variables
}

fn find_overlaps(variables: &[Variable]) -> HashMap<(usize, usize), Overlap> {
    // Every cell maps to the (variable, letter index) pairs covering it
    let mut covering: HashMap<Position, Vec<(usize, usize)>> = HashMap::new();
    for (index, variable) in variables.iter().enumerate() {
        for (k, cell) in variable.cells().enumerate() {
            covering.entry(cell).or_default().push((index, k));
        }
    }

    let mut overlaps = HashMap::new();
    for users in covering.values() {
        for &(a, ka) in users {
            for &(b, kb) in users {
                if a != b {
                    overlaps
                        .entry((a, b))
                        .or_insert(Overlap { first: ka, second: kb });
                }
            }
        }
    }
    overlaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STRUCTURE: &str = "#___#\n#_##_\n#_##_\n#_##_\n#____\n";
    const WORDS: &str = "one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten\n";

    #[test]
    fn test_parse_dimensions() {
        let crossword = Crossword::parse(STRUCTURE, WORDS).unwrap();
        assert_eq!(crossword.height(), 5);
        assert_eq!(crossword.width(), 5);
        assert!(crossword.is_open(Position::new(0, 1)));
        assert!(!crossword.is_open(Position::new(0, 0)));
        assert!(!crossword.is_open(Position::new(9, 9)));
    }

    #[test]
    fn test_short_lines_are_blocked() {
        let crossword = Crossword::parse("___\n_\n", "").unwrap();
        assert_eq!(crossword.width(), 3);
        assert!(crossword.is_open(Position::new(1, 0)));
        assert!(!crossword.is_open(Position::new(1, 2)));
    }

    #[test]
    fn test_words_normalized() {
        let crossword = Crossword::parse(STRUCTURE, "cat\nCAT\n  dog \n\nx-ray\n").unwrap();
        let words: Vec<&str> = crossword.words().iter().map(String::as_str).collect();
        assert_eq!(words, vec!["CAT", "DOG"]);
    }

    #[test]
    fn test_variables_found() {
        let crossword = Crossword::parse(STRUCTURE, WORDS).unwrap();
        let vars = crossword.variables();
        assert_eq!(vars.len(), 4);
        assert!(vars.contains(&Variable::new(Position::new(0, 1), Direction::Across, 3)));
        assert!(vars.contains(&Variable::new(Position::new(0, 1), Direction::Down, 5)));
        assert!(vars.contains(&Variable::new(Position::new(1, 4), Direction::Down, 4)));
        assert!(vars.contains(&Variable::new(Position::new(4, 1), Direction::Across, 4)));
    }

    #[test]
    fn test_overlaps_symmetric() {
        let crossword = Crossword::parse(STRUCTURE, WORDS).unwrap();
        let vars = crossword.variables();
        let across = vars
            .iter()
            .position(|v| *v == Variable::new(Position::new(4, 1), Direction::Across, 4))
            .unwrap();
        let down = vars
            .iter()
            .position(|v| *v == Variable::new(Position::new(1, 4), Direction::Down, 4))
            .unwrap();

        assert_eq!(
            crossword.overlap(across, down),
            Some(Overlap { first: 3, second: 3 })
        );
        assert_eq!(
            crossword.overlap(down, across),
            Some(Overlap { first: 3, second: 3 })
        );
        assert_eq!(crossword.neighbors(down).collect::<Vec<_>>(), vec![across]);
    }

    #[test]
    fn test_open_grid_overlaps() {
        let n = 300;
        let structure = format!("{}\n", "_".repeat(n)).repeat(n);
        let crossword = Crossword::parse(&structure, "").unwrap();

        assert_eq!(crossword.variables().len(), 2 * n);
        for var in [0, n, 2 * n - 1] {
            assert_eq!(crossword.neighbors(var).count(), n);
        }

        let across = crossword
            .variables()
            .iter()
            .position(|v| *v == Variable::new(Position::new(7, 0), Direction::Across, n))
            .unwrap();
        let down = crossword
            .variables()
            .iter()
            .position(|v| *v == Variable::new(Position::new(0, 11), Direction::Down, n))
            .unwrap();
        assert_eq!(
            crossword.overlap(across, down),
            Some(Overlap { first: 11, second: 7 })
        );
        assert_eq!(crossword.neighbors(usize::MAX).count(), 0);
    }

    #[test]
    fn test_empty_structure_rejected() {
        assert!(Crossword::parse("", WORDS).is_err());
        assert!(Crossword::parse("\n\n", WORDS).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let words = dir.path().join("words.txt");
        std::fs::File::create(&words)
            .unwrap()
            .write_all(WORDS.as_bytes())
            .unwrap();

        let err = Crossword::from_files(&missing, &words).unwrap_err();
        assert!(matches!(err, PuzzleError::Io { .. }));
        assert_eq!(err.path(), &missing);
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn test_letter_grid() {
        let crossword = Crossword::parse(STRUCTURE, WORDS).unwrap();
        let mut assignment = Assignment::new();
        assignment.insert(
            Variable::new(Position::new(0, 1), Direction::Across, 3),
            "SIX".to_string(),
        );
        let grid = crossword.letter_grid(&assignment);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], vec![None, Some('S'), Some('I'), Some('X'), None]);
        assert_eq!(grid[4][1], None);
    }
}
