use crossword_core::{Assignment, Crossword, Position, SolverAdapter};

/// Character printed for cells that are not part of the puzzle
pub const BLOCK_CHAR: char = '#';
/// Character printed for open cells without a letter
pub const BLANK_CHAR: char = ' ';

/// Printable grid for a (possibly partial) assignment, one line per row
pub fn format_assignment(
    adapter: &dyn SolverAdapter,
    crossword: &Crossword,
    assignment: &Assignment,
) -> String {
    let letters = adapter.render_letters(crossword, assignment);
    format_letters(crossword, &letters)
}

/// Printable grid from a per-cell letter source.
///
/// Missing rows or columns in `letters` read as blank cells.
pub fn format_letters(crossword: &Crossword, letters: &[Vec<Option<char>>]) -> String {
    (0..crossword.height())
        .map(|i| {
            (0..crossword.width())
                .map(|j| {
                    if !crossword.is_open(Position::new(i, j)) {
                        BLOCK_CHAR
                    } else {
                        letters
                            .get(i)
                            .and_then(|row| row.get(j))
                            .copied()
                            .flatten()
                            .unwrap_or(BLANK_CHAR)
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossword_core::{CrosswordSolver, Direction, Variable};

    const STRUCTURE: &str = "#___#\n#_##_\n#_##_\n#_##_\n#____\n";
    const WORDS: &str = "one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten\n";

    fn sample() -> Crossword {
        Crossword::parse(STRUCTURE, WORDS).unwrap()
    }

    #[test]
    fn test_empty_assignment_shape() {
        let crossword = sample();
        let text = format_assignment(&CrosswordSolver, &crossword, &Assignment::new());
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines.len(), crossword.height());
        for line in &lines {
            assert_eq!(line.chars().count(), crossword.width());
        }
        assert_eq!(lines[0], "#   #");
        assert_eq!(lines[1], "# ## ");
    }

    #[test]
    fn test_blocked_cells_ignore_letters() {
        let crossword = sample();
        // A letter source that claims a letter everywhere
        let letters = vec![vec![Some('Z'); 5]; 5];
        let text = format_letters(&crossword, &letters);

        for (i, line) in text.lines().enumerate() {
            for (j, c) in line.chars().enumerate() {
                if crossword.is_open(Position::new(i, j)) {
                    assert_eq!(c, 'Z');
                } else {
                    assert_eq!(c, BLOCK_CHAR);
                }
            }
        }
    }

    #[test]
    fn test_partial_assignment() {
        let crossword = sample();
        let assignment: Assignment = [(
            Variable::new(Position::new(0, 1), Direction::Across, 3),
            "SIX".to_string(),
        )]
        .into_iter()
        .collect();

        let text = format_assignment(&CrosswordSolver, &crossword, &assignment);
        assert_eq!(text, "#SIX#\n# ## \n# ## \n# ## \n#    ");
    }

    #[test]
    fn test_short_letter_source() {
        let crossword = sample();
        let text = format_letters(&crossword, &[]);
        assert_eq!(text, format_assignment(&CrosswordSolver, &crossword, &Assignment::new()));
    }

    #[test]
    fn test_deterministic_and_pure() {
        let crossword = sample();
        let assignment = CrosswordSolver.solve(&crossword).unwrap();
        let before = assignment.clone();

        let first = format_assignment(&CrosswordSolver, &crossword, &assignment);
        let second = format_assignment(&CrosswordSolver, &crossword, &assignment);

        assert_eq!(first, second);
        assert_eq!(assignment, before);
        assert_eq!(first, "#SIX#\n#E##F\n#V##I\n#E##V\n#NINE");
    }

    #[test]
    fn test_various_dimensions() {
        for (h, w) in [(1, 1), (2, 7), (6, 3)] {
            let structure = (0..h)
                .map(|i| {
                    (0..w)
                        .map(|j| if (i + j) % 3 == 0 { '#' } else { '_' })
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join("\n");
            let crossword = Crossword::parse(&structure, "").unwrap();
            let text = format_assignment(&CrosswordSolver, &crossword, &Assignment::new());

            let lines: Vec<&str> = text.split('\n').collect();
            assert_eq!(lines.len(), h);
            assert!(lines.iter().all(|l| l.chars().count() == w));
        }
    }
}
