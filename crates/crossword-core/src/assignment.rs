use crate::crossword::Variable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Words chosen for some or all variables of a puzzle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Entry>", into = "Vec<Entry>")]
pub struct Assignment {
    words: BTreeMap<Variable, String>,
}

/// Serialized form of one assignment entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub variable: Variable,
    pub word: String,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variable: Variable, word: String) -> Option<String> {
        self.words.insert(variable, word)
    }

    pub fn remove(&mut self, variable: &Variable) -> Option<String> {
        self.words.remove(variable)
    }

    pub fn get(&self, variable: &Variable) -> Option<&str> {
        self.words.get(variable).map(String::as_str)
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.words.contains_key(variable)
    }

    /// Whether `word` is already used by some variable
    pub fn uses_word(&self, word: &str) -> bool {
        self.words.values().any(|w| w == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &str)> {
        self.words.iter().map(|(v, w)| (v, w.as_str()))
    }
}

impl From<Vec<Entry>> for Assignment {
    fn from(entries: Vec<Entry>) -> Self {
        Self {
            words: entries.into_iter().map(|e| (e.variable, e.word)).collect(),
        }
    }
}

impl From<Assignment> for Vec<Entry> {
    fn from(assignment: Assignment) -> Self {
        assignment
            .words
            .into_iter()
            .map(|(variable, word)| Entry { variable, word })
            .collect()
    }
}

impl FromIterator<(Variable, String)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Variable, String)>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}
