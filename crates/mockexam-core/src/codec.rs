//! Letter-coded answer codec.
//!
//! Converts free-form user input such as `"A"`, `"A,C"`, `"a; c"` or `"AC"`
//! into zero-based option indexes, and renders index sets back as `"A,C"`.

use std::fmt;

use crate::error::InvalidAnswer;

/// An order-preserving set of zero-based option indexes.
///
/// Iteration yields indexes in order of first insertion; equality ignores
/// order, so `{0, 2}` equals `{2, 0}`.
#[derive(Debug, Clone, Default, Eq)]
pub struct AnswerSet {
    indexes: Vec<usize>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an index. Returns `false` if it was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        if self.indexes.contains(&index) {
            return false;
        }
        self.indexes.push(index);
        true
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indexes.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indexes.iter().copied()
    }

    /// Largest index in the set, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.indexes.iter().copied().max()
    }
}

impl PartialEq for AnswerSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|i| other.contains(i))
    }
}

impl Extend<usize> for AnswerSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for index in iter {
            self.insert(index);
        }
    }
}

impl FromIterator<usize> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        set.extend(iter);
        set
    }
}

impl fmt::Display for AnswerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_answer(self))
    }
}

/// Parse letter-coded input into an [`AnswerSet`].
///
/// Input is trimmed, ASCII-uppercased and stripped of all whitespace, and `;`
/// counts as `,`. With a comma present the input is split on commas and each
/// token is read by its first character only, so `"AB,C"` yields `{A, C}`.
/// Without a comma every character is its own token, so `"AC"` yields `{A, C}`.
pub fn parse_answer(input: &str, option_count: usize) -> Result<AnswerSet, InvalidAnswer> {
    if option_count == 0 {
        return Err(InvalidAnswer::NoOptions);
    }

    let normalized: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ';' { ',' } else { c.to_ascii_uppercase() })
        .collect();

    if normalized.is_empty() {
        return Err(InvalidAnswer::Empty);
    }

    let tokens: Vec<char> = if normalized.contains(',') {
        normalized
            .split(',')
            .filter_map(|token| token.chars().next())
            .collect()
    } else {
        normalized.chars().collect()
    };

    let mut answers = AnswerSet::new();
    for c in tokens {
        let index = letter_index(c)
            .filter(|&i| i < option_count.min(MAX_OPTIONS))
            .ok_or(InvalidAnswer::OutOfRange(c))?;
        answers.insert(index);
    }

    if answers.is_empty() {
        return Err(InvalidAnswer::NoValidAnswer);
    }
    Ok(answers)
}

/// Options a question may have: one per letter `A..=Z`.
pub const MAX_OPTIONS: usize = 26;

/// Render an index set as comma-separated letters in iteration order.
///
/// Indexes must be below [`MAX_OPTIONS`]; past `Z` the letters would not
/// parse back to the same set.
pub fn format_answer(indexes: &AnswerSet) -> String {
    indexes
        .iter()
        .map(|i| index_letter(i).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Letter shown for an option index (`0` → `'A'`).
pub fn index_letter(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| char::from_u32(u32::from(b'A') + i))
        .unwrap_or('?')
}

fn letter_index(c: char) -> Option<usize> {
    let code = u32::from(c);
    let base = u32::from(b'A');
    code.checked_sub(base).map(|i| i as usize)
}
