//! Fuzzy string matching for misspelled creature names.
//!
//! Provides Levenshtein distance calculation and closest-name ranking
//! used to suggest corrections after a failed lookup.

/// Calculate the Levenshtein (edit) distance between two strings.
///
/// The edit distance is the minimum number of single-character edits
/// (insertions, deletions, or substitutions) required to transform
/// one string into another.
///
/// # Examples
///
/// ```
/// use pokedex::fuzzy::levenshtein_distance;
///
/// assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
/// assert_eq!(levenshtein_distance("", "abc"), 3);
/// assert_eq!(levenshtein_distance("abc", "abc"), 0);
/// ```
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let mut long: Vec<char> = a.chars().collect();
    let mut short: Vec<char> = b.chars().collect();

    // Keep the shorter string as the inner dimension so rows are O(min(m,n))
    if long.len() < short.len() {
        std::mem::swap(&mut long, &mut short);
    }

    let n = short.len();
    if n == 0 {
        return long.len();
    }

    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row: Vec<usize> = vec![0; n + 1];

    for (i, long_char) in long.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, short_char) in short.iter().enumerate() {
            let cost = usize::from(long_char != short_char);

            curr_row[j + 1] = (prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1) // insertion
                .min(prev_row[j] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// A suggestion with its edit distance from the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The suggested string
    pub value: String,
    /// Edit distance from the original query
    pub distance: usize,
}

impl Suggestion {
    pub fn new(value: String, distance: usize) -> Self {
        Self { value, distance }
    }
}

/// Rank every candidate by edit distance from `query`, closest first.
///
/// Unlike a thresholded search, every candidate is considered; ties keep
/// the candidates' iteration order (stable sort). At most `limit` are returned.
///
/// # Examples
///
/// ```
/// use pokedex::fuzzy::rank_similar;
///
/// let names = ["bulbasaur", "charmander", "squirtle"];
/// let ranked = rank_similar("bulbasaurr", names.iter().copied(), 3);
///
/// assert_eq!(ranked[0].value, "bulbasaur");
/// assert_eq!(ranked[0].distance, 1);
/// ```
#[must_use]
pub fn rank_similar<'a, I>(query: &str, candidates: I, limit: usize) -> Vec<Suggestion>
where
    I: Iterator<Item = &'a str>,
{
    let mut ranked: Vec<Suggestion> = candidates
        .map(|candidate| {
            Suggestion::new(
                candidate.to_string(),
                levenshtein_distance(query, candidate),
            )
        })
        .collect();

    ranked.sort_by_key(|s| s.distance);
    ranked.truncate(limit);
    ranked
}

/// Default number of suggestions offered after a failed lookup.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;
