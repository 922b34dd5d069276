//! Suggestions for misspelled names in queries.
//!
//! Relation names in a wordnet are long and easy to mistype
//! (`HAS_HYPERONYM` vs `HAS_HYPERNYM`), so unknown names get a
//! "did you mean" hint built from the names the loaded graph actually has.

/// Edit distance (insertions, deletions, substitutions) between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            let substitution = diagonal + usize::from(ca != cb);
            row[j + 1] = substitution.min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }
    row[b_chars.len()]
}

/// Finds the candidate closest to `query`, ignoring case.
///
/// Returns `None` when nothing is close enough: one edit is tolerated for
/// names up to 3 characters, two up to 5, three beyond that.
///
/// # Examples
///
/// ```
/// use lexnet_common::utils::strings::find_similar;
///
/// let relations = ["HAS_HYPERONYM", "HAS_HYPONYM", "ROLE_AGENT"];
/// assert_eq!(find_similar("has_hypernym", &relations), Some("HAS_HYPERONYM"));
/// assert_eq!(find_similar("XYZ", &relations), None);
/// ```
pub fn find_similar<'a, S: AsRef<str>>(query: &str, candidates: &'a [S]) -> Option<&'a str> {
    let query_upper = query.to_uppercase();

    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let name = candidate.as_ref();
        let distance = edit_distance(&query_upper, &name.to_uppercase());
        if distance == 0 {
            return Some(name);
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((name, distance));
        }
    }

    let tolerance = match query.chars().count() {
        0..=3 => 1,
        4..=5 => 2,
        _ => 3,
    };
    best.filter(|&(_, d)| d <= tolerance).map(|(name, _)| name)
}

/// Formats a suggestion hint for error messages.
///
/// ```
/// use lexnet_common::utils::strings::format_suggestion;
///
/// assert_eq!(format_suggestion("SYNONYM"), "Did you mean 'SYNONYM'?");
/// ```
pub fn format_suggestion(suggestion: &str) -> String {
    format!("Did you mean '{suggestion}'?")
}
