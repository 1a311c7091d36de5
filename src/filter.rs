/// Compound textual filter applied to the rendered row.
///
/// Terms come from repeatable CLI word lists (split on space, comma and
/// semicolon) and are matched case-insensitively as substrings of the
/// comma-joined row text. Precedence is fixed: match-all beats include,
/// and exclude is an additional veto after either passes. Which branch
/// runs depends only on which term sets are configured, never on how many
/// arguments the invocation happened to carry.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    exclude: Vec<String>,
    include: Vec<String>,
    match_all: Vec<String>,
}

impl FilterSpec {
    pub fn new(exclude: &[String], include: &[String], match_all: &[String]) -> Self {
        FilterSpec {
            exclude: split_terms(exclude),
            include: split_terms(include),
            match_all: split_terms(match_all),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exclude.is_empty() && self.include.is_empty() && self.match_all.is_empty()
    }

    /// Decides whether a rendered row is emitted.
    pub fn passes(&self, row_text: &str) -> bool {
        if self.is_empty() {
            return true;
        }

        let haystack = row_text.to_lowercase();
        let excluded = self.exclude.iter().any(|term| haystack.contains(term));

        if !self.match_all.is_empty() {
            return self.match_all.iter().all(|term| haystack.contains(term)) && !excluded;
        }
        if !self.include.is_empty() {
            return self.include.iter().any(|term| haystack.contains(term)) && !excluded;
        }
        !excluded
    }
}

/// Splits raw option values into individual case-folded terms. Accepted
/// delimiters within one value: space, comma, semicolon.
fn split_terms(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|value| value.split([' ', ',', ';']))
        .filter(|term| !term.is_empty())
        .map(|term| term.to_lowercase())
        .collect()
}
