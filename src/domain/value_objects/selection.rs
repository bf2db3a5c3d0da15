//! Unit selection value object
//!
//! Parses operator input (`all`, 1-based menu numbers, or unit names) into
//! an ordered, duplicate-free list of unit names.

/// Outcome of parsing a selection against the available units
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitSelection {
    /// Selected unit names, in the order given
    pub units: Vec<String>,
    /// Tokens that did not match anything (reported as warnings)
    pub rejected: Vec<String>,
}

impl UnitSelection {
    /// Parse whitespace/comma separated tokens.
    ///
    /// `available` must be the sorted listing shown to the operator so that
    /// numbers line up with the menu.
    pub fn parse(input: &str, available: &[String]) -> Self {
        let tokens: Vec<&str> = input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();
        Self::from_tokens(&tokens, available)
    }

    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], available: &[String]) -> Self {
        let mut selection = Self::default();

        if tokens.len() == 1 && tokens[0].as_ref().eq_ignore_ascii_case("all") {
            selection.units = available.to_vec();
            return selection;
        }

        for token in tokens {
            let token = token.as_ref();
            let resolved = if let Some(name) = available.iter().find(|a| a.as_str() == token) {
                Some(name.clone())
            } else {
                token
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=available.len()).contains(n))
                    .map(|n| available[n - 1].clone())
            };

            match resolved {
                Some(name) if !selection.units.contains(&name) => selection.units.push(name),
                Some(_) => {}
                None => selection.rejected.push(token.to_string()),
            }
        }

        selection
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<String> {
        vec!["alpha".into(), "beta".into(), "gamma".into()]
    }

    #[test]
    fn all_selects_everything_in_listing_order() {
        let selection = UnitSelection::parse("ALL", &available());
        assert_eq!(selection.units, available());
        assert!(selection.rejected.is_empty());
    }

    #[test]
    fn numbers_and_names_mix() {
        let selection = UnitSelection::parse("3 alpha, 2", &available());
        assert_eq!(selection.units, vec!["gamma", "alpha", "beta"]);
    }

    #[test]
    fn out_of_range_and_unknown_tokens_are_rejected() {
        let selection = UnitSelection::parse("0 4 delta 1", &available());
        assert_eq!(selection.units, vec!["alpha"]);
        assert_eq!(selection.rejected, vec!["0", "4", "delta"]);
    }

    #[test]
    fn duplicates_collapse() {
        let selection = UnitSelection::parse("1 alpha 1", &available());
        assert_eq!(selection.units, vec!["alpha"]);
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert!(UnitSelection::parse("   ", &available()).is_empty());
    }
}
