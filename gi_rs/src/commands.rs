//! Command sets and the prefix resolver.
//!
//! A [`CommandSet`] is kept sorted, so every member sharing a prefix sits in
//! one contiguous run starting at the prefix itself. Prefix lookups walk that
//! run and stop at the first non-match, the same access pattern a trie gives.
//!
//! # Dash policy
//!
//! With the dash policy on, names whose remainder after the typed prefix
//! contains a dash lose to names whose remainder does not:
//!
//! - `comm` resolves to `commit`, not `commit-tree`
//! - `commit-t` resolves to `commit-tree`
//! - `upda` still lists `update-index`, `update-ref` and `update-server-info`,
//!   because no dash-free name is left to prefer

use std::collections::BTreeSet;
use std::ops::Bound;

/// Immutable, de-duplicated set of command and alias names for one scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandSet {
    names: BTreeSet<String>,
}

impl CommandSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Members starting with `prefix`, in sorted order.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.names
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(String::as_str)
            .take_while(move |name| name.starts_with(prefix))
    }

    /// Merge another set into this one (commands + aliases).
    pub fn union(mut self, other: CommandSet) -> Self {
        self.names.extend(other.names);
        self
    }
}

impl<S: Into<String>> FromIterator<S> for CommandSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Result of resolving one query against one scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// What the user typed.
    pub query: String,
    /// Matching names; empty means unknown, more than one means ambiguous.
    pub candidates: Vec<String>,
}

impl ResolutionOutcome {
    pub fn is_unknown(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }

    /// The single matching name, if the query resolved.
    pub fn resolved(&self) -> Option<&str> {
        match self.candidates.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }
}

/// Resolve `prefix` against `set`.
///
/// An exact member always wins, even when longer members share the prefix.
pub fn resolve(prefix: &str, set: &CommandSet, process_dashes: bool) -> ResolutionOutcome {
    let candidates = if set.contains(prefix) {
        vec![prefix.to_string()]
    } else {
        let with_prefix: Vec<&str> = set.with_prefix(prefix).collect();
        let chosen = if process_dashes {
            let without_dash: Vec<&str> = with_prefix
                .iter()
                .copied()
                .filter(|name| !name[prefix.len()..].contains('-'))
                .collect();
            if without_dash.is_empty() {
                with_prefix
            } else {
                without_dash
            }
        } else {
            with_prefix
        };
        chosen.into_iter().map(str::to_string).collect()
    };

    ResolutionOutcome {
        query: prefix.to_string(),
        candidates,
    }
}

/// One nesting level of resolution: top-level commands, or the sub-commands
/// of one resolved command.
#[derive(Clone, Debug)]
pub struct ResolutionScope {
    pub commands: CommandSet,
    pub process_dashes: bool,
}

impl ResolutionScope {
    pub fn new(commands: CommandSet, process_dashes: bool) -> Self {
        Self {
            commands,
            process_dashes,
        }
    }

    pub fn resolve(&self, prefix: &str) -> ResolutionOutcome {
        resolve(prefix, &self.commands, self.process_dashes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> CommandSet {
        CommandSet::new(names.iter().copied())
    }

    fn candidates(prefix: &str, names: &[&str], process_dashes: bool) -> Vec<String> {
        resolve(prefix, &set(names), process_dashes).candidates
    }

    #[test]
    fn exact_match_wins_over_longer_names() {
        let names = ["commit", "commit-tree", "commit-graph"];
        assert_eq!(candidates("commit", &names, true), vec!["commit"]);
        assert_eq!(candidates("commit", &names, false), vec!["commit"]);
    }

    #[test]
    fn exact_match_of_dashed_name() {
        let names = ["update-ref", "update-ref-extra"];
        assert_eq!(candidates("update-ref", &names, false), vec!["update-ref"]);
    }

    #[test]
    fn dash_policy_prefers_dash_free_remainder() {
        assert_eq!(
            candidates("comm", &["commit", "commit-tree"], true),
            vec!["commit"]
        );
    }

    #[test]
    fn longer_prefix_reaches_dashed_name() {
        assert_eq!(
            candidates("commit-t", &["commit", "commit-tree"], true),
            vec!["commit-tree"]
        );
    }

    #[test]
    fn dash_policy_falls_back_to_all_matches() {
        assert_eq!(
            candidates(
                "upda",
                &["update-index", "update-ref", "update-server-info"],
                true
            ),
            vec!["update-index", "update-ref", "update-server-info"]
        );
    }

    #[test]
    fn disabled_dash_policy_returns_every_match() {
        assert_eq!(
            candidates("comm", &["commit", "commit-tree"], false),
            vec!["commit", "commit-tree"]
        );
    }

    #[test]
    fn dash_inside_prefix_does_not_count() {
        // The dash before the cursor is already typed; only the remainder matters.
        assert_eq!(
            candidates("update-", &["update-index", "update-ref"], true),
            vec!["update-index", "update-ref"]
        );
    }

    #[test]
    fn unknown_prefix_is_empty() {
        let outcome = resolve("zzz", &set(&["commit", "status"]), true);
        assert!(outcome.is_unknown());
        assert!(!outcome.is_ambiguous());
        assert_eq!(outcome.resolved(), None);
        assert!(resolve("zzz", &CommandSet::default(), false).is_unknown());
    }

    #[test]
    fn prefix_walk_stops_at_first_mismatch() {
        let names = set(&["add", "am", "bisect", "blame", "branch"]);
        let found: Vec<&str> = names.with_prefix("b").collect();
        assert_eq!(found, vec!["bisect", "blame", "branch"]);
        assert_eq!(names.with_prefix("c").count(), 0);
    }

    #[test]
    fn duplicates_collapse() {
        let names = CommandSet::new(["st", "status", "st"]);
        assert_eq!(names.len(), 2);
        let outcome = resolve("s", &names.union(set(&["status"])), true);
        assert_eq!(outcome.candidates, vec!["st", "status"]);
        assert!(outcome.is_ambiguous());
    }

    #[test]
    fn every_member_resolves_to_itself() {
        let names = set(&["co", "commit", "commit-tree", "config", "count-objects"]);
        for name in names.iter() {
            for dashes in [true, false] {
                assert_eq!(resolve(name, &names, dashes).resolved(), Some(name));
            }
        }
    }

    #[test]
    fn scope_carries_its_policy() {
        let scope = ResolutionScope::new(set(&["commit", "commit-tree"]), false);
        let outcome = scope.resolve("comm");
        assert_eq!(outcome.query, "comm");
        assert!(outcome.is_ambiguous());
    }
}
