//! Synonym groups and whole-text substitution.
//!
//! A specification lists groups separated by newlines or semicolons
//! (half-width `;` or full-width `；`). Terms inside a group are separated by
//! commas (`,` `，`), the enumeration comma `、` or whitespace. Every term in a
//! group is rewritten to one representative chosen by [`SynonymPolicy`].

use std::collections::BTreeMap;

use namematch_model::SynonymPolicy;
use tracing::trace;

use crate::normalize::fold_term;

const GROUP_SEPARATORS: [char; 3] = ['\n', ';', '；'];
const TERM_SEPARATORS: [char; 3] = [',', '，', '、'];

/// Immutable mapping from folded term to its representative.
///
/// Built once per comparison run and passed explicitly to every scoring call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    /// Sorted by key length (characters) descending, then key ascending.
    entries: Vec<(String, String)>,
}

impl SynonymTable {
    /// Parse a synonym specification.
    ///
    /// Groups with fewer than two distinct terms are skipped silently. When a
    /// term appears in several groups, the later group wins.
    pub fn parse(spec: &str, policy: SynonymPolicy) -> Self {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        let groups = trimmed
            .split(GROUP_SEPARATORS)
            .map(str::trim)
            .filter(|g| !g.is_empty());

        let mut mapping: BTreeMap<String, String> = BTreeMap::new();
        for group in groups {
            let terms = split_terms(group);
            if terms.len() < 2 {
                trace!(group, "skipping synonym group with fewer than two terms");
                continue;
            }
            let representative = pick_representative(&terms, policy).to_string();
            for term in terms {
                mapping.insert(term, representative.clone());
            }
        }

        Self::from_mapping(mapping)
    }

    /// Build a table from an explicit term-to-representative mapping.
    pub fn from_mapping(mapping: BTreeMap<String, String>) -> Self {
        let mut entries: Vec<(String, String)> = mapping
            .into_iter()
            .filter(|(key, _)| !key.is_empty())
            .collect();
        entries.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Representative for a term, if the term belongs to a group.
    pub fn representative(&self, term: &str) -> Option<&str> {
        let folded = fold_term(term);
        self.entries
            .iter()
            .find(|(key, _)| *key == folded)
            .map(|(_, rep)| rep.as_str())
    }

    /// Entries in application order (longest key first).
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every occurrence of every known term with its representative.
    ///
    /// Keys are applied longest first. Text produced by a replacement is never
    /// scanned again, so a representative that contains a shorter key stays
    /// intact.
    pub fn apply(&self, text: &str) -> String {
        if text.is_empty() || self.entries.is_empty() {
            return text.to_string();
        }

        let mut pieces = vec![Piece::Raw(text.to_string())];
        for (key, representative) in &self.entries {
            pieces = pieces
                .into_iter()
                .flat_map(|piece| piece.substitute(key, representative))
                .collect();
        }

        pieces.iter().map(Piece::as_str).collect()
    }
}

/// A span of text that is either still eligible for substitution or already
/// replaced.
enum Piece {
    Raw(String),
    Replaced(String),
}

impl Piece {
    fn as_str(&self) -> &str {
        match self {
            Self::Raw(s) | Self::Replaced(s) => s,
        }
    }

    fn substitute(self, key: &str, representative: &str) -> Vec<Piece> {
        let text = match self {
            Self::Raw(text) => text,
            replaced @ Self::Replaced(_) => return vec![replaced],
        };
        if !text.contains(key) {
            return vec![Self::Raw(text)];
        }
        let mut out = Vec::new();
        let mut rest = text.as_str();
        while let Some(pos) = rest.find(key) {
            if pos > 0 {
                out.push(Self::Raw(rest[..pos].to_string()));
            }
            out.push(Self::Replaced(representative.to_string()));
            rest = &rest[pos + key.len()..];
        }
        if !rest.is_empty() {
            out.push(Self::Raw(rest.to_string()));
        }
        out
    }
}

/// Split a group into folded, de-duplicated terms in listed order.
fn split_terms(group: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for raw in group.split(|ch: char| TERM_SEPARATORS.contains(&ch) || ch.is_whitespace()) {
        let term = fold_term(raw);
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

fn pick_representative(terms: &[String], policy: SynonymPolicy) -> &str {
    match policy {
        SynonymPolicy::FirstListed => &terms[0],
        SynonymPolicy::Shortest => {
            let mut best = &terms[0];
            for term in &terms[1..] {
                if term.chars().count() < best.chars().count() {
                    best = term;
                }
            }
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_yields_empty_table() {
        assert!(SynonymTable::parse("", SynonymPolicy::Shortest).is_empty());
        assert!(SynonymTable::parse("  \n ; ", SynonymPolicy::Shortest).is_empty());
    }

    #[test]
    fn single_term_groups_are_skipped() {
        let table = SynonymTable::parse("alpha\nbeta,beta\ngamma,delta", SynonymPolicy::Shortest);
        assert_eq!(table.len(), 2);
        assert_eq!(table.representative("gamma"), Some("gamma"));
        assert_eq!(table.representative("alpha"), None);
        assert_eq!(table.representative("beta"), None);
    }

    #[test]
    fn shortest_policy_picks_shortest_term() {
        let table = SynonymTable::parse("腾讯控股有限公司,腾讯", SynonymPolicy::Shortest);
        assert_eq!(table.representative("腾讯控股有限公司"), Some("腾讯"));
        assert_eq!(table.representative("腾讯"), Some("腾讯"));
    }

    #[test]
    fn shortest_policy_breaks_ties_by_listing_order() {
        let table = SynonymTable::parse("ibm，abc", SynonymPolicy::Shortest);
        assert_eq!(table.representative("abc"), Some("ibm"));
    }

    #[test]
    fn first_listed_policy_picks_first_term() {
        let table = SynonymTable::parse("腾讯控股有限公司,腾讯", SynonymPolicy::FirstListed);
        assert_eq!(table.representative("腾讯"), Some("腾讯控股有限公司"));
    }

    #[test]
    fn parses_mixed_separators() {
        let spec = "阿里巴巴集团,阿里\n腾讯控股有限公司，腾讯；百度在线网络技术公司 百度;IBM、International Business Machines";
        let table = SynonymTable::parse(spec, SynonymPolicy::FirstListed);
        assert_eq!(table.representative("阿里"), Some("阿里巴巴集团"));
        assert_eq!(table.representative("腾讯"), Some("腾讯控股有限公司"));
        assert_eq!(table.representative("百度"), Some("百度在线网络技术公司"));
        assert_eq!(table.representative("machines"), Some("ibm"));
    }

    #[test]
    fn terms_are_case_folded() {
        let table = SynonymTable::parse("Acme Corporation, ACME", SynonymPolicy::Shortest);
        assert_eq!(table.apply("acme corporation"), "acme acme");
        assert_eq!(table.representative("CORPORATION"), Some("acme"));
    }

    #[test]
    fn apply_substitutes_all_occurrences() {
        let table = SynonymTable::parse("co,company", SynonymPolicy::FirstListed);
        assert_eq!(table.apply("company and company"), "co and co");
    }

    #[test]
    fn apply_uses_longest_key_first() {
        let table = SynonymTable::parse("腾讯控股有限公司,腾讯", SynonymPolicy::FirstListed);
        assert_eq!(table.apply("腾讯"), "腾讯控股有限公司");
        assert_eq!(table.apply("腾讯控股有限公司"), "腾讯控股有限公司");
        assert_eq!(table.apply("腾讯控股有限公司深圳"), "腾讯控股有限公司深圳");
    }

    #[test]
    fn replacement_output_is_not_rescanned() {
        let mut mapping = BTreeMap::new();
        mapping.insert("ab".to_string(), "xy".to_string());
        mapping.insert("y".to_string(), "z".to_string());
        let table = SynonymTable::from_mapping(mapping);
        assert_eq!(table.apply("aby"), "xyz");
    }

    #[test]
    fn synonym_group_resolves_both_forms_to_same_text() {
        for policy in [SynonymPolicy::FirstListed, SynonymPolicy::Shortest] {
            let table = SynonymTable::parse("腾讯控股有限公司,腾讯", policy);
            assert_eq!(table.apply("腾讯"), table.apply("腾讯控股有限公司"));
        }
    }
}
