use super::{CandidateKey, LookupCandidate};
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Insertion-ordered candidate set for one request.
///
/// Duplicates (same [`CandidateKey`]) are merged into the first occurrence.
#[derive(Debug, Default)]
pub(super) struct CandidateSet {
    items: IndexMap<CandidateKey, LookupCandidate>,
}

impl CandidateSet {
    pub(super) fn insert(&mut self, candidate: LookupCandidate) {
        match self.items.entry(candidate.key()) {
            Entry::Occupied(mut existing) => existing.get_mut().absorb(candidate),
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
    }

    pub(super) fn len(&self) -> usize {
        self.items.len()
    }

    pub(super) fn into_vec(self) -> Vec<LookupCandidate> {
        self.items.into_values().collect()
    }
}

impl Extend<LookupCandidate> for CandidateSet {
    fn extend<I: IntoIterator<Item = LookupCandidate>>(&mut self, iter: I) {
        for candidate in iter {
            self.insert(candidate);
        }
    }
}

impl FromIterator<LookupCandidate> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = LookupCandidate>>(iter: I) -> Self {
        let mut set = CandidateSet::default();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::CandidateSet;
    use crate::completion::{CandidateKind, LookupCandidate, TailPolicy};
    use semantic::{Substitution, SymbolId, Ty};

    fn method(
        qualifier: Option<&str>,
        aliases: &[&str],
        substitution: Option<Substitution>,
    ) -> LookupCandidate {
        LookupCandidate {
            kind: CandidateKind::Method {
                symbol: SymbolId(7),
                name: "size".to_string(),
                params: 0,
                qualifier: qualifier.map(str::to_string),
            },
            lookup: match qualifier {
                Some(qualifier) => format!("{qualifier}.size"),
                None => "size".to_string(),
            },
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
            substitution,
            tail: TailPolicy::None,
            custom_insert: None,
        }
    }

    #[test]
    fn duplicates_merge_into_first_occurrence() {
        let outer = Substitution::new().with("T", Ty::class("A"));
        let inner = Substitution::new().with("T", Ty::class("B"));

        let set: CandidateSet = [
            method(Some("items()"), &["size"], Some(outer)),
            method(None, &[], None),
            method(Some("items()"), &["length"], Some(inner.clone())),
        ]
        .into_iter()
        .collect();

        let candidates = set.into_vec();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].aliases, ["size", "length"]);
        assert_eq!(candidates[0].substitution, Some(inner));
        assert_eq!(candidates[1].lookup, "size");
    }
}
