use crate::matching::{SearchOptions, search, search_partitions};
use crate::models::{Gender, MatchResult, PreparedRecords};

/// A named, separately prepared slice of the reference data (one dataset file
/// per gender).
#[derive(Debug, Clone)]
pub struct Partition {
    pub name: String,
    pub gender: Gender,
    pub records: PreparedRecords,
}

impl Partition {
    pub fn new(name: impl Into<String>, gender: Gender, records: PreparedRecords) -> Self {
        Self {
            name: name.into(),
            gender,
            records,
        }
    }
}

/// Which partitions a query should look in. `Unknown` searches all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionSelector {
    Male,
    Female,
    #[default]
    Unknown,
}

impl PartitionSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionSelector::Male => "male",
            PartitionSelector::Female => "female",
            PartitionSelector::Unknown => "unknown",
        }
    }

    fn accepts(&self, gender: Gender) -> bool {
        match self {
            PartitionSelector::Male => gender == Gender::Male,
            PartitionSelector::Female => gender == Gender::Female,
            PartitionSelector::Unknown => true,
        }
    }
}

pub fn select(partitions: &[Partition], selector: PartitionSelector) -> Vec<&Partition> {
    partitions.iter().filter(|p| selector.accepts(p.gender)).collect()
}

/// Search the partitions picked by `selector`. A single partition is searched
/// with `options` as given; several are merged and cut to `merged_limit`.
pub fn search_selected<'a>(
    query_text: &str,
    partitions: &'a [Partition],
    selector: PartitionSelector,
    options: &SearchOptions,
    merged_limit: usize,
) -> Vec<MatchResult<'a>> {
    let chosen = select(partitions, selector);
    match chosen.as_slice() {
        [] => {
            log::warn!(
                "No partition available for selector '{}'",
                selector.as_str()
            );
            Vec::new()
        }
        [only] => {
            log::debug!("Searching partition '{}'", only.name);
            search(query_text, &only.records, options)
        }
        many => {
            log::debug!(
                "Searching {} partitions: {}",
                many.len(),
                many.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ")
            );
            let sets: Vec<&'a PreparedRecords> = many.iter().map(|p| &p.records).collect();
            search_partitions(query_text, &sets, options, merged_limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::prepare;
    use crate::models::RawRecord;

    fn partitions() -> Vec<Partition> {
        vec![
            Partition::new(
                "male",
                Gender::Male,
                prepare(vec![
                    RawRecord::new("m1", "Kiran Rao"),
                    RawRecord::new("m2", "Kiran Kumar"),
                ]),
            ),
            Partition::new(
                "female",
                Gender::Female,
                prepare(vec![
                    RawRecord::new("f1", "Kiran Rao"),
                    RawRecord::new("f2", "Kiran Bedi"),
                ]),
            ),
        ]
    }

    #[test]
    fn selector_picks_matching_gender() {
        let parts = partitions();
        let names = |sel| {
            select(&parts, sel)
                .iter()
                .map(|p| p.name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(PartitionSelector::Male), vec!["male"]);
        assert_eq!(names(PartitionSelector::Female), vec!["female"]);
        assert_eq!(names(PartitionSelector::Unknown), vec!["male", "female"]);
    }

    #[test]
    fn single_partition_uses_top_n() {
        let parts = partitions();
        let opts = SearchOptions {
            min_score: 0.0,
            top_n: 1,
            allow_fallback: false,
        };
        let hits = search_selected("Kiran", &parts, PartitionSelector::Female, &opts, 5);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].record.id.starts_with('f'));
    }

    #[test]
    fn unknown_gender_merges_up_to_limit() {
        let parts = partitions();
        let opts = SearchOptions {
            min_score: 0.0,
            top_n: 1,
            allow_fallback: false,
        };
        let hits = search_selected("Kiran", &parts, PartitionSelector::Unknown, &opts, 3);
        assert_eq!(hits.len(), 3);
        let ids: Vec<&str> = hits.iter().map(|h| h.record.id.as_str()).collect();
        // all four records match the first name exactly; partition order breaks the tie
        assert_eq!(ids, vec!["m1", "m2", "f1"]);
    }

    #[test]
    fn empty_selection_returns_nothing() {
        let parts = vec![Partition::new(
            "male",
            Gender::Male,
            prepare(vec![RawRecord::new("m1", "Kiran Rao")]),
        )];
        let hits = search_selected(
            "Kiran",
            &parts,
            PartitionSelector::Female,
            &SearchOptions::default(),
            5,
        );
        assert!(hits.is_empty());
    }
}
