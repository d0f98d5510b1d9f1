use std::collections::HashSet;

use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::marks::model::{Mark, Rank, RankLabel, SpawnPoint};

/// A zone mark with its rank resolved against the rest of the zone.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedMark<'a> {
    pub name: &'a str,
    pub label: RankLabel,
    pub spawns: &'a [SpawnPoint],
}

/// Disambiguate `A`/`B` ranks of one zone into numbered labels.
///
/// For each ambiguous rank, the marks holding it are sorted by name (ordinal string order) and
/// numbered from 1. The result keeps the input order, but labels only depend on the set of
/// marks. Duplicate names inside a zone are rejected.
pub fn remap_ranks<'a>(marks: &[&'a Mark]) -> HuntmapResult<Vec<ResolvedMark<'a>>> {
    let mut seen = HashSet::with_capacity(marks.len());
    for mark in marks {
        if !seen.insert(mark.name.as_str()) {
            return Err(HuntmapError::input(format!(
                "mark \"{}\" appears more than once in zone \"{}\"",
                mark.name, mark.zone
            )));
        }
    }

    let mut labels: Vec<Option<RankLabel>> = marks
        .iter()
        .map(|m| RankLabel::unambiguous(m.rank))
        .collect();

    for rank in [Rank::A, Rank::B] {
        let mut holders: Vec<usize> = (0..marks.len())
            .filter(|&i| marks[i].rank == rank)
            .collect();
        holders.sort_by(|&a, &b| marks[a].name.cmp(&marks[b].name));
        for (n, &i) in holders.iter().enumerate() {
            labels[i] = Some(RankLabel::numbered(rank, n)?);
        }
    }

    marks
        .iter()
        .zip(labels)
        .map(|(mark, label)| {
            let label = label.ok_or_else(|| {
                HuntmapError::input(format!("mark \"{}\" has no resolvable rank", mark.name))
            })?;
            Ok(ResolvedMark {
                name: &mark.name,
                label,
                spawns: &mark.spawns,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/marks/remap.rs"]
mod tests;
