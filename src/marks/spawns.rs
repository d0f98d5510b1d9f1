use std::collections::{BTreeMap, HashMap};

use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::foundation::math::distance;
use crate::marks::model::{Mark, MarkCatalog, RankLabel, RankSet, SpawnPoint};
use crate::marks::remap::ResolvedMark;

/// Default distance (map units) under which two spawn points are reported as suspicious.
pub const DEFAULT_NEAR_THRESHOLD: f64 = 0.5;

/// Marks anchored at one exact spawn coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnGroup<'a> {
    pub point: SpawnPoint,
    pub marks: BTreeMap<&'a str, RankLabel>,
}

impl SpawnGroup<'_> {
    pub fn labels(&self) -> RankSet {
        self.marks.values().copied().collect()
    }
}

/// Spawn coordinates of one zone, in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct SpawnGroups<'a> {
    groups: Vec<SpawnGroup<'a>>,
    index: HashMap<SpawnPoint, usize>,
}

impl<'a> SpawnGroups<'a> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpawnGroup<'a>> {
        self.groups.iter()
    }

    pub fn get(&self, point: SpawnPoint) -> Option<&SpawnGroup<'a>> {
        self.index.get(&point).map(|&i| &self.groups[i])
    }

    fn insert(&mut self, point: SpawnPoint, name: &'a str, label: RankLabel) {
        let i = *self.index.entry(point).or_insert_with(|| {
            self.groups.push(SpawnGroup {
                point,
                marks: BTreeMap::new(),
            });
            self.groups.len() - 1
        });
        self.groups[i].marks.insert(name, label);
    }
}

/// Group resolved marks by exact spawn coordinate.
///
/// A mark with several spawns appears once under each of its coordinates.
pub fn group_by_coordinate<'a>(marks: &[ResolvedMark<'a>]) -> SpawnGroups<'a> {
    let mut groups = SpawnGroups::default();
    for mark in marks {
        for &point in mark.spawns {
            groups.insert(point, mark.name, mark.label);
        }
    }
    groups
}

/// Two distinct spawn coordinates of one zone closer than the diagnostic threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct NearDuplicate {
    pub first: SpawnPoint,
    pub second: SpawnPoint,
    pub distance: f64,
    pub first_marks: Vec<String>,
    pub second_marks: Vec<String>,
}

/// Pairs of distinct spawn coordinates in `marks` within `threshold` map units.
///
/// Pairs are reported in first-seen coordinate order; each unordered pair at most once.
pub fn find_near_duplicates(marks: &[&Mark], threshold: f64) -> HuntmapResult<Vec<NearDuplicate>> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(HuntmapError::input(format!(
            "near-duplicate threshold must be finite and >= 0, got {threshold}"
        )));
    }

    let mut points: Vec<(SpawnPoint, Vec<String>)> = Vec::new();
    let mut index: HashMap<SpawnPoint, usize> = HashMap::new();
    for mark in marks {
        for &point in &mark.spawns {
            let i = *index.entry(point).or_insert_with(|| {
                points.push((point, Vec::new()));
                points.len() - 1
            });
            points[i].1.push(mark.name.clone());
        }
    }

    let mut out = Vec::new();
    for (i, (first, first_marks)) in points.iter().enumerate() {
        for (second, second_marks) in &points[i + 1..] {
            let d = distance(first.as_tuple(), second.as_tuple());
            if d <= threshold {
                out.push(NearDuplicate {
                    first: *first,
                    second: *second,
                    distance: d,
                    first_marks: first_marks.clone(),
                    second_marks: second_marks.clone(),
                });
            }
        }
    }
    Ok(out)
}

/// Near-duplicate spawns for every zone of `catalog`; zones without findings are omitted.
#[tracing::instrument(skip(catalog), fields(marks = catalog.len()))]
pub fn find_near_duplicate_spawns(
    catalog: &MarkCatalog,
    threshold: f64,
) -> HuntmapResult<BTreeMap<String, Vec<NearDuplicate>>> {
    let mut report = BTreeMap::new();
    for zone in catalog.zones() {
        let found = find_near_duplicates(&catalog.zone(zone), threshold)?;
        for dup in &found {
            tracing::warn!(
                zone,
                first = %dup.first,
                second = %dup.second,
                distance = dup.distance,
                "suspiciously close spawn points"
            );
        }
        if !found.is_empty() {
            report.insert(zone.to_owned(), found);
        }
    }
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/marks/spawns.rs"]
mod tests;
