use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{HuntmapError, HuntmapResult};

/// Rank as it appears in mark data.
///
/// `A` and `B` are ambiguous inside a zone (there are usually two of each) and must go through
/// [`crate::remap_ranks`] before they can be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    A,
    B,
    S,
    SS,
    SSs,
}

impl Rank {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::S => "S",
            Self::SS => "SS",
            Self::SSs => "SSs",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zone-resolved rank: the closed vocabulary that drives glyphs, colors and legend labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RankLabel {
    A1,
    A2,
    B1,
    B2,
    S,
    SS,
    SSs,
}

impl RankLabel {
    pub const ALL: [RankLabel; 7] = [
        Self::A1,
        Self::A2,
        Self::B1,
        Self::B2,
        Self::S,
        Self::SS,
        Self::SSs,
    ];

    /// Label for the `index`-th (0-based, name-sorted) mark holding `rank` in a zone.
    pub fn numbered(rank: Rank, index: usize) -> HuntmapResult<Self> {
        match (rank, index) {
            (Rank::A, 0) => Ok(Self::A1),
            (Rank::A, 1) => Ok(Self::A2),
            (Rank::B, 0) => Ok(Self::B1),
            (Rank::B, 1) => Ok(Self::B2),
            (Rank::A | Rank::B, n) => Err(HuntmapError::input(format!(
                "zone has more than 2 {rank}-rank marks (got index {n})"
            ))),
            (Rank::S, _) => Ok(Self::S),
            (Rank::SS, _) => Ok(Self::SS),
            (Rank::SSs, _) => Ok(Self::SSs),
        }
    }

    /// Label for a rank that never needs disambiguation.
    pub fn unambiguous(rank: Rank) -> Option<Self> {
        match rank {
            Rank::S => Some(Self::S),
            Rank::SS => Some(Self::SS),
            Rank::SSs => Some(Self::SSs),
            Rank::A | Rank::B => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::S => "S",
            Self::SS => "SS",
            Self::SSs => "SSs",
        }
    }

    /// Abbreviation shown in the legend.
    pub fn display_abbrev(self) -> &'static str {
        match self {
            Self::A1 | Self::A2 => "A",
            Self::B1 | Self::B2 => "B",
            Self::S => "S",
            Self::SS | Self::SSs => "SS",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for RankLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RankLabel {
    type Err = HuntmapError;

    fn from_str(s: &str) -> HuntmapResult<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| HuntmapError::input(format!("unknown rank label \"{s}\"")))
    }
}

/// Set of resolved labels present at one spawn point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RankSet(u8);

impl RankSet {
    pub fn insert(&mut self, label: RankLabel) {
        self.0 |= label.bit();
    }

    pub fn contains(self, label: RankLabel) -> bool {
        self.0 & label.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = RankLabel> {
        RankLabel::ALL.into_iter().filter(move |l| self.contains(*l))
    }
}

impl FromIterator<RankLabel> for RankSet {
    fn from_iter<I: IntoIterator<Item = RankLabel>>(iter: I) -> Self {
        let mut set = Self::default();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

/// One spawn coordinate in map space.
///
/// Used as an exact-equality key: two spawns group together only if both components are
/// bit-identical (after folding `-0.0` into `0.0`). Construction rejects non-finite values.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct SpawnPoint {
    pub x: f64,
    pub y: f64,
}

impl SpawnPoint {
    pub fn new(x: f64, y: f64) -> HuntmapResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(HuntmapError::input(format!(
                "spawn coordinates must be finite, got ({x}, {y})"
            )));
        }
        // Fold -0.0 so that equality and hashing agree.
        Ok(Self {
            x: x + 0.0,
            y: y + 0.0,
        })
    }

    pub fn as_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn key(self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

impl Eq for SpawnPoint {}

impl Hash for SpawnPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<SpawnPoint> for [f64; 2] {
    fn from(p: SpawnPoint) -> Self {
        [p.x, p.y]
    }
}

impl<'de> Deserialize<'de> for SpawnPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let [x, y] = <[f64; 2]>::deserialize(deserializer)?;
        Self::new(x, y).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for SpawnPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A named hunt mark: one entity of the input list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub name: String,
    pub rank: Rank,
    pub zone: String,
    #[serde(default)]
    pub spawns: Vec<SpawnPoint>,
}

/// Every mark known to the tool, in file order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkCatalog {
    marks: Vec<Mark>,
}

impl MarkCatalog {
    pub fn new(marks: Vec<Mark>) -> Self {
        Self { marks }
    }

    pub fn from_json(json: &str) -> HuntmapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> HuntmapResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_pretty(&self) -> HuntmapResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Marks of one zone, in file order.
    pub fn zone(&self, zone: &str) -> Vec<&Mark> {
        self.marks.iter().filter(|m| m.zone == zone).collect()
    }

    /// Distinct zone names, sorted.
    pub fn zones(&self) -> BTreeSet<&str> {
        self.marks.iter().map(|m| m.zone.as_str()).collect()
    }

    /// Normalized copy: marks ordered by (zone, rank, name), spawns by (x, y).
    pub fn sorted(&self) -> Self {
        let mut marks = self.marks.clone();
        marks.sort_by(|a, b| {
            (a.zone.as_str(), a.rank.as_str(), a.name.as_str()).cmp(&(
                b.zone.as_str(),
                b.rank.as_str(),
                b.name.as_str(),
            ))
        });
        for mark in &mut marks {
            mark.spawns.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        }
        Self { marks }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/marks/model.rs"]
mod tests;
