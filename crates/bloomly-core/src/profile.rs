//! The five personality traits and the scored profile record.
//!
//! A [`Stats`] record is the output of one quiz pass: five scores in
//! [0, 100] (baseline 50), plus optional per-trait confidences, evidence
//! counts, and the dominant trait. Records are never mutated in place;
//! blending and dominant-trait selection produce new values.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the five fixed personality traits, in canonical order.
///
/// The canonical order matters: dominant-trait ties resolve to the
/// earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Energy,
    Creativity,
    Calmness,
    Kindness,
    Discipline,
}

impl Trait {
    /// All traits in canonical order.
    pub const ALL: [Trait; 5] = [
        Trait::Energy,
        Trait::Creativity,
        Trait::Calmness,
        Trait::Kindness,
        Trait::Discipline,
    ];

    /// Lowercase trait name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Trait::Energy => "energy",
            Trait::Creativity => "creativity",
            Trait::Calmness => "calmness",
            Trait::Kindness => "kindness",
            Trait::Discipline => "discipline",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Trait {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "energy" => Ok(Trait::Energy),
            "creativity" => Ok(Trait::Creativity),
            "calmness" => Ok(Trait::Calmness),
            "kindness" => Ok(Trait::Kindness),
            "discipline" => Ok(Trait::Discipline),
            other => Err(format!("unknown trait: {other}")),
        }
    }
}

/// A fixed-size map with exactly one value per trait.
///
/// Indexable by [`Trait`] and iterable in canonical order. Serializes as a
/// JSON object keyed by lowercase trait name; missing keys deserialize to
/// `T::default()`, and unknown keys are ignored, so records from earlier
/// schema versions load cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitMap<T>([T; 5]);

impl<T> TraitMap<T> {
    /// Build a map by evaluating `f` for each trait in canonical order.
    pub fn from_fn(f: impl FnMut(Trait) -> T) -> Self {
        Self(Trait::ALL.map(f))
    }

    /// Iterate `(trait, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Trait, &T)> {
        Trait::ALL.iter().copied().zip(self.0.iter())
    }
}

impl<T: Default> Default for TraitMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<Trait> for TraitMap<T> {
    type Output = T;

    fn index(&self, t: Trait) -> &T {
        &self.0[t as usize]
    }
}

impl<T> IndexMut<Trait> for TraitMap<T> {
    fn index_mut(&mut self, t: Trait) -> &mut T {
        &mut self.0[t as usize]
    }
}

impl<T: Serialize> Serialize for TraitMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Trait::ALL.len()))?;
        for (t, value) in self.iter() {
            map.serialize_entry(t.name(), value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for TraitMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TraitMapVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de> + Default> Visitor<'de> for TraitMapVisitor<T> {
            type Value = TraitMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map keyed by trait name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = TraitMap::default();
                while let Some(key) = access.next_key::<String>()? {
                    match key.parse::<Trait>() {
                        Ok(t) => map[t] = access.next_value()?,
                        // Unknown keys are tolerated so legacy records load.
                        Err(_) => {
                            let _ = access.next_value::<serde::de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(TraitMapVisitor(PhantomData))
    }
}

/// A scored trait profile, the record persisted after each quiz pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub energy: u8,
    pub creativity: u8,
    pub calmness: u8,
    pub kindness: u8,
    pub discipline: u8,
    /// Per-trait certainty in [0, 100].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidences: Option<TraitMap<u8>>,
    /// Number of answers that contributed evidence per trait, from the
    /// latest pass only (never blended).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<TraitMap<u32>>,
    /// Trait with the maximum score; ties favor the earlier canonical trait.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant: Option<Trait>,
}

/// Baseline score for a trait with no evidence at all.
pub const BASELINE_SCORE: u8 = 50;

impl Default for Stats {
    fn default() -> Self {
        Self {
            energy: BASELINE_SCORE,
            creativity: BASELINE_SCORE,
            calmness: BASELINE_SCORE,
            kindness: BASELINE_SCORE,
            discipline: BASELINE_SCORE,
            confidences: None,
            counts: None,
            dominant: None,
        }
    }
}

impl Stats {
    /// Assemble a record from a fresh scoring pass.
    pub fn from_parts(
        scores: TraitMap<u8>,
        confidences: TraitMap<u8>,
        counts: TraitMap<u32>,
    ) -> Self {
        Self {
            energy: scores[Trait::Energy],
            creativity: scores[Trait::Creativity],
            calmness: scores[Trait::Calmness],
            kindness: scores[Trait::Kindness],
            discipline: scores[Trait::Discipline],
            confidences: Some(confidences),
            counts: Some(counts),
            dominant: None,
        }
    }

    /// Score for a single trait.
    pub fn score(&self, t: Trait) -> u8 {
        match t {
            Trait::Energy => self.energy,
            Trait::Creativity => self.creativity,
            Trait::Calmness => self.calmness,
            Trait::Kindness => self.kindness,
            Trait::Discipline => self.discipline,
        }
    }

    /// All five scores as a [`TraitMap`].
    pub fn scores(&self) -> TraitMap<u8> {
        TraitMap::from_fn(|t| self.score(t))
    }

    /// The trait with the highest score, first strict maximum in canonical
    /// order (ties favor the earlier trait).
    pub fn dominant_trait(&self) -> Trait {
        let mut best = Trait::ALL[0];
        let mut best_score = self.score(best);
        for t in Trait::ALL {
            if self.score(t) > best_score {
                best = t;
                best_score = self.score(t);
            }
        }
        best
    }

    /// Exponentially smooth a fresh pass against a previously stored record.
    ///
    /// `alpha` is the weight on the fresh data. Scores and confidences are
    /// blended per trait (missing previous confidences count as 0); `counts`
    /// always come from the fresh pass. `dominant` is left unset for the
    /// caller to recompute on the blended record.
    pub fn blend(fresh: &Stats, previous: &Stats, alpha: f64) -> Stats {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |new: u8, old: u8| (a * f64::from(new) + (1.0 - a) * f64::from(old)).round() as u8;

        let scores = TraitMap::from_fn(|t| mix(fresh.score(t), previous.score(t)));
        let fresh_conf = fresh.confidences.unwrap_or_default();
        let prev_conf = previous.confidences.unwrap_or_default();
        let confidences = TraitMap::from_fn(|t| mix(fresh_conf[t], prev_conf[t]));

        Stats {
            energy: scores[Trait::Energy],
            creativity: scores[Trait::Creativity],
            calmness: scores[Trait::Calmness],
            kindness: scores[Trait::Kindness],
            discipline: scores[Trait::Discipline],
            confidences: Some(confidences),
            counts: fresh.counts,
            dominant: None,
        }
    }
}
