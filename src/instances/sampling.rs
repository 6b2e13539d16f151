//! Random pairs of properties of the same label
//!
//! Used to pick two `(property, value)` facts about one label, for example to
//! seed question templates. The caller owns the [`UsedPairs`] accumulator and
//! passes it to every call that should avoid repeats.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::projector::NodeTriple;
use super::values::PropertyValue;

/// Fewer candidate pairs than this (after removing used ones) yields no sample
const MIN_CANDIDATE_PAIRS: usize = 5;

/// Pairs already handed out, in the order they were drawn
#[derive(Debug, Clone, Default)]
pub struct UsedPairs {
    pairs: Vec<(NodeTriple, NodeTriple)>,
}

impl UsedPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pair: &(NodeTriple, NodeTriple)) -> bool {
        self.pairs.contains(pair)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn record(&mut self, pair: (NodeTriple, NodeTriple)) {
        self.pairs.push(pair);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledPair {
    pub label: String,
    pub first_property: String,
    pub first_value: PropertyValue,
    pub second_property: String,
    pub second_value: PropertyValue,
}

/// Draw one unused pair of triples sharing a label.
///
/// All 2-combinations are formed within each label group (groups in order of
/// first appearance). Returns `None` unless more than four unused pairs remain.
pub fn random_properties<R: Rng + ?Sized>(
    triples: &[NodeTriple],
    used: &mut UsedPairs,
    rng: &mut R,
) -> Option<SampledPair> {
    let mut groups: Vec<(&str, Vec<&NodeTriple>)> = Vec::new();
    for triple in triples {
        match groups.iter_mut().find(|(label, _)| *label == triple.label) {
            Some((_, members)) => members.push(triple),
            None => groups.push((triple.label.as_str(), vec![triple])),
        }
    }

    let mut candidates = Vec::new();
    for (_, members) in &groups {
        for (i, first) in members.iter().enumerate() {
            for second in &members[i + 1..] {
                let pair = ((*first).clone(), (*second).clone());
                if !used.contains(&pair) {
                    candidates.push(pair);
                }
            }
        }
    }

    if candidates.len() < MIN_CANDIDATE_PAIRS {
        return None;
    }

    let chosen = candidates.choose(rng)?.clone();
    used.record(chosen.clone());

    let (first, second) = chosen;
    Some(SampledPair {
        label: first.label,
        first_property: first.property,
        first_value: first.value,
        second_property: second.property,
        second_value: second.value,
    })
}
