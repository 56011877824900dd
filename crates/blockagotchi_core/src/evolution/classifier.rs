//! Offline-trained decision forest, embedded as constant node tables.
//!
//! Each tree maps the feature array to a score per sub-type (in
//! [`SubType::ALL`] order). Scores are averaged across trees and the best
//! admissible candidate wins. Evaluation is plain `f64` comparison and
//! addition in a fixed order, so every node computes the same result.

use super::{EvolutionStrategy, FeatureVector, FEATURE_COUNT};
use blockagotchi_data::SubType;

pub const CLASS_COUNT: usize = SubType::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    /// Go `left` when `features[feature] <= threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf([f64; CLASS_COUNT]),
}

// Feature indices, see `FEATURE_LABELS`.
const FISH: usize = 1;
const MEAT: usize = 2;
const VEGETAL: usize = 3;
const FRUIT: usize = 4;
const WALKS: usize = 5;
const HAPPINESS: usize = 7;

// Leaf columns: Cat Dog Bird Lion Tiger Wolf Eagle Pigeon Duck
#[rustfmt::skip]
const TREE_DIET: [Node; 7] = [
    Node::Split { feature: FISH, threshold: 4.5, left: 1, right: 2 },
    Node::Split { feature: MEAT, threshold: 4.5, left: 3, right: 4 },
    Node::Split { feature: FISH, threshold: 9.5, left: 5, right: 6 },
    Node::Leaf([0.70, 0.15, 0.15, 0.60, 0.10, 0.30, 0.50, 0.30, 0.20]),
    Node::Leaf([0.10, 0.80, 0.10, 0.30, 0.10, 0.60, 0.40, 0.30, 0.30]),
    Node::Leaf([0.15, 0.10, 0.75, 0.60, 0.40, 0.30, 0.60, 0.20, 0.20]),
    Node::Leaf([0.10, 0.05, 0.85, 0.20, 0.80, 0.30, 0.50, 0.20, 0.30]),
];

#[rustfmt::skip]
const TREE_PLANTS: [Node; 5] = [
    Node::Split { feature: VEGETAL, threshold: 9.5, left: 1, right: 2 },
    Node::Split { feature: FRUIT, threshold: 9.5, left: 3, right: 4 },
    Node::Leaf([0.40, 0.20, 0.40, 0.50, 0.50, 0.50, 0.10, 0.80, 0.10]),
    Node::Leaf([0.40, 0.30, 0.30, 0.50, 0.50, 0.50, 0.60, 0.20, 0.20]),
    Node::Leaf([0.40, 0.20, 0.40, 0.50, 0.50, 0.50, 0.10, 0.10, 0.80]),
];

#[rustfmt::skip]
const TREE_FITNESS: [Node; 5] = [
    Node::Split { feature: WALKS, threshold: 9.5, left: 1, right: 2 },
    Node::Leaf([0.50, 0.30, 0.20, 0.60, 0.40, 0.50, 0.40, 0.40, 0.20]),
    Node::Split { feature: HAPPINESS, threshold: 150.5, left: 3, right: 4 },
    Node::Leaf([0.30, 0.40, 0.30, 0.40, 0.60, 0.50, 0.50, 0.20, 0.30]),
    Node::Leaf([0.30, 0.30, 0.40, 0.30, 0.70, 0.50, 0.60, 0.20, 0.20]),
];

pub static FOREST: [&[Node]; 3] = [&TREE_DIET, &TREE_PLANTS, &TREE_FITNESS];

#[derive(Debug, Clone, Copy)]
pub struct ClassifierStrategy {
    trees: &'static [&'static [Node]],
}

impl Default for ClassifierStrategy {
    fn default() -> Self {
        Self { trees: &FOREST }
    }
}

impl ClassifierStrategy {
    #[must_use]
    pub fn with_trees(trees: &'static [&'static [Node]]) -> Self {
        Self { trees }
    }

    /// Mean score per sub-type over the forest.
    #[must_use]
    pub fn score(&self, features: &FeatureVector) -> [f64; CLASS_COUNT] {
        let input = features.to_array();
        let mut total = [0.0; CLASS_COUNT];
        for tree in self.trees {
            if let Some(leaf) = walk_tree(tree, &input) {
                for (acc, value) in total.iter_mut().zip(leaf.iter()) {
                    *acc += value;
                }
            }
        }
        if !self.trees.is_empty() {
            let n = self.trees.len() as f64;
            for value in &mut total {
                *value /= n;
            }
        }
        total
    }
}

fn walk_tree<'a>(
    tree: &'a [Node],
    input: &[f64; FEATURE_COUNT],
) -> Option<&'a [f64; CLASS_COUNT]> {
    let mut idx = 0;
    // A well-formed tree reaches a leaf in fewer hops than it has nodes.
    for _ in 0..tree.len() {
        match tree.get(idx)? {
            Node::Leaf(scores) => return Some(scores),
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let value = *input.get(*feature)?;
                idx = if value <= *threshold { *left } else { *right };
            }
        }
    }
    None
}

impl EvolutionStrategy for ClassifierStrategy {
    fn name(&self) -> &'static str {
        "classifier"
    }

    fn choose(&self, features: &FeatureVector, candidates: &[SubType]) -> Option<usize> {
        let scores = self.score(features);
        let mut best: Option<(usize, f64)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            let score = scores[candidate.index()];
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((i, score)),
            }
        }
        best.map(|(i, _)| i)
    }
}
