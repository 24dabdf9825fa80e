//! Delivery stages, planning blocks, and the fixed per-stage record.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four TCOF delivery lifecycle stages.
///
/// Every plan carries data for all four stages at all times; there is no
/// partially populated stage set anywhere in the system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Framing the project and its context
    Identification,

    /// Defining outcomes and the delivery approach
    Definition,

    /// Executing and tracking the work
    Delivery,

    /// Closing out and capturing learnings
    Closure,
}

impl Stage {
    /// All stages in canonical lifecycle order.
    pub const ALL: [Stage; 4] = [
        Stage::Identification,
        Stage::Definition,
        Stage::Delivery,
        Stage::Closure,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Identification => "identification",
            Stage::Definition => "definition",
            Stage::Delivery => "delivery",
            Stage::Closure => "closure",
        }
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "identification" => Ok(Stage::Identification),
            "definition" => Ok(Stage::Definition),
            "delivery" => Ok(Stage::Delivery),
            "closure" => Ok(Stage::Closure),
            _ => Err(format!("Invalid stage: {s}")),
        }
    }
}

/// The three planning blocks that group stage-spanning activities.
///
/// Blocks are not stage subsets: each block owns a field family inside
/// [`StageData`](super::StageData). Clearing one block never touches the
/// data owned by another.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    /// Block 1: goal mapping and complexity assessment
    Discover,

    /// Block 2: policy and framework task design
    Design,

    /// Block 3: the good-practice selection funnel
    Complete,
}

impl Block {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Block::Discover => "discover",
            Block::Design => "design",
            Block::Complete => "complete",
        }
    }
}

impl FromStr for Block {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "discover" => Ok(Block::Discover),
            "design" => Ok(Block::Design),
            "complete" => Ok(Block::Complete),
            _ => Err(format!("Invalid block: {s}")),
        }
    }
}

/// A fixed-size record holding one value per delivery stage.
///
/// All four fields exist by construction, so consumers never have to
/// handle a missing stage. Partial data only appears at the storage
/// boundary, where [`StageMap::from_partial`] heals it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct StageMap<T> {
    pub identification: T,
    pub definition: T,
    pub delivery: T,
    pub closure: T,
}

impl<T> StageMap<T> {
    /// Returns a reference to the value for the given stage.
    pub fn get(&self, stage: Stage) -> &T {
        match stage {
            Stage::Identification => &self.identification,
            Stage::Definition => &self.definition,
            Stage::Delivery => &self.delivery,
            Stage::Closure => &self.closure,
        }
    }

    /// Returns a mutable reference to the value for the given stage.
    pub fn get_mut(&mut self, stage: Stage) -> &mut T {
        match stage {
            Stage::Identification => &mut self.identification,
            Stage::Definition => &mut self.definition,
            Stage::Delivery => &mut self.delivery,
            Stage::Closure => &mut self.closure,
        }
    }

    /// Iterates entries in canonical stage order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &T)> {
        Stage::ALL.into_iter().map(move |stage| (stage, self.get(stage)))
    }

    /// Applies a mutation to every stage's value.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(Stage, &mut T)) {
        f(Stage::Identification, &mut self.identification);
        f(Stage::Definition, &mut self.definition);
        f(Stage::Delivery, &mut self.delivery);
        f(Stage::Closure, &mut self.closure);
    }
}

impl<T: Default> StageMap<T> {
    /// Builds a complete map from a possibly partial string-keyed map,
    /// returning the stages that had to be repaired with a default value.
    ///
    /// Callers persisting the result are expected to report the repaired
    /// stages rather than silently absorbing them.
    pub fn from_partial(
        mut partial: std::collections::BTreeMap<String, T>,
    ) -> (Self, Vec<Stage>) {
        let mut repaired = Vec::new();
        let mut take = |stage: Stage| {
            partial.remove(stage.as_str()).unwrap_or_else(|| {
                repaired.push(stage);
                T::default()
            })
        };
        let map = Self {
            identification: take(Stage::Identification),
            definition: take(Stage::Definition),
            delivery: take(Stage::Delivery),
            closure: take(Stage::Closure),
        };
        (map, repaired)
    }
}
