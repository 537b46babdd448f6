//! Grouping of banner observations by time window.
//!
//! A game often runs several banners over the same window (e.g. two character
//! event wishes side by side). Those are recorded as one history entry whose
//! item lists and names are the union of the individual banners.

use std::collections::{HashMap, HashSet};

use gacha_ledger_catalog::{BannerObservation, BannerRecord, TimeRange};

/// Separator between banner names in a record's `name`.
pub const NAME_SEPARATOR: &str = "|";

/// A sequence that ignores repeated values and keeps first-seen order.
#[derive(Debug, Clone, Default)]
struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    fn extend<'a>(&mut self, values: impl IntoIterator<Item = &'a String>) {
        for value in values {
            self.insert(value);
        }
    }

    fn insert(&mut self, value: &str) {
        if self.seen.insert(value.to_string()) {
            self.items.push(value.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// All observations that share one exact time window, folded together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerGroup {
    pub time_range: TimeRange,
    pub five: Vec<String>,
    pub four: Vec<String>,
    pub names: Vec<String>,
}

impl BannerGroup {
    /// The history entry this group would be stored as.
    pub fn to_record(&self) -> BannerRecord {
        BannerRecord {
            from: self.time_range.from.clone(),
            to: self.time_range.to.clone(),
            five: self.five.clone(),
            four: self.four.clone(),
            name: self.names.join(NAME_SEPARATOR),
            extra: Default::default(),
        }
    }
}

#[derive(Default)]
struct GroupAccumulator {
    five: OrderedSet,
    four: OrderedSet,
    names: OrderedSet,
}

/// Partition observations by exact `(from, to)` and union each partition.
///
/// Groups come out in the order their window was first seen; within a group,
/// items and names keep the order they were first seen across the group's
/// members.
pub fn group_observations(observations: &[BannerObservation]) -> Vec<BannerGroup> {
    let mut order: Vec<TimeRange> = Vec::new();
    let mut groups: HashMap<TimeRange, GroupAccumulator> = HashMap::new();

    for obs in observations {
        let acc = groups.entry(obs.time_range.clone()).or_insert_with(|| {
            order.push(obs.time_range.clone());
            GroupAccumulator::default()
        });
        acc.five.extend(&obs.up_items.five);
        acc.four.extend(&obs.up_items.four);
        acc.names.insert(&obs.display_name);
    }

    order
        .into_iter()
        .filter_map(|range| {
            let acc = groups.remove(&range)?;
            Some(BannerGroup {
                time_range: range,
                five: acc.five.into_vec(),
                four: acc.four.into_vec(),
                names: acc.names.into_vec(),
            })
        })
        .collect()
}
