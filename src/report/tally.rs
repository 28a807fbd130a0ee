//! Interaction counts by type.
use crate::contacts::InteractionType;
use std::collections::HashMap;

/// Number of contacts per interaction type.
///
/// Types are stored in the order they were first seen; types that never occur
/// count as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionTally {
    counts: Vec<(InteractionType, usize)>,
    index: HashMap<InteractionType, usize>,
}

impl InteractionTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more contact of type `t`.
    pub fn add(&mut self, t: &InteractionType) {
        self.add_n(t, 1);
    }

    fn add_n(&mut self, t: &InteractionType, n: usize) {
        match self.index.get(t) {
            Some(&i) => self.counts[i].1 += n,
            None => {
                self.index.insert(t.clone(), self.counts.len());
                self.counts.push((t.clone(), n));
            }
        }
    }

    /// Add all counts from another tally, keeping this tally's discovery order first.
    pub fn merge(&mut self, other: &InteractionTally) {
        for (t, n) in &other.counts {
            self.add_n(t, *n);
        }
    }

    /// Number of contacts of type `t`.
    pub fn count(&self, t: &InteractionType) -> usize {
        self.index.get(t).map_or(0, |&i| self.counts[i].1)
    }

    /// Total number of contacts counted.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Whether nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Types in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&InteractionType, usize)> {
        self.counts.iter().map(|(t, n)| (t, *n))
    }

    /// Every known type followed by any unrecognized labels, zeros included.
    pub fn with_vocabulary(&self) -> Vec<(InteractionType, usize)> {
        let mut all: Vec<(InteractionType, usize)> = InteractionType::KNOWN
            .iter()
            .map(|t| (t.clone(), self.count(t)))
            .collect();
        all.extend(
            self.counts
                .iter()
                .filter(|(t, _)| matches!(t, InteractionType::Unrecognized(_)))
                .cloned(),
        );
        all
    }

    /// Types sorted by descending count; ties keep discovery order.
    pub fn sorted(&self) -> Vec<(&InteractionType, usize)> {
        let mut sorted: Vec<(&InteractionType, usize)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Render as `<type> : <count>` lines, most frequent first.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return "0 interactions found\n".to_string();
        }
        self.sorted()
            .iter()
            .map(|(t, n)| format!("{t} : {n}\n"))
            .collect()
    }
}

impl<'a> FromIterator<&'a InteractionType> for InteractionTally {
    fn from_iter<I: IntoIterator<Item = &'a InteractionType>>(iter: I) -> Self {
        let mut tally = InteractionTally::new();
        for t in iter {
            tally.add(t);
        }
        tally
    }
}

/// Anything that carries an interaction type.
pub trait HasInteraction {
    /// The interaction type of this contact.
    fn interaction(&self) -> &InteractionType;
}

impl HasInteraction for crate::contacts::ContactRecord {
    fn interaction(&self) -> &InteractionType {
        &self.interaction
    }
}

impl HasInteraction for crate::contacts::ClassifiedContact {
    fn interaction(&self) -> &InteractionType {
        &self.interaction
    }
}

/// Count contacts per interaction type.
pub fn tally_by_type<T: HasInteraction>(records: &[T]) -> InteractionTally {
    records.iter().map(HasInteraction::interaction).collect()
}
