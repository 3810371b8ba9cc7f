//! Result data structures produced by statement evaluation.
//!
//! Outcomes are keyed by [`ExpressionId`], the position of an expression inside its
//! statement, so two expressions with the same pattern or name are always tracked
//! separately.

use serde::Serialize;
use std::collections::BTreeMap;

/// Value tallied for a named group that did not take part in a match.
pub const ABSENT_GROUP_VALUE: &str = "null";

/// Opaque handle identifying one expression within its statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExpressionId(usize);

impl ExpressionId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index into the owning statement's expression list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Match statistics for a single expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpressionOutcome {
    occurrences: usize,
    group_values: BTreeMap<String, BTreeMap<String, usize>>,
}

impl ExpressionOutcome {
    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    /// Label -> (captured value -> frequency).
    pub fn group_values(&self) -> &BTreeMap<String, BTreeMap<String, usize>> {
        &self.group_values
    }

    /// Histogram for one group label, if any value was captured for it.
    pub fn values_for(&self, label: &str) -> Option<&BTreeMap<String, usize>> {
        self.group_values.get(label)
    }

    pub fn record_match(&mut self) {
        self.occurrences += 1;
    }

    pub fn record_group_value(&mut self, label: &str, value: &str) {
        *self
            .group_values
            .entry(label.to_string())
            .or_default()
            .entry(value.to_string())
            .or_insert(0) += 1;
    }
}

/// Outcomes for every expression of one statement that matched at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    outcomes: BTreeMap<ExpressionId, ExpressionOutcome>,
}

impl EvaluationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self, id: ExpressionId) -> Option<&ExpressionOutcome> {
        self.outcomes.get(&id)
    }

    /// Returns the outcome for `id`, creating an empty one on first use.
    pub fn record(&mut self, id: ExpressionId) -> &mut ExpressionOutcome {
        self.outcomes.entry(id).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExpressionId, &ExpressionOutcome)> + '_ {
        self.outcomes.iter().map(|(id, outcome)| (*id, outcome))
    }

    pub fn total_occurrences(&self) -> usize {
        self.outcomes.values().map(ExpressionOutcome::occurrences).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// The final buffer plus one result per evaluated statement, in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub buffer: String,
    pub results: Vec<EvaluationResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_creates_outcome_lazily() {
        let mut result = EvaluationResult::new();
        assert!(result.outcome(ExpressionId::new(0)).is_none());
        result.record(ExpressionId::new(0)).record_match();
        result.record(ExpressionId::new(0)).record_match();
        assert_eq!(result.outcome(ExpressionId::new(0)).unwrap().occurrences(), 2);
        assert!(result.outcome(ExpressionId::new(1)).is_none());
    }

    #[test]
    fn group_values_count_each_value() {
        let mut outcome = ExpressionOutcome::default();
        outcome.record_group_value("user", "alice");
        outcome.record_group_value("user", "bob");
        outcome.record_group_value("user", "alice");
        let users = outcome.values_for("user").unwrap();
        assert_eq!(users.get("alice"), Some(&2));
        assert_eq!(users.get("bob"), Some(&1));
        assert_eq!(outcome.occurrences(), 0);
    }

    #[test]
    fn total_occurrences_spans_expressions() {
        let mut result = EvaluationResult::new();
        result.record(ExpressionId::new(0)).record_match();
        result.record(ExpressionId::new(2)).record_match();
        result.record(ExpressionId::new(2)).record_match();
        assert_eq!(result.total_occurrences(), 3);
        let ids: Vec<usize> = result.iter().map(|(id, _)| id.index()).collect();
        assert_eq!(ids, vec![0, 2]);
    }
}
