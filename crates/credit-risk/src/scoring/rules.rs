use std::cmp::Ordering;

use super::config::{Comparison, Condition, FieldValue, Operand, RuleSet};
use super::FiredCondition;
use crate::domain::Applicant;

impl Condition {
    pub(crate) fn matches(&self, value: FieldValue) -> bool {
        let ordering = match (&self.operand, value) {
            (Operand::Integer(target), FieldValue::Integer(actual)) => Some(actual.cmp(target)),
            (Operand::Amount(target), FieldValue::Amount(actual)) => actual.partial_cmp(target),
            (Operand::Label(target), FieldValue::Label(actual)) => Some(actual.cmp(target.as_str())),
            _ => None,
        };

        match (self.comparison, ordering) {
            (Comparison::LessThan, Some(Ordering::Less)) => true,
            (Comparison::GreaterThan, Some(Ordering::Greater)) => true,
            (Comparison::Equals, Some(Ordering::Equal)) => true,
            _ => false,
        }
    }
}

/// Walks the rules in declared order, applying at most one condition per rule.
pub(crate) fn score_applicant(applicant: &Applicant, rule_set: &RuleSet) -> (i64, Vec<FiredCondition>) {
    let mut score = rule_set.base_score();
    let mut fired = Vec::new();

    for rule in rule_set.rules() {
        let value = rule.field.value(applicant);
        if let Some(condition) = rule
            .conditions
            .iter()
            .find(|condition| condition.matches(value))
        {
            score = score.saturating_add(condition.points);
            fired.push(FiredCondition {
                field: rule.field,
                label: condition.label.clone(),
                points: condition.points,
                running_score: score,
            });
        }
    }

    (score, fired)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(comparison: Comparison, operand: Operand) -> Condition {
        Condition {
            comparison,
            operand,
            points: 1,
            label: "test".to_string(),
        }
    }

    #[test]
    fn integer_comparisons_are_strict() {
        let under = condition(Comparison::LessThan, Operand::Integer(25));
        assert!(under.matches(FieldValue::Integer(24)));
        assert!(!under.matches(FieldValue::Integer(25)));

        let over = condition(Comparison::GreaterThan, Operand::Integer(36));
        assert!(over.matches(FieldValue::Integer(37)));
        assert!(!over.matches(FieldValue::Integer(36)));
    }

    #[test]
    fn amount_equality_is_exact() {
        let exact = condition(Comparison::Equals, Operand::Amount(1500.0));
        assert!(exact.matches(FieldValue::Amount(1500.0)));
        assert!(!exact.matches(FieldValue::Amount(1500.000_1)));
        assert!(!exact.matches(FieldValue::Amount(f64::NAN)));
    }

    #[test]
    fn labels_match_exactly() {
        let rent = condition(Comparison::Equals, Operand::Label("Rent".to_string()));
        assert!(rent.matches(FieldValue::Label("Rent")));
        assert!(!rent.matches(FieldValue::Label("rent")));
    }

    #[test]
    fn mismatched_kinds_never_match() {
        let under = condition(Comparison::LessThan, Operand::Integer(25));
        assert!(!under.matches(FieldValue::Amount(10.0)));
        assert!(!under.matches(FieldValue::Label("Own")));
    }
}
