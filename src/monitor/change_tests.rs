//! Tests for transition detection.

use super::*;
use crate::api::StatusRecord;

#[test]
fn different_status_is_a_transition() {
    let old = StatusRecord::new("CHARGER_001", "AVAILABLE");
    let new = StatusRecord::new("CHARGER_001", "CHARGING");

    assert!(is_transition(&old, &new));
}

#[test]
fn equal_status_is_not_a_transition() {
    let old = StatusRecord::new("CHARGER_001", "AVAILABLE");
    let new = StatusRecord::new("CHARGER_001", "AVAILABLE");

    assert!(!is_transition(&old, &new));
}

#[test]
fn other_field_churn_is_not_a_transition() {
    let old = StatusRecord::new("CHARGER_001", "CHARGING");
    let mut new = StatusRecord::new("CHARGER_001", "CHARGING");
    new.name = Some("Lot B, bay 4".to_string());
    new.updated_at = Some("2024-01-15T10:30:00Z".to_string());

    assert!(!is_transition(&old, &new));
}

#[test]
fn status_comparison_is_case_sensitive() {
    // The vocabulary is owned by the service; no normalization happens here.
    let old = StatusRecord::new("CHARGER_001", "AVAILABLE");
    let new = StatusRecord::new("CHARGER_001", "available");

    assert!(is_transition(&old, &new));
}
