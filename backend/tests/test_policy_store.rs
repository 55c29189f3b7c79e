//! Tests for policy creation and plan binding

use commission_ledger_core::{Agency, AgencyError, PlanId, PolicyId};

#[test]
fn test_create_policy_bound_to_plan() {
    let mut agency = Agency::default();
    let plan = agency.add_commission_plan("Plan A", &[0.50, 0.05]).unwrap();

    let policy_id = agency.create_policy(100_000.0, plan).unwrap();

    assert_eq!(policy_id, PolicyId(8001));
    let policy = agency.get_policy(policy_id).unwrap();
    assert_eq!(policy.face_value(), 100_000.0);
    assert_eq!(policy.plan_id(), plan);
}

#[test]
fn test_create_policy_invalid_plan_creates_nothing() {
    let mut agency = Agency::default();

    let err = agency.create_policy(100_000.0, PlanId(5001)).unwrap_err();
    assert_eq!(err, AgencyError::PlanNotFound(PlanId(5001)));

    // No policy under the number it would have taken
    assert!(agency.get_policy(PolicyId(8001)).is_none());
    assert_eq!(agency.list_policies().count(), 0);
}

#[test]
fn test_failed_create_does_not_consume_number() {
    let mut agency = Agency::default();
    let plan = agency.add_commission_plan("Plan A", &[0.5]).unwrap();

    assert!(agency.create_policy(1.0, PlanId(1)).is_err());
    assert_eq!(agency.create_policy(1.0, plan), Ok(PolicyId(8001)));
}

#[test]
fn test_policies_listed_in_number_order() {
    let mut agency = Agency::default();
    let plan = agency.add_commission_plan("Plan A", &[0.5]).unwrap();
    let p1 = agency.create_policy(100_000.0, plan).unwrap();
    let p2 = agency.create_policy(250_000.0, plan).unwrap();

    let listed: Vec<PolicyId> = agency.list_policies().map(|p| p.id()).collect();
    assert_eq!(listed, vec![p1, p2]);
}

#[test]
fn test_get_unknown_policy() {
    let agency = Agency::default();
    assert!(agency.get_policy(PolicyId(8001)).is_none());
}
