//! Tests for commission plan registration and schedule edits

use commission_ledger_core::{Agency, AgencyError, PlanId, RateRole};

#[test]
fn test_add_plan_rate_count() {
    let mut agency = Agency::default();
    let plan = agency.add_commission_plan("Plan A", &[0.50, 0.05, 0.0, 0.0]).unwrap();

    assert_eq!(plan, PlanId(5001));
    assert_eq!(agency.rate_count(plan), Ok(4));
    assert_eq!(agency.get_plan(plan).unwrap().name(), "Plan A");
}

#[test]
fn test_plan_with_no_rates() {
    let mut agency = Agency::default();
    let plan = agency.add_commission_plan("Empty", &[]).unwrap();

    assert_eq!(agency.rate_count(plan), Ok(0));
    assert!(agency.get_plan(plan).unwrap().is_empty());
}

#[test]
fn test_add_rates_appends_in_order() {
    let mut agency = Agency::default();
    let plan = agency.add_commission_plan("Plan B", &[0.70, 0.08]).unwrap();

    agency.add_rates_to_plan(plan, &[0.04, 0.0]).unwrap();

    assert_eq!(agency.rate_count(plan), Ok(4));
    assert_eq!(
        agency.get_plan(plan).unwrap().rates(),
        &[0.70, 0.08, 0.04, 0.0]
    );
}

#[test]
fn test_add_rates_to_unknown_plan() {
    let mut agency = Agency::default();
    let plan = agency.add_commission_plan("Plan A", &[0.5]).unwrap();

    let err = agency.add_rates_to_plan(PlanId(9999), &[0.1]).unwrap_err();

    assert_eq!(err, AgencyError::PlanNotFound(PlanId(9999)));
    assert_eq!(agency.rate_count(plan), Ok(1));
}

#[test]
fn test_update_rate() {
    let mut agency = Agency::default();
    let plan = agency.add_commission_plan("Plan C", &[0.4, 0.08, 0.02, 0.015]).unwrap();

    agency.update_rate(plan, 3, 0.02).unwrap();
    assert_eq!(agency.get_plan(plan).unwrap().rate(3), Some(0.02));
}

#[test]
fn test_update_rate_at_len_is_out_of_range() {
    // index == len is rejected; the schedule does not grow
    let mut agency = Agency::default();
    let plan = agency.add_commission_plan("Plan A", &[0.50, 0.05]).unwrap();

    let err = agency.update_rate(plan, 2, 0.01).unwrap_err();

    assert_eq!(
        err,
        AgencyError::RateIndexOutOfRange {
            plan_id: plan,
            index: 2,
            len: 2
        }
    );
    assert_eq!(agency.get_plan(plan).unwrap().rates(), &[0.50, 0.05]);
}

#[test]
fn test_update_rate_unknown_plan() {
    let mut agency = Agency::default();
    assert_eq!(
        agency.update_rate(PlanId(1), 0, 0.5),
        Err(AgencyError::PlanNotFound(PlanId(1)))
    );
}

#[test]
fn test_rate_count_unknown_plan() {
    let agency = Agency::default();
    assert_eq!(
        agency.rate_count(PlanId(5001)),
        Err(AgencyError::PlanNotFound(PlanId(5001)))
    );
}

#[test]
fn test_list_plans_with_role_labels() {
    let mut agency = Agency::default();
    let a = agency.add_commission_plan("Plan A", &[0.50, 0.05]).unwrap();
    let b = agency.add_commission_plan("Plan B", &[0.70]).unwrap();

    let plans: Vec<_> = agency.list_plans().collect();
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].id(), a);
    assert_eq!(plans[1].id(), b);

    let labels: Vec<String> = plans[0]
        .labeled_rates()
        .map(|(role, rate)| format!("{} rate: {}", role, rate))
        .collect();
    assert_eq!(labels, vec!["Selling agent rate: 0.5", "Super agent 1 rate: 0.05"]);

    let roles: Vec<RateRole> = plans[1].labeled_rates().map(|(role, _)| role).collect();
    assert_eq!(roles, vec![RateRole::SellingAgent]);
}
