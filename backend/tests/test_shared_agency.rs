//! Tests for the locked agency handle

use commission_ledger_core::{Agency, CommissionNotice, SharedAgency};
use std::thread;

#[test]
fn test_handles_share_state() {
    let shared = SharedAgency::new(Agency::default());
    let other = shared.clone();

    let plan = shared.with(|a| a.add_commission_plan("Plan A", &[0.5]).unwrap());
    assert_eq!(other.with(|a| a.rate_count(plan)), Ok(1));
}

#[test]
fn test_concurrent_registration_yields_unique_ids() {
    let shared = SharedAgency::new(Agency::default());

    let workers: Vec<_> = (0..4)
        .map(|w| {
            let handle = shared.clone();
            thread::spawn(move || {
                (0..25)
                    .map(|i| {
                        handle.with(|a| a.add_agent(format!("agent-{}-{}", w, i), 0.01).unwrap())
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<_> = workers
        .into_iter()
        .flat_map(|w| w.join().unwrap())
        .collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 100);
    assert_eq!(shared.with(|a| a.agent_count()), 100);
}

#[test]
fn test_removal_during_calculation_degrades_to_notice() {
    let shared = SharedAgency::new(Agency::default());
    let (policy, bob, janet) = shared.with(|a| {
        let plan = a.add_commission_plan("Plan A", &[0.50, 0.05]).unwrap();
        let bob = a.add_agent("Bob", 0.02).unwrap();
        let janet = a.add_agent("Janet", 0.025).unwrap();
        let policy = a.create_policy(100_000.0, plan).unwrap();
        a.record_selling_agent(policy, bob).unwrap();
        a.record_super_agents(policy, &[janet]).unwrap();
        a.record_policy_sale(policy).unwrap();
        (policy, bob, janet)
    });

    let remover = {
        let handle = shared.clone();
        thread::spawn(move || handle.with(|a| a.remove_agent(janet)))
    };
    let report = shared.calculate_commissions();
    assert!(remover.join().unwrap());

    // Either the pass saw Janet or it saw her missing; never a partial line
    let statement = &report.statements[0];
    assert_eq!(statement.policy_id, policy);
    assert_eq!(statement.lines[0].agent_id, bob);
    match statement.lines.len() {
        2 => assert!(statement.notices.is_empty()),
        1 => assert_eq!(
            statement.notices,
            vec![CommissionNotice::AgentMissing {
                agent_id: janet,
                position: 1
            }]
        ),
        n => panic!("unexpected line count {}", n),
    }
}

#[test]
fn test_snapshot_is_detached() {
    let shared = SharedAgency::new(Agency::default());
    let bob = shared.with(|a| a.add_agent("Bob", 0.02).unwrap());

    let snapshot = shared.snapshot();
    shared.with(|a| a.remove_agent(bob));

    assert!(snapshot.get_agent(bob).is_some());
    assert!(shared.with(|a| a.get_agent(bob).is_none()));
}

#[test]
fn test_poisoned_lock_is_recovered() {
    let shared = SharedAgency::new(Agency::default());
    let handle = shared.clone();

    let result = thread::spawn(move || {
        handle.with(|_| panic!("caller panicked while holding the agency"));
    })
    .join();
    assert!(result.is_err());

    let bob = shared.with(|a| a.add_agent("Bob", 0.02).unwrap());
    assert!(shared.with(|a| a.get_agent(bob).is_some()));
}
