//! Tests for agent registration through the agency
//!
//! Ids are unique and strictly increasing, removal never recycles an id,
//! and listing is in ascending id order.

use commission_ledger_core::{Agency, AgencyConfig, AgencyError, AgentId, Event};

#[test]
fn test_add_agent_returns_fresh_ids() {
    let mut agency = Agency::default();

    let bob = agency.add_agent("Bob", 0.02).unwrap();
    let janet = agency.add_agent("Janet", 0.025).unwrap();
    let peter = agency.add_agent("Peter", 0.0325).unwrap();

    assert_eq!(bob, AgentId(1001));
    assert!(bob < janet && janet < peter);
    assert_eq!(agency.agent_count(), 3);
}

#[test]
fn test_get_agent() {
    let mut agency = Agency::default();
    let lisa = agency.add_agent("Lisa", 0.045).unwrap();

    let agent = agency.get_agent(lisa).expect("agent registered");
    assert_eq!(agent.id(), lisa);
    assert_eq!(agent.name(), "Lisa");
    assert_eq!(agent.commission_rate(), 0.045);
}

#[test]
fn test_get_unknown_agent_is_none() {
    let agency = Agency::default();
    assert!(agency.get_agent(AgentId(1001)).is_none());
}

#[test]
fn test_remove_agent() {
    let mut agency = Agency::default();
    let tony = agency.add_agent("Tony", 0.05).unwrap();

    assert!(agency.remove_agent(tony));
    assert!(agency.get_agent(tony).is_none());

    // Second removal finds nothing
    assert!(!agency.remove_agent(tony));
}

#[test]
fn test_ids_not_reused_after_removal() {
    let mut agency = Agency::default();
    let bob = agency.add_agent("Bob", 0.02).unwrap();
    agency.remove_agent(bob);

    let fiona = agency.add_agent("Fiona", 0.0225).unwrap();
    assert!(fiona > bob);
}

#[test]
fn test_list_agents_in_id_order() {
    let mut agency = Agency::default();
    let ids: Vec<AgentId> = ["Bob", "Janet", "Peter"]
        .iter()
        .map(|name| agency.add_agent(*name, 0.01).unwrap())
        .collect();
    agency.remove_agent(ids[1]);

    let listed: Vec<(AgentId, &str)> = agency.list_agents().map(|a| (a.id(), a.name())).collect();
    assert_eq!(listed, vec![(ids[0], "Bob"), (ids[2], "Peter")]);
}

#[test]
fn test_update_agent_rate() {
    let mut agency = Agency::default();
    let bob = agency.add_agent("Bob", 0.02).unwrap();

    agency.update_agent_rate(bob, 0.03).unwrap();
    assert_eq!(agency.get_agent(bob).unwrap().commission_rate(), 0.03);

    let err = agency.update_agent_rate(AgentId(4242), 0.03).unwrap_err();
    assert_eq!(err, AgencyError::AgentNotFound(AgentId(4242)));
}

#[test]
fn test_rename_agent() {
    let mut agency = Agency::default();
    let bob = agency.add_agent("Bob", 0.02).unwrap();

    agency.rename_agent(bob, "Robert").unwrap();
    assert_eq!(agency.get_agent(bob).unwrap().name(), "Robert");
    assert!(agency.rename_agent(AgentId(1), "Nobody").is_err());

    let renamed = agency.event_log().events_of_type("AgentRenamed");
    assert_eq!(renamed.len(), 1);
    match renamed[0] {
        Event::AgentRenamed {
            agent_id,
            old_name,
            new_name,
            ..
        } => {
            assert_eq!(*agent_id, bob);
            assert_eq!(old_name, "Bob");
            assert_eq!(new_name, "Robert");
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_last_agent_id_is_issued_once() {
    let config = AgencyConfig {
        agent_id_start: u32::MAX,
        ..AgencyConfig::default()
    };
    let mut agency = Agency::new(config).unwrap();

    assert_eq!(agency.add_agent("Bob", 0.02).unwrap(), AgentId(u32::MAX));

    let err = agency.add_agent("Janet", 0.025).unwrap_err();
    assert_eq!(err, AgencyError::IdsExhausted("agent"));
    assert_eq!(agency.agent_count(), 1);
    assert!(agency.list_agents().all(|a| a.id() == AgentId(u32::MAX)));
    assert_eq!(agency.event_log().events_of_type("OperationRejected").len(), 1);
}

#[test]
fn test_separate_agencies_have_separate_counters() {
    let mut first = Agency::default();
    let mut second = Agency::default();

    first.add_agent("Bob", 0.02).unwrap();
    first.add_agent("Janet", 0.025).unwrap();

    assert_eq!(second.add_agent("Peter", 0.0325).unwrap(), AgentId(1001));
}
