//! Agency demo driver
//!
//! Loads a scenario (built in, or a JSON file), lists plans and agents,
//! records the sales, runs one commission pass and prints a line per agent
//! per sold policy.
//!
//! ```text
//! agency-demo [SCENARIO.json] [--json]
//! ```

mod scenario;

use clap::Parser;
use commission_ledger_core::{Agency, CommissionNotice, CommissionReport, Event};
use scenario::{LoadedScenario, Scenario};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "agency-demo")]
#[command(about = "Run an insurance agency commission scenario")]
struct Cli {
    /// JSON scenario file (defaults to the built-in three-policy scenario)
    #[arg(value_name = "SCENARIO")]
    scenario: Option<PathBuf>,

    /// Print the commission report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn load_scenario(path: Option<&Path>) -> Result<Scenario, String> {
    let Some(path) = path else {
        return Ok(Scenario::builtin());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&text)
        .map_err(|e| format!("Invalid scenario {}: {}", path.display(), e))
}

fn print_plans(agency: &Agency) {
    for plan in agency.list_plans() {
        println!("Commission Plan ID: {}    Name: {}", plan.id(), plan.name());
        if plan.is_empty() {
            println!("No commission rates recorded.");
            continue;
        }
        for (role, rate) in plan.labeled_rates() {
            println!("{} rate: {}", role, rate);
        }
    }
}

fn print_agents(agency: &Agency) {
    for agent in agency.list_agents() {
        println!(
            "Agent ID: {}  Name: {}  Commission: {}",
            agent.id(),
            agent.name(),
            agent.commission_rate()
        );
    }
}

fn print_policies(agency: &Agency) {
    for policy in agency.list_policies() {
        println!(
            "Policy no. {} with face value {} created (plan {}).",
            policy.id(),
            policy.face_value(),
            policy.plan_id()
        );
    }
}

/// Skipped super agents; rejected operations already surface as setup issues
fn print_skipped_super_agents(agency: &Agency) {
    for event in agency.event_log().events_of_type("SuperAgentSkipped") {
        if let Event::SuperAgentSkipped {
            policy_id, agent_id, ..
        } = event
        {
            println!(
                "Warning: invalid super agent {} skipped for policy {}",
                agent_id, policy_id
            );
        }
    }
}

fn print_report(report: &CommissionReport) {
    for statement in &report.statements {
        match statement.face_value {
            Some(face_value) => println!(
                "Policy no. {} (face value {:.2})",
                statement.policy_id, face_value
            ),
            None => println!("Policy no. {}", statement.policy_id),
        }

        for notice in &statement.notices {
            match notice {
                CommissionNotice::NoRatesRecorded { plan_id } => {
                    println!("  No commission rates recorded for plan {}.", plan_id)
                }
                CommissionNotice::AgentMissing { agent_id, position } => println!(
                    "  Agent {} at position {} is no longer registered; skipped.",
                    agent_id, position
                ),
                CommissionNotice::PolicyMissing => println!("  Policy not found."),
                CommissionNotice::PlanMissing { plan_id } => {
                    println!("  Commission plan {} not found.", plan_id)
                }
            }
        }

        for line in &statement.lines {
            println!(
                "  {} {} commission: {:.2}",
                line.role, line.agent_name, line.amount
            );
        }
    }
    println!("Total commissions paid: {:.2}", report.total_paid());
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let scenario = match load_scenario(cli.scenario.as_deref()) {
        Ok(scenario) => scenario,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    let mut loaded = match LoadedScenario::load(&scenario) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        let report = loaded.agency.calculate_commissions();
        return match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Cannot serialize report: {}", err);
                ExitCode::FAILURE
            }
        };
    }

    print_plans(&loaded.agency);
    println!();
    print_agents(&loaded.agency);
    println!();
    print_policies(&loaded.agency);
    println!(
        "{} policies issued, {} sales recorded.",
        loaded.policies.len(),
        loaded.agency.sale_count()
    );

    for issue in &loaded.issues {
        println!("Warning: {}", issue);
    }
    print_skipped_super_agents(&loaded.agency);

    println!();
    let report = loaded.agency.calculate_commissions();
    print_report(&report);

    println!("Complete!");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_runs_builtin_scenario() {
        let cli = Cli::try_parse_from(["agency-demo"]).unwrap();
        assert!(cli.scenario.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_scenario_path_and_json_flag() {
        let cli = Cli::try_parse_from(["agency-demo", "--json", "agency.json"]).unwrap();
        assert_eq!(cli.scenario, Some(PathBuf::from("agency.json")));
        assert!(cli.json);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["agency-demo", "--verbose"]).is_err());
    }

    #[test]
    fn test_second_scenario_path_is_rejected() {
        assert!(Cli::try_parse_from(["agency-demo", "a.json", "b.json"]).is_err());
    }
}
