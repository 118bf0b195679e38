//! Scenario files and their replay.

use anyhow::{Context, Result};
use balances_engine::{BalancesConfig, BalancesEngine, Call, GenesisConfig};
use balances_nullables::NullStore;
use balances_store::AccountStore;
use balances_types::{AccountId, Balance, Event, Origin};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Initial balances plus the calls to replay, in order.
#[derive(Debug, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub genesis: GenesisConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    pub origin: Origin,
    pub call: Call,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub call: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize)]
pub struct AccountReport {
    pub id: AccountId,
    pub free: Balance,
    pub reserved: Balance,
    pub frozen: Balance,
    pub providers: u32,
    pub consumers: u32,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub steps: Vec<StepReport>,
    pub accounts: Vec<AccountReport>,
    pub total_issuance: Balance,
    /// The first invariant violation of the final state, if any.
    pub invariants: Option<String>,
}

impl Scenario {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("parsing scenario")
    }

    /// Replay every step as its own transaction: a failed call leaves no
    /// state or events behind.
    pub fn run(&self, config: &BalancesConfig) -> Result<Report> {
        let store = NullStore::with_max_consumers(config.max_consumers);
        let engine = BalancesEngine::new(&store, &store, &store, config.clone());
        let total = self.genesis.build(&engine).context("building genesis")?;
        info!(target: "balances_sim", accounts = self.genesis.balances.len(), total, "genesis ready");

        let mut steps = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            let name = step.call.name();
            let result =
                store.with_transaction(|| engine.dispatch(&step.origin, step.call.clone()));
            let events = store.take_events().into_iter().map(|r| r.event).collect();
            info!(target: "balances_sim", index, call = name, ok = result.is_ok(), "step replayed");
            steps.push(StepReport {
                call: name,
                ok: result.is_ok(),
                error: result.err().map(|e| e.to_string()),
                events,
            });
        }

        let mut accounts = Vec::new();
        for id in store.account_ids()? {
            let info = store.account(&id)?;
            accounts.push(AccountReport {
                id,
                free: info.data.free,
                reserved: info.data.reserved,
                frozen: info.data.frozen,
                providers: info.providers,
                consumers: info.consumers,
            });
        }

        Ok(Report {
            steps,
            accounts,
            total_issuance: engine.total_issuance()?,
            invariants: engine.check_invariants().err().map(|e| e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> String {
        AccountId::repeat_byte(byte).to_string()
    }

    #[test]
    fn replays_transfers_and_reports_failures() {
        let json = format!(
            r#"{{
                "genesis": {{ "balances": [["{a}", 5]] }},
                "steps": [
                    {{ "origin": {{ "Signed": "{a}" }},
                       "call": {{ "TransferAllowDeath": {{ "dest": {{ "Id": "{b}" }}, "value": 3 }} }} }},
                    {{ "origin": {{ "Signed": "{a}" }},
                       "call": {{ "TransferAllowDeath": {{ "dest": {{ "Id": "{b}" }}, "value": 10 }} }} }}
                ]
            }}"#,
            a = id(1),
            b = id(2)
        );
        let scenario = Scenario::from_json(&json).unwrap();
        let report = scenario.run(&BalancesConfig::default()).unwrap();

        assert_eq!(report.steps.len(), 2);
        assert!(report.steps[0].ok);
        assert!(report.steps[0].events.contains(&Event::Transfer {
            from: AccountId::repeat_byte(1),
            to: AccountId::repeat_byte(2),
            amount: 3,
        }));
        assert!(!report.steps[1].ok);
        assert!(report.steps[1].events.is_empty());
        assert_eq!(report.total_issuance, 5);
        assert_eq!(report.accounts.len(), 2);
        assert_eq!(report.invariants, None);
    }

    #[test]
    fn forced_issuance_shows_up_as_a_violation() {
        let json = format!(
            r#"{{
                "genesis": {{ "balances": [["{a}", 5]] }},
                "steps": [
                    {{ "origin": "Root",
                       "call": {{ "ForceAdjustTotalIssuance": {{ "direction": "Increase", "delta": 2 }} }} }}
                ]
            }}"#,
            a = id(1)
        );
        let report = Scenario::from_json(&json)
            .unwrap()
            .run(&BalancesConfig::default())
            .unwrap();
        assert_eq!(report.total_issuance, 7);
        assert!(report.invariants.is_some());
    }

    #[test]
    fn bundled_scenarios_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let scenario = Scenario::from_path(&path).unwrap();
            let report = scenario.run(&BalancesConfig::default()).unwrap();
            assert!(report.steps.iter().any(|s| s.ok), "{}", path.display());
        }
    }
}
