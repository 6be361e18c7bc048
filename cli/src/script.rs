//! Replay scripts: a JSON array of token operations and reads.
//!
//! ```json
//! [
//!   { "mint": { "to": "0x…", "amount": 7500 } },
//!   { "delegate": { "caller": "0x…", "to": "0x…" } },
//!   { "prior_votes": { "account": "0x…", "unit": 2 } },
//!   "total_supply"
//! ]
//! ```
//!
//! Privileged steps without a `caller` run as the configured owner.

use anyhow::Context;
use mgt_types::AccountId;
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum ScriptStep {
    Mint {
        #[serde(default)]
        caller: Option<AccountId>,
        to: AccountId,
        amount: u128,
    },
    Burn {
        #[serde(default)]
        caller: Option<AccountId>,
        from: AccountId,
        amount: u128,
    },
    Delegate {
        caller: AccountId,
        to: AccountId,
    },
    Undelegate {
        caller: AccountId,
    },
    TransferOwnership {
        #[serde(default)]
        caller: Option<AccountId>,
        new_owner: AccountId,
    },
    /// Mine empty units.
    Advance {
        units: u64,
    },
    BalanceOf {
        account: AccountId,
    },
    Delegates {
        account: AccountId,
    },
    CurrentVotes {
        account: AccountId,
    },
    PriorVotes {
        account: AccountId,
        unit: u64,
    },
    NumCheckpoints {
        account: AccountId,
    },
    TotalSupply,
}

impl ScriptStep {
    /// Whether the step submits a transaction (and so consumes a unit).
    pub fn is_transaction(&self) -> bool {
        matches!(
            self,
            Self::Mint { .. }
                | Self::Burn { .. }
                | Self::Delegate { .. }
                | Self::Undelegate { .. }
                | Self::TransferOwnership { .. }
        )
    }
}

pub fn parse_script(json: &str) -> anyhow::Result<Vec<ScriptStep>> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_script(path: &Path) -> anyhow::Result<Vec<ScriptStep>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    parse_script(&content).with_context(|| format!("parsing script {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_account(seed: u8) -> String {
        AccountId::new([seed; 20]).to_string()
    }

    #[test]
    fn parses_every_step_kind() {
        let a = hex_account(1);
        let json = format!(
            r#"[
                {{ "mint": {{ "to": "{a}", "amount": 7500000000000000000000 }} }},
                {{ "burn": {{ "caller": "{a}", "from": "{a}", "amount": 1 }} }},
                {{ "delegate": {{ "caller": "{a}", "to": "{a}" }} }},
                {{ "undelegate": {{ "caller": "{a}" }} }},
                {{ "transfer_ownership": {{ "new_owner": "{a}" }} }},
                {{ "advance": {{ "units": 3 }} }},
                {{ "balance_of": {{ "account": "{a}" }} }},
                {{ "delegates": {{ "account": "{a}" }} }},
                {{ "current_votes": {{ "account": "{a}" }} }},
                {{ "prior_votes": {{ "account": "{a}", "unit": 2 }} }},
                {{ "num_checkpoints": {{ "account": "{a}" }} }},
                "total_supply"
            ]"#
        );
        let steps = parse_script(&json).unwrap();
        assert_eq!(steps.len(), 12);
        assert_eq!(
            steps[0],
            ScriptStep::Mint {
                caller: None,
                to: AccountId::new([1; 20]),
                amount: 7_500 * 10u128.pow(18),
            }
        );
        assert_eq!(steps.iter().filter(|s| s.is_transaction()).count(), 5);
        assert_eq!(steps[11], ScriptStep::TotalSupply);
    }

    #[test]
    fn rejects_unknown_fields() {
        let json = r#"[{ "advance": { "units": 1, "extra": true } }]"#;
        assert!(parse_script(json).is_err());
    }

    #[test]
    fn rejects_bad_account() {
        let json = r#"[{ "balance_of": { "account": "0xnothex" } }]"#;
        assert!(parse_script(json).is_err());
    }
}
