//! Auto-mining sequencer: one unit per submitted transaction.
//!
//! Transactions execute at the clock's current unit, then the unit is
//! sealed whether the transaction succeeded or was rejected. Reads run
//! against the pending unit and do not advance the clock.

use crate::config::RunnerConfig;
use crate::script::ScriptStep;
use mgt_governance::{BlockClock, GovToken, GovernanceError, Receipt};
use mgt_types::{AccountId, Clock, LedgerUnit};
use serde::Serialize;
use std::sync::Arc;

/// Result of a read step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReadValue {
    Amount(u128),
    Delegate(Option<AccountId>),
    Count(usize),
}

/// One line of replay output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Applied { step: usize, receipt: Receipt },
    Read { step: usize, unit: LedgerUnit, value: ReadValue },
    Mined { step: usize, unit: LedgerUnit },
    Failed { step: usize, unit: LedgerUnit, error: String },
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

pub struct Runner {
    token: GovToken<Arc<BlockClock>>,
    clock: Arc<BlockClock>,
}

impl Runner {
    pub fn new(config: &RunnerConfig) -> Self {
        let clock = Arc::new(BlockClock::new(LedgerUnit::new(config.start_unit)));
        let token = GovToken::new(config.owner, config.token.clone(), Arc::clone(&clock));
        Self { token, clock }
    }

    pub fn token(&self) -> &GovToken<Arc<BlockClock>> {
        &self.token
    }

    /// Execute one step, sealing a unit if it was a transaction.
    pub fn execute(&mut self, step: usize, op: &ScriptStep) -> StepOutcome {
        let unit = self.clock.current_unit();
        let outcome = match self.dispatch(op) {
            Ok(Dispatched::Receipt(receipt)) => StepOutcome::Applied { step, receipt },
            Ok(Dispatched::Value(value)) => StepOutcome::Read { step, unit, value },
            Ok(Dispatched::Mined(units)) => StepOutcome::Mined {
                step,
                unit: self.clock.mine_many(units),
            },
            Err(e) => {
                tracing::info!(step, unit = %unit, error = %e, "step failed");
                StepOutcome::Failed {
                    step,
                    unit,
                    error: e.to_string(),
                }
            }
        };
        if op.is_transaction() {
            self.clock.mine();
        }
        outcome
    }

    /// Execute every step in order, stopping after the first failure when `fail_fast` is set.
    pub fn run(&mut self, steps: &[ScriptStep], fail_fast: bool) -> Vec<StepOutcome> {
        let mut outcomes = Vec::with_capacity(steps.len());
        for (i, op) in steps.iter().enumerate() {
            let outcome = self.execute(i, op);
            let failed = outcome.is_failure();
            outcomes.push(outcome);
            if failed && fail_fast {
                break;
            }
        }
        outcomes
    }

    fn dispatch(&mut self, op: &ScriptStep) -> Result<Dispatched, GovernanceError> {
        let owner = self.token.owner();
        let token = &mut self.token;
        let dispatched = match op {
            ScriptStep::Mint { caller, to, amount } => {
                Dispatched::Receipt(token.mint(&caller.unwrap_or(owner), to, *amount)?)
            }
            ScriptStep::Burn {
                caller,
                from,
                amount,
            } => Dispatched::Receipt(token.burn(&caller.unwrap_or(owner), from, *amount)?),
            ScriptStep::Delegate { caller, to } => Dispatched::Receipt(token.delegate(caller, to)?),
            ScriptStep::Undelegate { caller } => Dispatched::Receipt(token.undelegate(caller)?),
            ScriptStep::TransferOwnership { caller, new_owner } => Dispatched::Receipt(
                token.transfer_ownership(&caller.unwrap_or(owner), new_owner)?,
            ),
            ScriptStep::Advance { units } => Dispatched::Mined(*units),
            ScriptStep::BalanceOf { account } => {
                Dispatched::Value(ReadValue::Amount(token.balance_of(account)))
            }
            ScriptStep::Delegates { account } => {
                Dispatched::Value(ReadValue::Delegate(token.delegates(account)))
            }
            ScriptStep::CurrentVotes { account } => {
                Dispatched::Value(ReadValue::Amount(token.get_current_votes(account)))
            }
            ScriptStep::PriorVotes { account, unit } => Dispatched::Value(ReadValue::Amount(
                token.get_prior_votes(account, LedgerUnit::new(*unit))?,
            )),
            ScriptStep::NumCheckpoints { account } => {
                Dispatched::Value(ReadValue::Count(token.num_checkpoints(account)))
            }
            ScriptStep::TotalSupply => Dispatched::Value(ReadValue::Amount(token.total_supply())),
        };
        Ok(dispatched)
    }
}

enum Dispatched {
    Receipt(Receipt),
    Value(ReadValue),
    Mined(u64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    const SUPPLY: u128 = 7_500 * 10u128.pow(18);

    fn account(seed: u8) -> AccountId {
        AccountId::new([seed; 20])
    }

    fn runner() -> Runner {
        Runner::new(&RunnerConfig {
            owner: account(0xA0),
            ..Default::default()
        })
    }

    #[test]
    fn transactions_each_consume_a_unit() {
        let mut r = runner();
        let steps = vec![
            ScriptStep::Mint { caller: None, to: account(0xA0), amount: SUPPLY },
            ScriptStep::Delegate { caller: account(0xA0), to: account(0xA1) },
            ScriptStep::Delegate { caller: account(0xA1), to: account(0xA2) },
            ScriptStep::PriorVotes { account: account(0xA1), unit: 3 },
        ];
        let outcomes = r.run(&steps, true);

        let units: Vec<u64> = outcomes[..3]
            .iter()
            .map(|o| match o {
                StepOutcome::Applied { receipt, .. } => receipt.unit.get(),
                other => panic!("unexpected outcome {other:?}"),
            })
            .collect();
        assert_eq!(units, vec![1, 2, 3]);
        assert_eq!(
            outcomes[3],
            StepOutcome::Read {
                step: 3,
                unit: LedgerUnit::new(4),
                value: ReadValue::Amount(SUPPLY),
            }
        );
    }

    #[test]
    fn rejected_transaction_still_mines() {
        let mut r = runner();
        let steps = vec![
            ScriptStep::Mint { caller: Some(account(0xA1)), to: account(0xA1), amount: 1 },
            ScriptStep::TotalSupply,
        ];
        let outcomes = r.run(&steps, false);
        assert!(outcomes[0].is_failure());
        assert_eq!(
            outcomes[1],
            StepOutcome::Read { step: 1, unit: LedgerUnit::new(2), value: ReadValue::Amount(0) }
        );
    }

    #[test]
    fn fail_fast_stops_at_first_failure() {
        let mut r = runner();
        let steps = vec![
            ScriptStep::PriorVotes { account: account(1), unit: 1 },
            ScriptStep::TotalSupply,
        ];
        let outcomes = r.run(&steps, true);
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            StepOutcome::Failed { error, .. } => assert!(error.contains("not yet determined")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn advance_mines_empty_units() {
        let mut r = runner();
        let outcome = r.execute(0, &ScriptStep::Advance { units: 5 });
        assert_eq!(outcome, StepOutcome::Mined { step: 0, unit: LedgerUnit::new(6) });
        assert_eq!(r.token().clock().current_unit(), LedgerUnit::new(6));
    }

    #[test]
    fn burn_scenario_from_script() {
        let owner = account(0xA0).to_string();
        let a1 = account(0xA1).to_string();
        let json = format!(
            r#"[
                {{ "mint": {{ "to": "{owner}", "amount": 7500 }} }},
                {{ "delegate": {{ "caller": "{owner}", "to": "{a1}" }} }},
                {{ "burn": {{ "from": "{owner}", "amount": 500 }} }},
                {{ "balance_of": {{ "account": "{owner}" }} }},
                {{ "current_votes": {{ "account": "{a1}" }} }},
                {{ "delegates": {{ "account": "{owner}" }} }}
            ]"#
        );
        let steps = parse_script(&json).unwrap();
        let mut r = runner();
        let outcomes = r.run(&steps, true);
        assert!(outcomes.iter().all(|o| !o.is_failure()));

        let values: Vec<&ReadValue> = outcomes
            .iter()
            .filter_map(|o| match o {
                StepOutcome::Read { value, .. } => Some(value),
                _ => None,
            })
            .collect();
        assert_eq!(
            values,
            vec![
                &ReadValue::Amount(7000),
                &ReadValue::Amount(7000),
                &ReadValue::Delegate(Some(account(0xA1))),
            ]
        );
    }

    #[test]
    fn outcomes_serialize_as_tagged_lines() {
        let mut r = runner();
        let outcome = r.execute(0, &ScriptStep::TotalSupply);
        let line = serde_json::to_string(&outcome).unwrap();
        assert_eq!(line, r#"{"status":"read","step":0,"unit":1,"value":0}"#);
    }
}
