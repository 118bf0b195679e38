//! Events deposited by the balances module.

use crate::{AccountId, Balance};
use serde::{Deserialize, Serialize};

/// A balances event.
///
/// Variant tags are stable; see [`Event::tag`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// An account was created with some free balance.
    Endowed { account: AccountId, free_balance: Balance },
    /// An account was removed whose balance was non-zero but below the
    /// existential deposit, resulting in an outright loss.
    DustLost { account: AccountId, amount: Balance },
    Transfer { from: AccountId, to: AccountId, amount: Balance },
    /// A balance was set by root.
    BalanceSet { who: AccountId, free: Balance },
    /// Some balance was reserved (moved from free to reserved).
    Reserved { who: AccountId, amount: Balance },
    /// Some balance was unreserved (moved from reserved to free).
    Unreserved { who: AccountId, amount: Balance },
    Deposit { who: AccountId, amount: Balance },
    Withdraw { who: AccountId, amount: Balance },
    Minted { who: AccountId, amount: Balance },
    Burned { who: AccountId, amount: Balance },
    /// An account was upgraded to the provider/consumer accounting.
    Upgraded { who: AccountId },
    /// Total issuance was increased by `amount`, creating a credit to be balanced.
    Issued { amount: Balance },
    /// Total issuance was decreased by `amount`, creating a debt to be balanced.
    Rescinded { amount: Balance },
    Frozen { who: AccountId, amount: Balance },
    Thawed { who: AccountId, amount: Balance },
    /// The total issuance was forcefully changed.
    TotalIssuanceForced { old: Balance, new: Balance },
}

impl Event {
    /// The on-chain variant index of this event.
    pub fn tag(&self) -> u8 {
        match self {
            Event::Endowed { .. } => 0,
            Event::DustLost { .. } => 1,
            Event::Transfer { .. } => 2,
            Event::BalanceSet { .. } => 3,
            Event::Reserved { .. } => 4,
            Event::Unreserved { .. } => 5,
            Event::Deposit { .. } => 7,
            Event::Withdraw { .. } => 8,
            Event::Minted { .. } => 10,
            Event::Burned { .. } => 11,
            Event::Upgraded { .. } => 14,
            Event::Issued { .. } => 15,
            Event::Rescinded { .. } => 16,
            Event::Frozen { .. } => 19,
            Event::Thawed { .. } => 20,
            Event::TotalIssuanceForced { .. } => 21,
        }
    }
}

/// An event tagged with the index of the module that emitted it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub module_index: u8,
    pub event: Event,
}

impl EventRecord {
    pub fn new(module_index: u8, event: Event) -> Self {
        Self {
            module_index,
            event,
        }
    }

    pub fn tag(&self) -> u8 {
        self.event.tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_stable() {
        let who = AccountId::repeat_byte(1);
        assert_eq!(
            Event::Endowed {
                account: who,
                free_balance: 1
            }
            .tag(),
            0
        );
        assert_eq!(Event::Upgraded { who }.tag(), 14);
        assert_eq!(Event::TotalIssuanceForced { old: 1, new: 2 }.tag(), 21);
    }

    #[test]
    fn record_carries_module_index() {
        let rec = EventRecord::new(5, Event::Issued { amount: 3 });
        assert_eq!(rec.module_index, 5);
        assert_eq!(rec.tag(), 15);
    }
}
