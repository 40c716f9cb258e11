//! # End-to-end Staking Registry Scenarios
//!
//! Drives the registry only through the `StakingApi` port.
//!
//! ## Test Categories
//!
//! 1. **Lifecycle** - admission, capacity, floor, refunds
//! 2. **Reentrancy** - nested calls from inside the payout transfer
//! 3. **Invariants** - randomized call sequences checked after every step

use qc_18_staking_registry::{
    ether, AccountId, Amount, BlsPublicKey, InMemoryEventBus, InMemoryValueTransfer,
    RegistryConfig, RegistryDependencies, RegistryError, RegistryEvent, RegistryResult,
    StakingApi, StakingRegistryService, ValueTransfer, VALIDATOR_THRESHOLD,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, OnceLock, Weak};

// =============================================================================
// TEST HELPERS
// =============================================================================

const MIN_VALIDATORS: usize = 4;
const MAX_VALIDATORS: usize = 6;

type Registry = StakingRegistryService<InMemoryValueTransfer, InMemoryEventBus>;

fn account(n: u8) -> AccountId {
    let mut id = [0u8; 20];
    id[19] = n;
    AccountId(id)
}

fn make_registry() -> (Registry, Arc<InMemoryValueTransfer>, Arc<InMemoryEventBus>) {
    let transfer = Arc::new(InMemoryValueTransfer::new());
    let bus = Arc::new(InMemoryEventBus::new());
    let registry = StakingRegistryService::new(RegistryDependencies {
        config: RegistryConfig::new(MIN_VALIDATORS, MAX_VALIDATORS).unwrap(),
        transfer: transfer.clone(),
        event_bus: bus.clone(),
    })
    .unwrap();
    (registry, transfer, bus)
}

// =============================================================================
// LIFECYCLE
// =============================================================================

#[test]
fn construction_fails_only_when_min_exceeds_max() {
    for (min, max) in [(0, 0), (1, 6), (4, 6), (6, 6)] {
        assert!(RegistryConfig::new(min, max).is_ok(), "({min}, {max})");
    }
    assert!(matches!(
        RegistryConfig::new(7, 6),
        Err(RegistryError::InvalidConfig { .. })
    ));
}

#[test]
fn full_set_rejects_then_accepts_after_exit() {
    let (registry, _, _) = make_registry();

    for i in 0..6 {
        registry.stake(account(i), VALIDATOR_THRESHOLD).unwrap();
    }
    assert_eq!(registry.validators().len(), 6);

    assert_eq!(
        registry.stake(account(6), VALIDATOR_THRESHOLD),
        Err(RegistryError::CapacityExceeded { maximum: 6 })
    );
    assert_eq!(registry.account_stake(&account(6)), 0);

    registry.unstake(account(0)).unwrap();
    assert_eq!(registry.validators().len(), 5);

    registry.stake(account(6), VALIDATOR_THRESHOLD).unwrap();
    assert_eq!(registry.validators().len(), 6);
    assert!(registry.is_validator(&account(6)));
}

#[test]
fn first_validator_exit_swaps_in_last() {
    let (registry, _, _) = make_registry();
    for i in 0..5 {
        registry.stake(account(i), VALIDATOR_THRESHOLD).unwrap();
    }
    assert_eq!(
        registry.validators(),
        (0..5).map(account).collect::<Vec<_>>()
    );

    registry.unstake(account(0)).unwrap();
    assert_eq!(
        registry.validators(),
        vec![account(4), account(1), account(2), account(3)]
    );

    assert_eq!(
        registry.unstake(account(0)),
        Err(RegistryError::NotAStaker(account(0)))
    );
}

#[test]
fn floor_blocks_validator_exit_but_not_staker_exit() {
    let (registry, transfer, bus) = make_registry();
    for i in 0..5 {
        registry.stake(account(i), VALIDATOR_THRESHOLD).unwrap();
    }

    registry.unstake(account(1)).unwrap();
    assert_eq!(registry.validators().len(), MIN_VALIDATORS);

    assert!(matches!(
        registry.unstake(account(0)),
        Err(RegistryError::BelowMinimum { .. })
    ));
    assert!(registry.is_validator(&account(0)));
    assert_eq!(registry.account_stake(&account(0)), VALIDATOR_THRESHOLD);

    let small = ether(1) / 2;
    registry.stake(account(5), small).unwrap();
    assert_eq!(registry.validators().len(), MIN_VALIDATORS);

    assert_eq!(registry.unstake(account(5)), Ok(small));
    assert_eq!(
        bus.last_event(),
        Some(RegistryEvent::Unstaked {
            account: account(5),
            amount: small
        })
    );
    assert_eq!(transfer.balance_of(&account(5)), small);
    assert_eq!(registry.validators().len(), MIN_VALIDATORS);
}

#[test]
fn half_threshold_staker_is_refunded_in_full() {
    let (registry, transfer, _) = make_registry();
    let half = VALIDATOR_THRESHOLD / 2;

    registry.stake(account(0), half).unwrap();
    assert!(!registry.is_validator(&account(0)));
    assert!(!registry.validators().contains(&account(0)));
    assert_eq!(registry.account_stake(&account(0)), half);

    assert_eq!(registry.unstake(account(0)), Ok(half));
    assert_eq!(registry.account_stake(&account(0)), 0);
    assert_eq!(registry.staked_amount(), 0);
    assert_eq!(transfer.balance_of(&account(0)), half);
}

#[test]
fn plain_transfer_stakes_like_explicit_stake() {
    let (registry, _, bus) = make_registry();
    registry
        .receive_transfer(account(0), VALIDATOR_THRESHOLD)
        .unwrap();

    assert_eq!(registry.account_stake(&account(0)), VALIDATOR_THRESHOLD);
    assert!(registry.is_validator(&account(0)));
    assert_eq!(
        bus.events(),
        vec![RegistryEvent::Staked {
            account: account(0),
            amount: VALIDATOR_THRESHOLD
        }]
    );
}

#[test]
fn validator_keys_follow_validator_order() {
    let (registry, _, _) = make_registry();
    let key = |i: u8| {
        let mut bytes = vec![0u8; 32];
        bytes[31] = i;
        BlsPublicKey::new(bytes)
    };

    for i in 0..5 {
        registry.stake(account(i), VALIDATOR_THRESHOLD).unwrap();
        registry.register_bls_public_key(account(i), key(i));
    }
    assert_eq!(
        registry.validator_bls_public_keys(),
        (0..5).map(key).collect::<Vec<_>>()
    );

    registry.unstake(account(0)).unwrap();
    assert_eq!(
        registry.validator_bls_public_keys(),
        vec![key(4), key(1), key(2), key(3)]
    );
}

#[test]
fn events_serialize_for_external_consumers() {
    let (registry, _, bus) = make_registry();
    registry.register_bls_public_key(account(1), BlsPublicKey::new(vec![0x12, 0x34]));

    let json = serde_json::to_string(&bus.events()).unwrap();
    let decoded: Vec<RegistryEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, bus.events());
}

// =============================================================================
// REENTRANCY
// =============================================================================

#[derive(Clone, Copy)]
enum NestedCall {
    Unstake,
    Stake(Amount),
}

/// Payout transfer that calls back into the registry before returning.
struct ReentrantTransfer {
    registry: OnceLock<Weak<StakingRegistryService<ReentrantTransfer, InMemoryEventBus>>>,
    nested_call: NestedCall,
    observed: Mutex<Vec<(Amount, RegistryResult<Amount>)>>,
    depth: Mutex<usize>,
}

impl ValueTransfer for ReentrantTransfer {
    fn transfer(&self, to: AccountId, _amount: Amount) -> Result<(), String> {
        {
            let mut depth = self.depth.lock().unwrap();
            if *depth > 0 {
                return Ok(());
            }
            *depth += 1;
        }

        if let Some(registry) = self.registry.get().and_then(Weak::upgrade) {
            let seen_stake = registry.account_stake(&to);
            let result = match self.nested_call {
                NestedCall::Unstake => registry.unstake(to),
                NestedCall::Stake(value) => registry.stake(to, value).map(|_| value),
            };
            self.observed.lock().unwrap().push((seen_stake, result));
        }

        *self.depth.lock().unwrap() -= 1;
        Ok(())
    }
}

fn make_reentrant_registry(
    nested_call: NestedCall,
) -> (
    Arc<StakingRegistryService<ReentrantTransfer, InMemoryEventBus>>,
    Arc<ReentrantTransfer>,
    Arc<InMemoryEventBus>,
) {
    let transfer = Arc::new(ReentrantTransfer {
        registry: OnceLock::new(),
        nested_call,
        observed: Mutex::new(Vec::new()),
        depth: Mutex::new(0),
    });
    let bus = Arc::new(InMemoryEventBus::new());
    let registry = Arc::new(
        StakingRegistryService::new(RegistryDependencies {
            config: RegistryConfig::new(MIN_VALIDATORS, MAX_VALIDATORS).unwrap(),
            transfer: transfer.clone(),
            event_bus: bus.clone(),
        })
        .unwrap(),
    );
    let _ = transfer.registry.set(Arc::downgrade(&registry));
    (registry, transfer, bus)
}

#[test]
fn reentrant_unstake_sees_committed_withdrawal() {
    let (registry, transfer, bus) = make_reentrant_registry(NestedCall::Unstake);
    for i in 0..5 {
        registry.stake(account(i), VALIDATOR_THRESHOLD).unwrap();
    }
    let total = registry.staked_amount();

    assert_eq!(registry.unstake(account(0)), Ok(VALIDATOR_THRESHOLD));

    let observed = transfer.observed.lock().unwrap().clone();
    assert_eq!(
        observed,
        vec![(0, Err(RegistryError::NotAStaker(account(0))))]
    );
    assert_eq!(registry.staked_amount(), total - VALIDATOR_THRESHOLD);
    assert_eq!(registry.validators().len(), 4);
    assert!(!registry.is_validator(&account(0)));

    let unstaked = bus
        .events()
        .into_iter()
        .filter(|e| e.name() == "Unstaked")
        .count();
    assert_eq!(unstaked, 1);
}

#[test]
fn reentrant_stake_during_payout_is_applied_once() {
    let small = ether(3);
    let (registry, transfer, _) = make_reentrant_registry(NestedCall::Stake(small));
    registry.stake(account(9), ether(5)).unwrap();

    assert_eq!(registry.unstake(account(9)), Ok(ether(5)));

    let observed = transfer.observed.lock().unwrap().clone();
    assert_eq!(observed, vec![(0, Ok(small))]);
    assert_eq!(registry.account_stake(&account(9)), small);
    assert_eq!(registry.staked_amount(), small);
}

// =============================================================================
// INVARIANTS
// =============================================================================

fn assert_invariants(registry: &Registry, accounts: &[AccountId]) {
    let validators = registry.validators();
    assert!(validators.len() <= MAX_VALIDATORS);

    let unique: HashSet<_> = validators.iter().collect();
    assert_eq!(unique.len(), validators.len(), "duplicate validator");

    for v in &validators {
        assert!(registry.is_validator(v));
        assert!(registry.account_stake(v) >= VALIDATOR_THRESHOLD);
    }
    for a in accounts {
        assert_eq!(registry.is_validator(a), unique.contains(a));
    }

    let sum: Amount = accounts.iter().map(|a| registry.account_stake(a)).sum();
    assert_eq!(registry.staked_amount(), sum);

    assert_eq!(
        registry.validator_bls_public_keys().len(),
        validators.len()
    );
}

#[test]
fn randomized_sequences_preserve_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0018);
    let accounts: Vec<AccountId> = (0..10).map(account).collect();
    let amounts = [ether(1), VALIDATOR_THRESHOLD / 2, VALIDATOR_THRESHOLD];

    for _round in 0..20 {
        let (registry, transfer, _) = make_registry();

        for _step in 0..200 {
            let who = accounts[rng.gen_range(0..accounts.len())];
            let was_validator = registry.is_validator(&who);
            let size_before = registry.validators().len();
            let balance_before = registry.account_stake(&who);

            match rng.gen_range(0..4) {
                0 => {
                    registry.register_bls_public_key(who, BlsPublicKey::new(vec![rng.gen::<u8>()]));
                }
                1 => {
                    let result = registry.unstake(who);
                    match &result {
                        Ok(amount) => {
                            assert_eq!(*amount, balance_before);
                            assert_eq!(registry.account_stake(&who), 0);
                            assert!(!registry.is_validator(&who));
                        }
                        Err(RegistryError::NotAStaker(_)) => assert_eq!(balance_before, 0),
                        Err(RegistryError::BelowMinimum { .. }) => {
                            assert!(was_validator);
                            assert!(size_before <= MIN_VALIDATORS);
                            assert_eq!(registry.account_stake(&who), balance_before);
                            assert!(registry.is_validator(&who));
                        }
                        Err(e) => panic!("unexpected unstake error: {e}"),
                    }
                }
                _ => {
                    let amount = amounts[rng.gen_range(0..amounts.len())];
                    let result = registry.stake(who, amount);
                    let crosses = balance_before + amount >= VALIDATOR_THRESHOLD;
                    match result {
                        Ok(()) => {
                            assert_eq!(registry.account_stake(&who), balance_before + amount);
                            if crosses {
                                assert!(registry.is_validator(&who));
                            }
                        }
                        Err(RegistryError::CapacityExceeded { .. }) => {
                            assert!(crosses && !was_validator && size_before == MAX_VALIDATORS);
                            assert_eq!(registry.account_stake(&who), balance_before);
                        }
                        Err(e) => panic!("unexpected stake error: {e}"),
                    }
                }
            }

            assert_invariants(&registry, &accounts);
        }

        let paid: Amount = transfer.payouts().iter().map(|(_, a)| *a).sum();
        let withdrawn: Amount = accounts.iter().map(|a| transfer.balance_of(a)).sum();
        assert_eq!(paid, withdrawn);
    }
}
