//! Randomized Policy Properties.
//!
//! Runs arbitrary sequences of fills, hits and invalidations against arbitrary
//! valid tables and checks the properties that must hold after every step:
//! - ranks stay within `0..=ways` and the store stays well formed,
//! - a single fill or hit ages every other way by at most one,
//! - repeating a hit changes nothing,
//! - a just-filled line is never chosen over a strictly higher-ranked way,
//! - invalidation never changes a rank,
//! - the all-zero table evicts exactly what a reference LRU stack would.

use ipv_policy::cache::policies::{IpvPolicy, ReplacementPolicy};
use ipv_policy::PolicyConfig;
use proptest::prelude::*;

use crate::common::harness::TestContext;

#[derive(Debug, Clone, Copy)]
enum Op {
    Reset(usize),
    Touch(usize),
    Invalidate(usize),
}

fn op(ways: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ways).prop_map(Op::Reset),
        (0..ways).prop_map(Op::Touch),
        (0..ways).prop_map(Op::Invalidate),
    ]
}

/// `(table, ops)` for a random associativity in `1..=16`.
fn scenario() -> impl Strategy<Value = (Vec<u64>, Vec<Op>)> {
    (1usize..=16).prop_flat_map(|ways| {
        (
            prop::collection::vec(0..ways as u64, ways + 1),
            prop::collection::vec(op(ways), 0..96),
        )
    })
}

fn apply(ctx: &mut TestContext, op: Op) {
    match op {
        Op::Reset(slot) => ctx.reset(0, slot),
        Op::Touch(slot) => ctx.touch(0, slot),
        Op::Invalidate(slot) => ctx.invalidate(0, slot),
    }
}

proptest! {
    #[test]
    fn ranks_stay_bounded((table, ops) in scenario()) {
        let ways = table.len() as u64 - 1;
        let mut ctx = TestContext::new(1, &table);
        for op in ops {
            apply(&mut ctx, op);
            prop_assert_eq!(ctx.policy.check_invariants(), Ok(()));
            prop_assert!(ctx.ranks(0).iter().all(|&r| r <= ways));
        }
    }

    #[test]
    fn other_ways_age_by_at_most_one((table, ops) in scenario()) {
        let mut ctx = TestContext::new(1, &table);
        for op in ops {
            let before = ctx.ranks(0);
            apply(&mut ctx, op);
            let after = ctx.ranks(0);
            let target = match op {
                Op::Reset(slot) | Op::Touch(slot) | Op::Invalidate(slot) => slot,
            };
            for (slot, (old, new)) in before.iter().zip(&after).enumerate() {
                if slot != target {
                    prop_assert!(new == old || *new == old + 1, "slot {} went {} -> {}", slot, old, new);
                }
            }
        }
    }

    #[test]
    fn repeated_touch_is_idempotent((table, ops) in scenario(), pick in any::<prop::sample::Index>()) {
        let ways = table.len() - 1;
        let mut ctx = TestContext::new(1, &table);
        for op in ops {
            apply(&mut ctx, op);
        }
        let slot = pick.index(ways);
        ctx.touch(0, slot);
        let once = ctx.ranks(0);
        prop_assert_eq!(ctx.policy.rank(ctx.line(0, slot)), table[slot]);
        ctx.touch(0, slot);
        prop_assert_eq!(ctx.ranks(0), once);
    }

    #[test]
    fn reset_line_loses_to_any_higher_rank((table, ops) in scenario(), pick in any::<prop::sample::Index>()) {
        let ways = table.len() - 1;
        let mut ctx = TestContext::new(1, &table);
        for op in ops {
            apply(&mut ctx, op);
        }
        let slot = pick.index(ways);
        ctx.reset(0, slot);
        let ranks = ctx.ranks(0);
        let victim = ctx.victim(0);
        prop_assert_eq!(Some(&ranks[victim]), ranks.iter().max());
        if victim == slot {
            prop_assert!(ranks.iter().all(|&r| r <= ranks[slot]));
        }
    }

    #[test]
    fn invalidate_never_changes_ranks((table, ops) in scenario()) {
        let mut ctx = TestContext::new(1, &table);
        for op in ops {
            let before = ctx.ranks(0);
            apply(&mut ctx, op);
            if let Op::Invalidate(_) = op {
                prop_assert_eq!(ctx.ranks(0), before);
            }
        }
    }

    /// Driver-shaped traffic: hits touch a line, misses evict the victim and
    /// refill it. With the all-zero table the victim is always the tail of a
    /// reference LRU stack.
    #[test]
    fn lru_table_matches_reference_stack(
        ways in 1usize..=16,
        hits in prop::collection::vec(prop::option::of(any::<prop::sample::Index>()), 0..128),
    ) {
        let config = PolicyConfig::new(1, ways, vec![0; ways + 1]);
        let mut policy = match IpvPolicy::new(&config) {
            Ok(p) => p,
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        };
        let lines = policy.instantiate_all().remove(0);

        // Warm up: fill every way once, MRU at the front of the stack.
        let mut stack: Vec<usize> = Vec::with_capacity(ways);
        for line in &lines {
            policy.reset(*line);
            stack.insert(0, line.slot());
        }

        for access in hits {
            let slot = match access {
                Some(index) => {
                    let slot = index.index(ways);
                    policy.touch(lines[slot]);
                    slot
                }
                None => {
                    let victim = policy.get_victim(&lines).slot();
                    prop_assert_eq!(Some(&victim), stack.last());
                    policy.reset(lines[victim]);
                    victim
                }
            };
            stack.retain(|&s| s != slot);
            stack.insert(0, slot);
        }
        prop_assert_eq!(Some(&policy.get_victim(&lines).slot()), stack.last());
    }
}
