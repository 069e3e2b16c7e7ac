use daren_core::split::{split_purchase, tally};
use proptest::prelude::*;

// Distinct debtor ids, in arbitrary order
fn arb_debtors() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::hash_set(1i64..10_000, 0..20)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    /// Property: shares always add back up to the purchase total
    #[test]
    fn prop_shares_sum_to_total(total in 0i64..100_000_000, payer in 1i64..10_000, debtors in arb_debtors()) {
        let shares = split_purchase(payer, total, &debtors).unwrap();
        prop_assert_eq!(shares.iter().map(|s| s.amount).sum::<i64>(), total);
    }

    /// Property: one share per debtor, in the order given
    #[test]
    fn prop_shares_follow_debtor_order(total in 0i64..1_000_000, debtors in arb_debtors()) {
        prop_assume!(!debtors.is_empty());

        let shares = split_purchase(1, total, &debtors).unwrap();
        let ids: Vec<i64> = shares.iter().map(|s| s.participant_id).collect();
        prop_assert_eq!(ids, debtors);
    }

    /// Property: non-first shares are equal and the first differs by less than the debtor count
    #[test]
    fn prop_split_is_even_up_to_remainder(total in 0i64..1_000_000, debtors in arb_debtors()) {
        prop_assume!(debtors.len() > 1);

        let shares = split_purchase(1, total, &debtors).unwrap();
        let base = shares[1].amount;
        prop_assert!(shares[1..].iter().all(|s| s.amount == base));

        let extra = shares[0].amount - base;
        prop_assert!(extra >= 0);
        prop_assert!(extra < debtors.len() as i64);
    }

    /// Property: when every purchase is split fully, net balances cancel out
    #[test]
    fn prop_tally_nets_to_zero(
        purchases in prop::collection::vec((1i64..6, 0i64..50_000, arb_debtors()), 0..15)
    ) {
        let mut paid = Vec::new();
        let mut owed = Vec::new();

        for (payer, total, debtors) in purchases {
            // keep debtor ids within the same small pool as payers
            let debtors: Vec<i64> = debtors.into_iter().filter(|d| *d < 6).collect();
            let shares = split_purchase(payer, total, &debtors).unwrap();
            paid.push((payer, total));
            owed.extend(shares.into_iter().map(|s| (s.participant_id, s.amount)));
        }

        let balances = tally(paid, owed).unwrap();
        prop_assert_eq!(balances.values().map(|b| b.net).sum::<i64>(), 0);
        for balance in balances.values() {
            prop_assert_eq!(balance.net, balance.paid - balance.owed);
        }
    }
}
