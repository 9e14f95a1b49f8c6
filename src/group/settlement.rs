//! Who-owes-whom settlement for a shared expense group
//!
//! Settlement runs in one of two modes:
//!
//! - **Collection**: members together have not paid in the group total (or paid
//!   in more than it). Every member short of their share owes the group pot,
//!   and inter-member imbalances are not netted.
//! - **Netting**: the group total has been collected. Members who overpaid are
//!   repaid by members who underpaid, using a greedy two-pointer match over
//!   members sorted by net balance.
//!
//! Every amount is rounded to cents after each arithmetic step and compared
//! with a one-cent tolerance. Settlements are never cached; they are
//! recomputed from the group each time.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{Group, Transfer};
use crate::utils::money;

/// Overall state of a group's balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementStatus {
    /// Everyone has paid exactly their share
    Settled,
    /// The total is collected but members must repay each other
    NeedsTransfers,
    /// Members have paid in less than the group total
    UnderCollected,
    /// Members have paid in more than the group total
    OverCollected,
}

/// Result of settling a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub status: SettlementStatus,
    /// Transfers in the order they were matched
    pub transfers: Vec<Transfer>,
    /// False when netting stopped at its iteration cap with balances left over
    pub converged: bool,
}

impl Settlement {
    fn complete(status: SettlementStatus, transfers: Vec<Transfer>) -> Self {
        Self {
            status,
            transfers,
            converged: true,
        }
    }

    /// True when no money needs to move
    pub fn is_settled(&self) -> bool {
        self.status == SettlementStatus::Settled
    }
}

/// Working copy of a member's balance during netting
#[derive(Debug, Clone)]
struct NetBalance<'a> {
    name: &'a str,
    net: BigDecimal,
}

/// Settlement calculation service
#[derive(Debug, Clone)]
pub struct SettlementCalculator {
    tolerance: BigDecimal,
    max_iterations: Option<usize>,
}

impl Default for SettlementCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl SettlementCalculator {
    /// Calculator with the standard one-cent tolerance
    pub fn new() -> Self {
        Self {
            tolerance: money::cent(),
            max_iterations: None,
        }
    }

    /// Calculator with a custom comparison tolerance.
    ///
    /// Amounts are rounded to cents, so a tolerance below one cent could never
    /// treat a balance as cleared; it is raised to one cent.
    pub fn with_tolerance(tolerance: BigDecimal) -> Self {
        Self {
            tolerance: tolerance.abs().max(money::cent()),
            max_iterations: None,
        }
    }

    /// Cap the number of matching steps netting may take. Without a cap the
    /// limit is the square of the member count.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Comparison tolerance in use
    pub fn tolerance(&self) -> &BigDecimal {
        &self.tolerance
    }

    /// Settle a group. The group is only read; the netting works on a copy.
    ///
    /// Member names and a positive total are the caller's responsibility; the
    /// calculator accepts any group and never fails.
    pub fn settle(&self, group: &Group) -> Settlement {
        let total_paid = group.total_paid();
        let total_amount = money::round2(&group.total_amount);
        let difference = money::round2(&(&total_paid - &total_amount));

        if difference.abs() > self.tolerance {
            let status = if total_paid < total_amount {
                SettlementStatus::UnderCollected
            } else {
                SettlementStatus::OverCollected
            };
            tracing::debug!(
                group_id = %group.id,
                %total_paid,
                %total_amount,
                ?status,
                "group not fully collected, settling against the group pot"
            );
            return Settlement::complete(status, self.collection_transfers(group));
        }

        self.net_members(group)
    }

    /// Members short of their share each owe the group the shortfall
    fn collection_transfers(&self, group: &Group) -> Vec<Transfer> {
        let owing = -self.tolerance.clone();
        group
            .members
            .iter()
            .filter_map(|member| {
                let net = member.net();
                (net < owing).then(|| Transfer::to_group(&member.name, net.abs()))
            })
            .collect()
    }

    /// Greedy two-pointer netting between creditors and debtors
    fn net_members(&self, group: &Group) -> Settlement {
        let mut balances: Vec<NetBalance<'_>> = group
            .members
            .iter()
            .map(|m| NetBalance {
                name: &m.name,
                net: m.net(),
            })
            .collect();

        if balances
            .iter()
            .all(|b| money::is_negligible(&b.net, &self.tolerance))
        {
            return Settlement::complete(SettlementStatus::Settled, Vec::new());
        }

        // Stable: equal nets keep their input order.
        balances.sort_by(|a, b| b.net.cmp(&a.net));

        let mut transfers = Vec::new();
        let max_iterations = self.max_iterations.unwrap_or(balances.len() * balances.len());
        let mut iterations = 0;
        let mut i = 0;
        let mut j = balances.len() - 1;

        while i < j && iterations < max_iterations {
            if money::is_negligible(&balances[i].net, &self.tolerance) {
                i += 1;
                continue;
            }
            if money::is_negligible(&balances[j].net, &self.tolerance) {
                j -= 1;
                continue;
            }

            let amount = money::round2(&balances[i].net.abs().min(balances[j].net.abs()));
            if amount > BigDecimal::from(0) {
                transfers.push(Transfer::to_member(
                    balances[j].name,
                    balances[i].name,
                    amount.clone(),
                ));
                balances[i].net = money::round2(&(&balances[i].net - &amount));
                balances[j].net = money::round2(&(&balances[j].net + &amount));
            }

            if money::is_negligible(&balances[i].net, &self.tolerance) {
                i += 1;
            }
            if money::is_negligible(&balances[j].net, &self.tolerance) {
                j -= 1;
            }

            iterations += 1;
        }

        let converged = i >= j
            || balances[i..=j]
                .iter()
                .all(|b| money::is_negligible(&b.net, &self.tolerance));
        if !converged {
            let residual: Vec<String> = balances
                .iter()
                .filter(|b| !money::is_negligible(&b.net, &self.tolerance))
                .map(|b| format!("{}={}", b.name, b.net))
                .collect();
            tracing::warn!(
                group_id = %group.id,
                iterations,
                residual = ?residual,
                "settlement did not fully converge"
            );
        }

        Settlement {
            status: SettlementStatus::NeedsTransfers,
            transfers,
            converged,
        }
    }
}

/// Settle a group with the default calculator and return only the transfers
pub fn compute_settlement(group: &Group) -> Vec<Transfer> {
    SettlementCalculator::new().settle(group).transfers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Member, TransferTarget};

    /// Group whose members split the total evenly, with the given paid amounts in cents
    fn even_group(total_cents: i64, paid: &[(&str, i64)]) -> Group {
        let share = if paid.is_empty() {
            money::zero()
        } else {
            money::round2(&(money::cents(total_cents) / BigDecimal::from(paid.len() as u64)))
        };
        let members = paid
            .iter()
            .map(|(name, cents)| {
                Member::with_share(
                    name.to_lowercase(),
                    name.to_string(),
                    money::cents(*cents),
                    share.clone(),
                )
            })
            .collect();
        Group::new(
            "g1".to_string(),
            "Test".to_string(),
            String::new(),
            money::cents(total_cents),
            members,
        )
    }

    fn member_transfer(from: &str, to: &str, cents: i64) -> Transfer {
        Transfer::to_member(from, to, money::cents(cents))
    }

    #[test]
    fn test_one_payer_covers_everything() {
        let group = even_group(10000, &[("A", 10000), ("B", 0)]);
        let settlement = SettlementCalculator::new().settle(&group);

        assert_eq!(settlement.status, SettlementStatus::NeedsTransfers);
        assert!(settlement.converged);
        assert_eq!(settlement.transfers, vec![member_transfer("B", "A", 5000)]);
    }

    #[test]
    fn test_under_collected_group_owes_the_pot() {
        let group = even_group(9000, &[("A", 3000), ("B", 2000), ("C", 0)]);
        let settlement = SettlementCalculator::new().settle(&group);

        assert_eq!(settlement.status, SettlementStatus::UnderCollected);
        assert_eq!(
            settlement.transfers,
            vec![
                Transfer::to_group("B", money::cents(1000)),
                Transfer::to_group("C", money::cents(3000)),
            ]
        );
    }

    #[test]
    fn test_overpayer_repaid_by_nonpayer() {
        let group = even_group(6000, &[("A", 4000), ("B", 2000), ("C", 0)]);
        assert_eq!(
            compute_settlement(&group),
            vec![member_transfer("C", "A", 2000)]
        );
    }

    #[test]
    fn test_under_collection_ignores_member_imbalance() {
        // A overpaid relative to B, but the pot is still short.
        let group = even_group(10000, &[("A", 6000), ("B", 1000)]);
        let transfers = compute_settlement(&group);

        assert_eq!(transfers, vec![Transfer::to_group("B", money::cents(4000))]);
        assert!(transfers.iter().all(|t| t.to == TransferTarget::Group));
    }

    #[test]
    fn test_over_collected_group_is_flagged() {
        let group = even_group(6000, &[("A", 5000), ("B", 2000)]);
        let settlement = SettlementCalculator::new().settle(&group);

        // B is still short of their share even though the pot holds too much.
        assert_eq!(settlement.status, SettlementStatus::OverCollected);
        assert_eq!(
            settlement.transfers,
            vec![Transfer::to_group("B", money::cents(1000))]
        );
    }

    #[test]
    fn test_balanced_group_is_settled() {
        let group = even_group(9000, &[("A", 3000), ("B", 3000), ("C", 3000)]);
        let settlement = SettlementCalculator::new().settle(&group);

        assert!(settlement.is_settled());
        assert!(settlement.transfers.is_empty());
    }

    #[test]
    fn test_empty_and_zero_groups() {
        let empty = even_group(0, &[]);
        assert!(compute_settlement(&empty).is_empty());

        let zero = even_group(0, &[("A", 0), ("B", 0)]);
        assert!(SettlementCalculator::new().settle(&zero).is_settled());
    }

    #[test]
    fn test_single_member_always_settles() {
        let group = even_group(4250, &[("Solo", 4250)]);
        assert!(compute_settlement(&group).is_empty());
    }

    #[test]
    fn test_uneven_split_drift_within_tolerance() {
        // 100 over 3 is 33.33 each, so the shares sum to 99.99.
        let group = even_group(10000, &[("A", 10000), ("B", 0), ("C", 0)]);
        let transfers = compute_settlement(&group);

        assert_eq!(
            transfers,
            vec![
                member_transfer("C", "A", 3333),
                member_transfer("B", "A", 3333),
            ]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let group = even_group(
            12000,
            &[("A", 6000), ("B", 6000), ("C", 0), ("D", 0)],
        );
        let transfers = compute_settlement(&group);

        // Creditors A then B; debtors walked from the end: D then C.
        assert_eq!(
            transfers,
            vec![
                member_transfer("D", "A", 3000),
                member_transfer("C", "B", 3000),
            ]
        );
    }

    #[test]
    fn test_partial_debts_split_across_creditors() {
        let group = even_group(
            12000,
            &[("A", 7000), ("B", 5000), ("C", 0), ("D", 0)],
        );
        let transfers = compute_settlement(&group);

        assert_eq!(
            transfers,
            vec![
                member_transfer("D", "A", 3000),
                member_transfer("C", "A", 1000),
                member_transfer("C", "B", 2000),
            ]
        );
    }

    #[test]
    fn test_transfers_clear_every_balance() {
        let group = even_group(
            25000,
            &[("A", 11000), ("B", 2500), ("C", 9000), ("D", 0), ("E", 2500)],
        );
        let transfers = compute_settlement(&group);
        assert!(!transfers.is_empty());

        for member in &group.members {
            let mut net = member.net();
            for transfer in &transfers {
                if transfer.from == member.name {
                    net += &transfer.amount;
                }
                if transfer.to == TransferTarget::Member(member.name.clone()) {
                    net -= &transfer.amount;
                }
            }
            assert!(
                money::is_negligible(&net, &money::cent()),
                "{} left with {}",
                member.name,
                net
            );
        }
    }

    #[test]
    fn test_settle_is_idempotent_and_leaves_input_untouched() {
        let group = even_group(6000, &[("A", 4000), ("B", 2000), ("C", 0)]);
        let snapshot = group.clone();
        let calculator = SettlementCalculator::new();

        let first = calculator.settle(&group);
        let second = calculator.settle(&group);

        assert_eq!(first, second);
        assert_eq!(group, snapshot);
    }

    #[test]
    fn test_custom_tolerance() {
        // Paid 59.95 of 60.00: within a ten-cent tolerance, so netting runs.
        let group = even_group(6000, &[("A", 3995), ("B", 2000)]);

        let strict = SettlementCalculator::new().settle(&group);
        assert_eq!(strict.status, SettlementStatus::UnderCollected);

        let loose = SettlementCalculator::with_tolerance(money::cents(10)).settle(&group);
        assert_eq!(loose.status, SettlementStatus::NeedsTransfers);
        assert_eq!(loose.transfers, vec![member_transfer("B", "A", 995)]);
    }

    #[test]
    fn test_sub_cent_tolerance_is_raised_to_a_cent() {
        for tolerance in [
            BigDecimal::from(0),
            "0.001".parse().unwrap(),
            "-0.005".parse().unwrap(),
        ] {
            let calculator = SettlementCalculator::with_tolerance(tolerance);
            assert_eq!(calculator.tolerance(), &money::cent());

            let owed = calculator.settle(&even_group(10000, &[("A", 10000), ("B", 0)]));
            assert_eq!(owed.status, SettlementStatus::NeedsTransfers);
            assert!(owed.converged);
            assert_eq!(owed.transfers, vec![member_transfer("B", "A", 5000)]);

            let balanced = calculator.settle(&even_group(10000, &[("A", 5000), ("B", 5000)]));
            assert!(balanced.is_settled());
            assert!(balanced.converged);
        }
    }

    #[test]
    fn test_iteration_cap_reports_partial_settlement() {
        let group = even_group(
            12000,
            &[("A", 7000), ("B", 5000), ("C", 0), ("D", 0)],
        );
        let calculator = SettlementCalculator::with_tolerance(money::cents(5)).with_max_iterations(1);
        let settlement = calculator.settle(&group);

        assert_eq!(settlement.status, SettlementStatus::NeedsTransfers);
        assert!(!settlement.converged);
        assert_eq!(settlement.transfers, vec![member_transfer("D", "A", 3000)]);

        // The default cap leaves room to finish the same group.
        assert!(SettlementCalculator::new().settle(&group).converged);
    }

    #[test]
    fn test_drift_residue_still_counts_as_converged() {
        let group = even_group(10000, &[("A", 10000), ("B", 0), ("C", 0)]);
        let settlement = SettlementCalculator::new().with_max_iterations(2).settle(&group);

        assert_eq!(settlement.transfers.len(), 2);
        assert!(settlement.converged);
    }
}
