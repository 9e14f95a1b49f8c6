//! Even split of a group total across its members

use bigdecimal::BigDecimal;

use crate::types::Member;
use crate::utils::money;

/// Each member's share when `total` is split evenly `count` ways.
///
/// Returns `None` for an empty group instead of dividing by zero. The share is
/// rounded to cents, so the shares of an uneven split (100 over 3) can sum to
/// slightly less or more than the total.
pub fn per_person_share(total: &BigDecimal, count: usize) -> Option<BigDecimal> {
    if count == 0 {
        return None;
    }
    Some(money::round2(&(total / BigDecimal::from(count as u64))))
}

/// Assign every member an equal share of `total`. An empty slice is left untouched.
pub fn even_split(total: &BigDecimal, members: &mut [Member]) {
    if let Some(share) = per_person_share(total, members.len()) {
        for member in members.iter_mut() {
            member.should_pay = share.clone();
        }
    }
}
