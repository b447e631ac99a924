//! Summary statistics over the loaded member list.
//!
//! Everything here is a pure function of the member slice and is cheap enough
//! to recompute on every frame.

use serde::{Deserialize, Serialize};

use crate::models::{Gender, MemberRecord};

/// How records without a numeric age are treated when averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Missing ages count as 0 and stay in the denominator
    #[default]
    AsZero,
    /// Missing ages are left out of both numerator and denominator
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GenderBreakdown {
    pub male: usize,
    pub female: usize,
}

impl GenderBreakdown {
    pub fn get(&self, gender: Gender) -> usize {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Summary {
    pub total_count: usize,
    pub gender_count: GenderBreakdown,
    pub gender_percentage: GenderBreakdown,
    pub average_age: i64,
    pub total_fees: f64,
    pub total_deposits: f64,
    pub total_balance: f64,
}

impl Summary {
    pub fn count(&self, gender: Gender) -> usize {
        self.gender_count.get(gender)
    }

    pub fn percentage(&self, gender: Gender) -> usize {
        self.gender_percentage.get(gender)
    }
}

/// Summarize with the compatibility policy (missing ages count as zero).
pub fn summarize(members: &[MemberRecord]) -> Summary {
    summarize_with(members, MissingValuePolicy::AsZero)
}

pub fn summarize_with(members: &[MemberRecord], policy: MissingValuePolicy) -> Summary {
    let total_count = members.len();

    let count_of = |g: Gender| members.iter().filter(|m| m.gender() == Some(g)).count();
    let gender_count = GenderBreakdown {
        male: count_of(Gender::Male),
        female: count_of(Gender::Female),
    };
    let percent = |n: usize| {
        if total_count == 0 {
            0
        } else {
            round_half_up(n as f64 / total_count as f64 * 100.0) as usize
        }
    };
    let gender_percentage = GenderBreakdown {
        male: percent(gender_count.male),
        female: percent(gender_count.female),
    };

    let (age_sum, age_n) = match policy {
        MissingValuePolicy::AsZero => (
            members.iter().map(|m| m.age.whole().unwrap_or(0)).sum::<i64>(),
            total_count,
        ),
        MissingValuePolicy::Exclude => members
            .iter()
            .filter_map(|m| m.age.whole())
            .fold((0i64, 0usize), |(sum, n), age| (sum + age, n + 1)),
    };
    let average_age = if age_n == 0 {
        0
    } else {
        round_half_up(age_sum as f64 / age_n as f64)
    };

    Summary {
        total_count,
        gender_count,
        gender_percentage,
        average_age,
        total_fees: members.iter().map(|m| m.camp_fee.value_or_zero()).sum(),
        total_deposits: members.iter().map(|m| m.deposit_paid.value_or_zero()).sum(),
        total_balance: members.iter().map(|m| m.balance.value_or_zero()).sum(),
    }
}

/// Round with halves going towards positive infinity (2.5 -> 3, -2.5 -> -2).
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Numeric;

    fn member(
        name: &str,
        gender: &str,
        age: &str,
        fee: &str,
        deposit: &str,
        balance: &str,
    ) -> MemberRecord {
        MemberRecord {
            full_name: Some(name.to_string()),
            gender: Some(gender.to_string()),
            age: Numeric::parse(age),
            camp_fee: Numeric::parse(fee),
            deposit_paid: Numeric::parse(deposit),
            balance: Numeric::parse(balance),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_list_has_no_division_by_zero() {
        let s = summarize(&[]);
        assert_eq!(s.total_count, 0);
        assert_eq!(s.percentage(Gender::Male), 0);
        assert_eq!(s.percentage(Gender::Female), 0);
        assert_eq!(s.average_age, 0);
        assert_eq!(s.total_fees, 0.0);
    }

    #[test]
    fn test_two_member_scenario() {
        let members = vec![
            member("Alice", "Male", "20", "5000", "2000", "3000"),
            member("Beth", "Female", "30", "5000", "5000", "0"),
        ];
        let s = summarize(&members);
        assert_eq!(s.total_count, 2);
        assert_eq!(s.count(Gender::Male), 1);
        assert_eq!(s.count(Gender::Female), 1);
        assert_eq!(s.percentage(Gender::Male), 50);
        assert_eq!(s.percentage(Gender::Female), 50);
        assert_eq!(s.average_age, 25);
        assert_eq!(s.total_fees, 10000.0);
        assert_eq!(s.total_deposits, 7000.0);
        assert_eq!(s.total_balance, 3000.0);
    }

    #[test]
    fn test_unclassified_gender_counts_only_in_total() {
        let members = vec![
            member("A", "Male", "20", "", "", ""),
            member("B", "", "20", "", "", ""),
            member("C", "male", "20", "", "", ""),
        ];
        let s = summarize(&members);
        assert_eq!(s.total_count, 3);
        assert_eq!(s.count(Gender::Male), 1);
        assert_eq!(s.count(Gender::Female), 0);
        assert_eq!(s.percentage(Gender::Male), 33);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 1 of 8 = 12.5%
        let mut members = vec![member("M", "Male", "", "", "", "")];
        for _ in 0..7 {
            members.push(member("F", "Female", "", "", "", ""));
        }
        let s = summarize(&members);
        assert_eq!(s.percentage(Gender::Male), 13);
        assert_eq!(s.percentage(Gender::Female), 88);
    }

    #[test]
    fn test_missing_age_counts_as_zero_by_default() {
        let members = vec![
            member("A", "Male", "30", "", "", ""),
            member("B", "Male", "", "", "", ""),
        ];
        assert_eq!(summarize(&members).average_age, 15);
        assert_eq!(
            summarize_with(&members, MissingValuePolicy::Exclude).average_age,
            30
        );
    }

    #[test]
    fn test_exclude_policy_with_no_ages() {
        let members = vec![member("A", "Male", "", "", "", "")];
        assert_eq!(
            summarize_with(&members, MissingValuePolicy::Exclude).average_age,
            0
        );
    }

    #[test]
    fn test_balance_is_trusted_not_recomputed() {
        let members = vec![member("A", "Male", "20", "5000", "1000", "999")];
        assert_eq!(summarize(&members).total_balance, 999.0);
    }

    #[test]
    fn test_invalid_amounts_count_as_zero() {
        let members = vec![
            member("A", "Male", "abc", "5000.50", "n/a", ""),
            member("B", "Female", "21", "2500.25", "100", ""),
        ];
        let s = summarize(&members);
        assert!((s.total_fees - 7500.75).abs() < 1e-9);
        assert_eq!(s.total_deposits, 100.0);
        assert_eq!(s.average_age, 11); // (0 + 21) / 2 = 10.5
    }
}
