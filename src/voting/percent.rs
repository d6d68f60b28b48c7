use crate::models::{MajorityMethod, PercentBase, PollData, VoteValue};
use rust_decimal::{Decimal, RoundingStrategy};

pub const PERCENT_DECIMAL_PLACES: usize = 3;

/// Poll-class specific choice of the 100% denominator and of new-poll defaults.
pub trait PercentBaseStrategy {
    /// Total that represents 100% for this poll, if the configured base is computable.
    fn percent_base(&self, poll: &PollData) -> Option<f64>;

    fn default_percent_base(&self) -> PercentBase;

    fn default_majority_method(&self) -> MajorityMethod;

    fn default_group_ids(&self) -> Vec<u64>;
}

/// Motion polls carry exactly one option holding yes/no/abstain.
#[derive(Debug, Clone)]
pub struct MotionPolls {
    pub percent_base: PercentBase,
    pub majority_method: MajorityMethod,
    pub group_ids: Vec<u64>,
}

impl Default for MotionPolls {
    fn default() -> Self {
        Self {
            percent_base: PercentBase::YNA,
            majority_method: MajorityMethod::Simple,
            group_ids: Vec::new(),
        }
    }
}

fn sum_non_negative(values: &[Option<VoteValue>]) -> Option<f64> {
    values
        .iter()
        .copied()
        .map(|value| value.and_then(VoteValue::non_negative))
        .sum()
}

impl PercentBaseStrategy for MotionPolls {
    fn percent_base(&self, poll: &PollData) -> Option<f64> {
        // Motion results live on the single option
        let option = poll.options.first()?;
        // Any sentinel among the summands makes the base unknown
        match poll.onehundred_percent_base {
            PercentBase::YN => sum_non_negative(&[option.yes, option.no]),
            PercentBase::YNA => sum_non_negative(&[option.yes, option.no, option.abstain]),
            PercentBase::Valid => {
                // Valid votes only count once the option itself is fully documented
                sum_non_negative(&[option.yes, option.no, option.abstain])?;
                poll.votesvalid.and_then(VoteValue::count)
            }
            PercentBase::Cast => poll.votescast.and_then(VoteValue::count),
            _ => None,
        }
    }

    fn default_percent_base(&self) -> PercentBase {
        self.percent_base
    }

    fn default_majority_method(&self) -> MajorityMethod {
        self.majority_method
    }

    fn default_group_ids(&self) -> Vec<u64> {
        self.group_ids.clone()
    }
}

/// Assignment polls carry one option per candidate.
#[derive(Debug, Clone)]
pub struct AssignmentPolls {
    pub percent_base: PercentBase,
    pub majority_method: MajorityMethod,
    pub group_ids: Vec<u64>,
}

impl Default for AssignmentPolls {
    fn default() -> Self {
        Self {
            percent_base: PercentBase::YN,
            majority_method: MajorityMethod::Disabled,
            group_ids: Vec::new(),
        }
    }
}

impl PercentBaseStrategy for AssignmentPolls {
    fn percent_base(&self, poll: &PollData) -> Option<f64> {
        // Sentinels are skipped here instead of poisoning the whole sum
        let count = |value: Option<VoteValue>| value.and_then(VoteValue::non_negative).unwrap_or(0.0);
        let total: f64 = match poll.onehundred_percent_base {
            PercentBase::YN => poll
                .options
                .iter()
                .map(|option| count(option.yes) + count(option.no))
                .sum(),
            PercentBase::YNA => poll
                .options
                .iter()
                .map(|option| count(option.yes) + count(option.no) + count(option.abstain))
                .sum(),
            PercentBase::Y => {
                poll.options.iter().map(|option| count(option.yes)).sum::<f64>()
                    + count(poll.amount_global_no)
                    + count(poll.amount_global_abstain)
            }
            PercentBase::Valid => return poll.votesvalid.and_then(VoteValue::count),
            PercentBase::Cast => return poll.votescast.and_then(VoteValue::count),
            PercentBase::Entitled => return poll.entitled_users_at_stop.as_ref().map(|users| users.len() as f64),
            PercentBase::Disabled => return None,
        };
        Some(total)
    }

    fn default_percent_base(&self) -> PercentBase {
        self.percent_base
    }

    fn default_majority_method(&self) -> MajorityMethod {
        self.majority_method
    }

    fn default_group_ids(&self) -> Vec<u64> {
        self.group_ids.clone()
    }
}

/// Renders a percentage: whole numbers as-is, everything else to three places.
///
/// Ties at the fourth place round up (`12.0625` → `12.063`), which is what the
/// web client shows for the same numbers.
pub fn format_percent(percent: f64) -> Option<String> {
    // NaN fails this comparison too
    if !(percent >= 0.0) {
        return None;
    }
    if percent.fract() == 0.0 {
        return Some(format!("{} %", percent));
    }

    // Decimal keeps the exact binary value, so only true ties round up
    match Decimal::from_f64_retain(percent) {
        Some(exact) => {
            let rounded = exact.round_dp_with_strategy(
                PERCENT_DECIMAL_PLACES as u32,
                RoundingStrategy::MidpointAwayFromZero,
            );
            Some(format!("{:.*} %", PERCENT_DECIMAL_PLACES, rounded))
        }
        None => Some(format!("{:.*} %", PERCENT_DECIMAL_PLACES, percent)),
    }
}

/// `value` as a share of `total`, or `None` when no meaningful share exists.
pub fn percent_of(value: f64, total: Option<f64>) -> Option<String> {
    let total = total.filter(|total| *total > 0.0)?;
    format_percent(value / total * 100.0)
}
