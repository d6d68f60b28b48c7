use super::{PollService, is_vote_documented};
use crate::models::{PercentBase, PollData, PollKey, VoteValue};
use crate::voting::percent::PercentBaseStrategy;
use serde::Serialize;

/// One displayable quantity of a poll result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VotingResult {
    pub vote: PollKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<VoteValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    pub hide: bool,
    pub show_percent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<String>,
}

impl VotingResult {
    fn row(vote: PollKey, icon: Option<&'static str>, hide: bool, show_percent: bool) -> Self {
        Self {
            vote,
            amount: None,
            icon,
            hide,
            show_percent,
            percent: None,
        }
    }
}

/// A line of the result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollTableData {
    pub voting_option: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_option_subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub value: Vec<VotingResult>,
}

fn show_abstain_percent(poll: &PollData) -> bool {
    matches!(
        poll.onehundred_percent_base,
        PercentBase::YNA | PercentBase::Valid | PercentBase::Cast
    )
}

pub fn show_percent_of_valid_or_cast(poll: &PollData) -> bool {
    matches!(poll.onehundred_percent_base, PercentBase::Valid | PercentBase::Cast)
}

/// Yes/No/Abstain rows in display order.
pub fn vote_table_keys(poll: &PollData) -> Vec<VotingResult> {
    vec![
        VotingResult::row(PollKey::Yes, Some("thumb_up"), false, true),
        VotingResult::row(PollKey::No, Some("thumb_down"), false, true),
        VotingResult::row(PollKey::Abstain, Some("trip_origin"), false, show_abstain_percent(poll)),
    ]
}

/// Valid/Invalid/Cast total rows. Invalid and cast only exist for analog polls.
pub fn sum_table_keys(poll: &PollData) -> Vec<VotingResult> {
    let undocumented = |value: Option<VoteValue>| value == Some(VoteValue::Undocumented);
    let cast_base = poll.onehundred_percent_base == PercentBase::Cast;

    vec![
        VotingResult::row(
            PollKey::Votesvalid,
            None,
            undocumented(poll.votesvalid),
            show_percent_of_valid_or_cast(poll),
        ),
        VotingResult::row(
            PollKey::Votesinvalid,
            Some("not_interested"),
            undocumented(poll.votesinvalid) || !poll.is_analog(),
            cast_base,
        ),
        VotingResult::row(
            PollKey::Votescast,
            None,
            undocumented(poll.votescast) || !poll.is_analog(),
            cast_base,
        ),
    ]
}

impl<S: PercentBaseStrategy> PollService<S> {
    /// Result table with amounts filled in. Rows that are hidden or whose
    /// amount was never documented are left out.
    pub fn generate_table_data(&self, poll: &PollData) -> Vec<PollTableData> {
        let mut table = Vec::new();

        // One yes/no/abstain block per option, named after its candidate if any
        for option in &poll.options {
            let subtitle = option.voter().map(|voter| voter.short_name.clone());
            for key in vote_table_keys(poll) {
                let amount = option.value(key.vote);
                table.push(self.table_entry(poll, key, amount, subtitle.clone(), None));
            }
        }
        // Totals come from the poll itself, not from an option
        for key in sum_table_keys(poll) {
            let amount = poll.value(key.vote);
            table.push(self.table_entry(poll, key, amount, None, Some("sums".to_string())));
        }

        // Drop hidden rows and rows whose amount was never recorded (zero stays)
        table.retain(|line| {
            line.value
                .iter()
                .all(|result| !result.hide && is_vote_documented(result.amount))
        });
        table
    }

    fn table_entry(
        &self,
        poll: &PollData,
        mut result: VotingResult,
        amount: Option<VoteValue>,
        subtitle: Option<String>,
        class: Option<String>,
    ) -> PollTableData {
        result.amount = amount;
        // Sentinels never get a percentage, only real counts do
        if result.show_percent {
            result.percent = amount
                .and_then(VoteValue::count)
                .and_then(|count| self.vote_value_in_percent(count, poll));
        }
        PollTableData {
            voting_option: result.vote.as_str().to_string(),
            voting_option_subtitle: subtitle,
            class,
            value: vec![result],
        }
    }
}
