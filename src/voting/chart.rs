use super::PollService;
use crate::error::PollError;
use crate::models::{PercentBase, PollData, PollInput, PollKey, PollMethod, VoteValue};
use crate::voting::percent::PercentBaseStrategy;
use lazy_static::lazy_static;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

const LABEL_SEPARATOR: &str = " · ";

lazy_static! {
    pub static ref POLL_COLORS: HashMap<PollKey, &'static str> = {
        let mut m = HashMap::new();
        m.insert(PollKey::Yes, "#4caf50");
        m.insert(PollKey::No, "#cc6c5b");
        m.insert(PollKey::Abstain, "#a6a6a6");
        m.insert(PollKey::Votesvalid, "#e2e2e2");
        m.insert(PollKey::Votesinvalid, "#e2e2e2");
        m.insert(PollKey::Votescast, "#e2e2e2");
        m
    };
}

/// One plotted quantity across all options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub data: Vec<Option<VoteValue>>,
    pub label: String,
    pub background_color: Option<&'static str>,
    pub hover_background_color: Option<&'static str>,
}

/// Vote kinds worth plotting for this poll.
pub fn poll_data_fields(poll: PollInput<'_>) -> Vec<PollKey> {
    let data = poll.data();
    if poll.is_assignment() {
        // Elections plot what the voting method let people answer
        match data.pollmethod {
            PollMethod::YNA => vec![PollKey::Yes, PollKey::No, PollKey::Abstain],
            PollMethod::YN => vec![PollKey::Yes, PollKey::No],
            _ => vec![PollKey::Yes],
        }
    } else {
        // Motions plot what the 100% base is built from
        match data.onehundred_percent_base {
            PercentBase::YN => vec![PollKey::Yes, PollKey::No],
            PercentBase::Cast => vec![PollKey::Yes, PollKey::No, PollKey::Abstain, PollKey::Votesinvalid],
            _ => vec![PollKey::Yes, PollKey::No, PollKey::Abstain],
        }
    }
}

// A non-zero poll-level total is plotted as a single bar; anything else is read per option.
fn result_from_poll(poll: &PollData, key: PollKey) -> Vec<Option<VoteValue>> {
    match poll.value(key) {
        Some(value) if value.as_f64() != 0.0 => vec![Some(value)],
        _ => poll.options.iter().map(|option| option.value(key)).collect(),
    }
}

impl<S: PercentBaseStrategy> PollService<S> {
    pub fn generate_chart_data<'a>(&self, poll: impl Into<PollInput<'a>>) -> Vec<ChartSeries> {
        let poll = poll.into();
        let fields = poll_data_fields(poll);
        debug!("Charting fields {:?}", fields);

        fields
            .into_iter()
            .map(|key| {
                let color = POLL_COLORS.get(&key).copied();
                ChartSeries {
                    data: result_from_poll(poll.data(), key),
                    label: key.as_str().to_uppercase(),
                    background_color: color,
                    hover_background_color: color,
                }
            })
            .collect()
    }

    /// One label per option, e.g. `"Ada · Yes: 4 (40 %) · No: 6 (60 %)"`.
    ///
    /// Returns an empty list for a poll without options and fails on an option
    /// that has no voter to name.
    pub fn chart_labels<'a>(&self, poll: impl Into<PollInput<'a>>) -> Result<Vec<String>, PollError> {
        let poll = poll.into();
        let data = poll.data();
        let fields = poll_data_fields(poll);

        data.options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                // Every option needs a candidate to name the label after
                let voter = option.voter().ok_or(PollError::MissingVoter { index })?;
                let results: Vec<String> = fields
                    .iter()
                    .map(|field| {
                        let value = option.value(*field);
                        let mut label = format!(
                            "{}: {}",
                            self.verbose_poll_key(*field),
                            self.format_vote_value(value)
                        );
                        // 0 % is a real result and stays visible
                        if let Some(percent) = value
                            .and_then(VoteValue::count)
                            .and_then(|count| self.vote_value_in_percent(count, data))
                        {
                            label.push_str(&format!(" ({})", percent));
                        }
                        label
                    })
                    .collect();

                Ok(format!("{}{}{}", voter.short_name, LABEL_SEPARATOR, results.join(LABEL_SEPARATOR)))
            })
            .collect()
    }
}
