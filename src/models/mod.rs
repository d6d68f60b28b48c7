use serde::{Deserialize, Deserializer, Serialize};

/// Wire value marking a count that was not taken because the option passed by obvious majority.
pub const VOTE_MAJORITY: f64 = -1.0;
/// Wire value marking a count that was never recorded.
pub const VOTE_UNDOCUMENTED: f64 = -2.0;

/// A single vote count as stored on a poll or option.
///
/// Counts travel as plain numbers; the two negative sentinels are decoded into
/// their own variants so a missing record can never be mistaken for zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub enum VoteValue {
    Count(f64),
    Majority,
    Undocumented,
}

impl VoteValue {
    /// The plain count, if this value is one.
    pub fn count(self) -> Option<f64> {
        match self {
            VoteValue::Count(value) => Some(value),
            _ => None,
        }
    }

    /// Non-negative counts only; sentinels and stray negatives yield `None`.
    pub fn non_negative(self) -> Option<f64> {
        self.count().filter(|value| *value >= 0.0)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self)
    }
}

impl From<f64> for VoteValue {
    fn from(value: f64) -> Self {
        if value == VOTE_UNDOCUMENTED {
            VoteValue::Undocumented
        } else if value == VOTE_MAJORITY {
            VoteValue::Majority
        } else {
            VoteValue::Count(value)
        }
    }
}

impl From<VoteValue> for f64 {
    fn from(value: VoteValue) -> Self {
        match value {
            VoteValue::Count(count) => count,
            VoteValue::Majority => VOTE_MAJORITY,
            VoteValue::Undocumented => VOTE_UNDOCUMENTED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PollMethod {
    Y,
    N,
    YN,
    YNA,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollType {
    Analog,
    Named,
    Pseudoanonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PercentBase {
    YN,
    YNA,
    Y,
    #[serde(rename = "valid")]
    Valid,
    #[serde(rename = "cast")]
    Cast,
    #[serde(rename = "entitled")]
    Entitled,
    #[serde(rename = "disabled")]
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MajorityMethod {
    #[serde(rename = "simple_majority")]
    Simple,
    #[serde(rename = "two-thirds_majority")]
    TwoThirds,
    #[serde(rename = "three-quarters_majority")]
    ThreeQuarters,
    #[serde(rename = "disabled")]
    Disabled,
}

/// Which kind of poll a rich view object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollClassType {
    Motion,
    Assignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    pub short_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    /// Outer `None`: no `user` key at all. `Some(None)`: the key is present but null.
    #[serde(default, deserialize_with = "present_key", skip_serializing_if = "Option::is_none")]
    pub user: Option<Option<Voter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yes: Option<VoteValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<VoteValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstain: Option<VoteValue>,
}

/// Raw poll record as delivered by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollData {
    pub pollmethod: PollMethod,
    #[serde(rename = "type")]
    pub poll_type: PollType,
    pub onehundred_percent_base: PercentBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub majority_method: Option<MajorityMethod>,
    #[serde(default)]
    pub options: Vec<PollOption>,
    #[serde(default)]
    pub votesvalid: Option<VoteValue>,
    #[serde(default)]
    pub votesinvalid: Option<VoteValue>,
    #[serde(default)]
    pub votescast: Option<VoteValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_global_no: Option<VoteValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_global_abstain: Option<VoteValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entitled_users_at_stop: Option<Vec<serde_json::Value>>,
}

/// Poll-level totals and per-option counts addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollKey {
    Yes,
    No,
    Abstain,
    Votesvalid,
    Votesinvalid,
    Votescast,
    AmountGlobalNo,
    AmountGlobalAbstain,
}

impl PollKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PollKey::Yes => "yes",
            PollKey::No => "no",
            PollKey::Abstain => "abstain",
            PollKey::Votesvalid => "votesvalid",
            PollKey::Votesinvalid => "votesinvalid",
            PollKey::Votescast => "votescast",
            PollKey::AmountGlobalNo => "amount_global_no",
            PollKey::AmountGlobalAbstain => "amount_global_abstain",
        }
    }
}

// Wraps whatever was found under a key, null included, so the key's presence survives.
fn present_key<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PollOption {
    pub fn with_voter(short_name: impl Into<String>) -> Self {
        Self {
            user: Some(Some(Voter { short_name: short_name.into() })),
            ..Self::default()
        }
    }

    /// The named voter, if the option carries one.
    pub fn voter(&self) -> Option<&Voter> {
        self.user.as_ref().and_then(Option::as_ref)
    }

    /// Value of a per-option field; poll-level keys are never present on an option.
    pub fn value(&self, key: PollKey) -> Option<VoteValue> {
        match key {
            PollKey::Yes => self.yes,
            PollKey::No => self.no,
            PollKey::Abstain => self.abstain,
            _ => None,
        }
    }
}

impl PollData {
    /// Value of a poll-level total; per-option keys are never present on the poll.
    pub fn value(&self, key: PollKey) -> Option<VoteValue> {
        match key {
            PollKey::Votesvalid => self.votesvalid,
            PollKey::Votesinvalid => self.votesinvalid,
            PollKey::Votescast => self.votescast,
            PollKey::AmountGlobalNo => self.amount_global_no,
            PollKey::AmountGlobalAbstain => self.amount_global_abstain,
            _ => None,
        }
    }

    pub fn is_analog(&self) -> bool {
        self.poll_type == PollType::Analog
    }
}

/// A poll record enriched with its class, as held by the views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPoll {
    pub class_type: PollClassType,
    #[serde(flatten)]
    pub poll: PollData,
}

/// The two input shapes the result builders accept.
#[derive(Debug, Clone, Copy)]
pub enum PollInput<'a> {
    Record(&'a PollData),
    View(&'a ViewPoll),
}

impl<'a> PollInput<'a> {
    pub fn data(self) -> &'a PollData {
        match self {
            PollInput::Record(poll) => poll,
            PollInput::View(view) => &view.poll,
        }
    }

    /// Views carry their class; raw records are assignment polls when the
    /// first option has a `user` key, even a null one. No options means not
    /// an assignment.
    pub fn is_assignment(self) -> bool {
        match self {
            PollInput::View(view) => view.class_type == PollClassType::Assignment,
            PollInput::Record(poll) => poll
                .options
                .first()
                .is_some_and(|option| option.user.is_some()),
        }
    }
}

impl<'a> From<&'a PollData> for PollInput<'a> {
    fn from(poll: &'a PollData) -> Self {
        PollInput::Record(poll)
    }
}

impl<'a> From<&'a ViewPoll> for PollInput<'a> {
    fn from(view: &'a ViewPoll) -> Self {
        PollInput::View(view)
    }
}

/// Field values a new poll starts out with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultPollData {
    pub onehundred_percent_base: PercentBase,
    pub majority_method: MajorityMethod,
    pub groups_id: Vec<u64>,
    #[serde(rename = "type")]
    pub poll_type: PollType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_decode_from_wire_numbers() {
        let option: PollOption = serde_json::from_str(r#"{"yes": 3, "no": -1, "abstain": -2}"#).unwrap();
        assert_eq!(option.yes, Some(VoteValue::Count(3.0)));
        assert_eq!(option.no, Some(VoteValue::Majority));
        assert_eq!(option.abstain, Some(VoteValue::Undocumented));
    }

    #[test]
    fn record_with_voter_is_assignment() {
        let poll: PollData = serde_json::from_str(
            r#"{"pollmethod": "YN", "type": "analog", "onehundred_percent_base": "YN",
                "options": [{"user": {"short_name": "Ada"}, "yes": 1}],
                "votesvalid": 1, "votesinvalid": 0, "votescast": 1}"#,
        )
        .unwrap();
        assert!(PollInput::Record(&poll).is_assignment());
        assert_eq!(poll.options[0].voter().map(|voter| voter.short_name.as_str()), Some("Ada"));

        let empty = PollData { options: Vec::new(), ..poll };
        assert!(!PollInput::Record(&empty).is_assignment());
    }

    #[test]
    fn null_user_key_still_marks_an_assignment() {
        let poll: PollData = serde_json::from_str(
            r#"{"pollmethod": "Y", "type": "analog", "onehundred_percent_base": "Y",
                "options": [{"user": null, "yes": 1}],
                "votesvalid": 1, "votesinvalid": 0, "votescast": 1}"#,
        )
        .unwrap();
        assert_eq!(poll.options[0].user, Some(None));
        assert_eq!(poll.options[0].voter(), None);
        assert!(PollInput::Record(&poll).is_assignment());

        let motion: PollOption = serde_json::from_str(r#"{"yes": 1}"#).unwrap();
        assert_eq!(motion.user, None);
    }
}
