use crate::error::PollError;
use crate::models::{MajorityMethod, PercentBase, PollKey, PollMethod, PollType};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Looks up the human-readable string for a machine key in the current locale.
pub trait Translator {
    fn instant(&self, key: &str) -> String;
}

/// Flat key → text table for one locale. Unknown keys translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn from_json(raw: &str) -> Result<Self, PollError> {
        let entries: HashMap<String, String> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }
}

impl Translator for Catalog {
    fn instant(&self, key: &str) -> String {
        self.entries.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}

lazy_static! {
    /// Verbose names of poll properties, keyed by field name.
    pub static ref POLL_PROPERTY_VERBOSE: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("majority_method", "Required majority");
        m.insert("onehundred_percent_base", "100% base");
        m.insert("type", "Voting type");
        m.insert("pollmethod", "Voting procedure");
        m.insert("state", "State");
        m.insert("groups", "Entitled to vote");
        m.insert("votes", "Votes");
        m.insert("global_yes", "General approval");
        m.insert("global_no", "General rejection");
        m.insert("global_abstain", "General abstain");
        m.insert("amount_global_no", "General No");
        m.insert("amount_global_abstain", "General Abstain");
        m
    };
}

pub fn poll_key_verbose(key: PollKey) -> &'static str {
    match key {
        PollKey::Yes => "Yes",
        PollKey::No => "No",
        PollKey::Abstain => "Abstain",
        PollKey::Votesvalid => "Valid votes",
        PollKey::Votesinvalid => "Invalid votes",
        PollKey::Votescast => "Total votes cast",
        PollKey::AmountGlobalNo => "General No",
        PollKey::AmountGlobalAbstain => "General Abstain",
    }
}

impl MajorityMethod {
    pub fn verbose(self) -> &'static str {
        self.display_name()
    }
}

impl PercentBase {
    pub fn verbose(self) -> &'static str {
        match self {
            PercentBase::YN => "Yes/No",
            PercentBase::YNA => "Yes/No/Abstain",
            PercentBase::Y => "Sum of votes including general No/Abstain",
            PercentBase::Valid => "All valid ballots",
            PercentBase::Cast => "All casted ballots",
            PercentBase::Entitled => "All entitled users",
            PercentBase::Disabled => "Disabled (no percents)",
        }
    }
}

impl PollMethod {
    pub fn verbose(self) -> &'static str {
        match self {
            PollMethod::Y => "Yes per candidate",
            PollMethod::N => "No per candidate",
            PollMethod::YN => "Yes/No per candidate",
            PollMethod::YNA => "Yes/No/Abstain per candidate",
        }
    }
}

impl PollType {
    pub fn verbose(self) -> &'static str {
        match self {
            PollType::Analog => "analog",
            PollType::Named => "nominal",
            PollType::Pseudoanonymous => "non-nominal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_falls_back_to_key() {
        let catalog = Catalog::from_json(r#"{"Yes": "Ja"}"#).unwrap();
        assert_eq!(catalog.instant("Yes"), "Ja");
        assert_eq!(catalog.instant("No"), "No");
    }

    #[test]
    fn catalog_rejects_non_string_entries() {
        assert!(matches!(Catalog::from_json(r#"{"Yes": 1}"#), Err(PollError::Parse(_))));
    }
}
