pub mod chart;
pub mod majority;
pub mod percent;
pub mod table;

use crate::config::{Settings, SettingsSource};
use crate::error::ConfigError;
use crate::i18n::{Catalog, POLL_PROPERTY_VERBOSE, Translator, poll_key_verbose};
use crate::models::{
    DefaultPollData, MajorityMethod, PercentBase, PollData, PollKey, PollMethod, PollType, VoteValue,
};
use log::debug;
use percent::{PercentBaseStrategy, percent_of};

pub use chart::ChartSeries;
pub use majority::calc_majority;
pub use percent::{AssignmentPolls, MotionPolls};
pub use table::{PollTableData, VotingResult};

/// A vote is documented when it was recorded at all, even if it is zero.
pub fn is_vote_documented(vote: Option<VoteValue>) -> bool {
    !matches!(vote, None | Some(VoteValue::Undocumented))
}

/// Derives display-ready results from poll records of one poll class.
pub struct PollService<S> {
    strategy: S,
    settings: Settings,
    translator: Box<dyn Translator + Send + Sync>,
    /// Majority method used when a poll doesn't name its own.
    pub majority_method: MajorityMethod,
}

impl<S: PercentBaseStrategy> PollService<S> {
    pub fn new(strategy: S, settings: Settings) -> Self {
        Self::with_translator(strategy, settings, Box::new(Catalog::default()))
    }

    pub fn with_translator(strategy: S, settings: Settings, translator: Box<dyn Translator + Send + Sync>) -> Self {
        let majority_method = strategy.default_majority_method();
        Self {
            strategy,
            settings,
            translator,
            majority_method,
        }
    }

    /// Loads the settings once from `source` and builds the service around them.
    pub async fn from_source(
        strategy: S,
        source: &(dyn SettingsSource + Send + Sync),
        translator: Box<dyn Translator + Send + Sync>,
    ) -> Result<Self, ConfigError> {
        let settings = source.load().await?;
        Ok(Self::with_translator(strategy, settings, translator))
    }

    pub fn is_electronic_voting_enabled(&self) -> bool {
        self.settings.enable_electronic_voting
    }

    pub fn percent_base(&self, poll: &PollData) -> Option<f64> {
        self.strategy.percent_base(poll)
    }

    pub fn vote_value_in_percent(&self, value: f64, poll: &PollData) -> Option<String> {
        percent_of(value, self.percent_base(poll))
    }

    /// Votes required to pass under the poll's majority method, or the service default.
    pub fn majority_threshold(&self, poll: &PollData) -> Option<f64> {
        // The poll's own method wins over the service default
        let method = poll.majority_method.unwrap_or(self.majority_method);
        let base = self.percent_base(poll)?;
        let threshold = method.calc(base);
        debug!("Majority {} of base {} requires {:?}", method.value(), base, threshold);
        threshold
    }

    pub fn default_poll_data(&self) -> DefaultPollData {
        DefaultPollData {
            onehundred_percent_base: self.strategy.default_percent_base(),
            majority_method: self.strategy.default_majority_method(),
            groups_id: self.strategy.default_group_ids(),
            poll_type: PollType::Analog,
        }
    }

    /// Poll types that can be offered for new polls.
    pub fn available_poll_types(&self) -> Vec<PollType> {
        if self.is_electronic_voting_enabled() {
            vec![PollType::Analog, PollType::Named, PollType::Pseudoanonymous]
        } else {
            vec![PollType::Analog]
        }
    }

    pub fn verbose_name_for_value(&self, key: &str, value: &str) -> Option<String> {
        let wire = serde_json::Value::String(value.to_string());
        let verbose = match key {
            "majority_method" => serde_json::from_value::<MajorityMethod>(wire).ok()?.verbose(),
            "onehundred_percent_base" => serde_json::from_value::<PercentBase>(wire).ok()?.verbose(),
            "pollmethod" => serde_json::from_value::<PollMethod>(wire).ok()?.verbose(),
            "type" => serde_json::from_value::<PollType>(wire).ok()?.verbose(),
            _ => return None,
        };
        Some(self.translator.instant(verbose))
    }

    pub fn verbose_name_for_key(&self, key: &str) -> Option<String> {
        POLL_PROPERTY_VERBOSE
            .get(key)
            .map(|verbose| self.translator.instant(verbose))
    }

    /// Display string for a vote value; sentinels get their translated names.
    pub fn format_vote_value(&self, value: Option<VoteValue>) -> String {
        match value {
            Some(VoteValue::Count(count)) => count.to_string(),
            Some(VoteValue::Majority) => self.translator.instant("majority"),
            Some(VoteValue::Undocumented) => self.translator.instant("undocumented"),
            None => "-".to_string(),
        }
    }

    /// Translated display name of a vote kind or total.
    pub fn verbose_poll_key(&self, key: PollKey) -> String {
        self.translator.instant(poll_key_verbose(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_votes() {
        assert!(!is_vote_documented(None));
        assert!(is_vote_documented(Some(VoteValue::Count(0.0))));
        assert!(is_vote_documented(Some(VoteValue::Majority)));
        assert!(!is_vote_documented(Some(VoteValue::Undocumented)));
    }

    #[test]
    fn electronic_voting_unlocks_poll_types() {
        let analog_only = PollService::new(MotionPolls::default(), Settings::default());
        assert_eq!(analog_only.available_poll_types(), vec![PollType::Analog]);

        let electronic = PollService::new(
            MotionPolls::default(),
            Settings { enable_electronic_voting: true },
        );
        assert_eq!(electronic.available_poll_types().len(), 3);
    }

    #[test]
    fn verbose_names_resolve_through_translator() {
        let mut catalog = Catalog::default();
        catalog.insert("Two-thirds majority", "Zweidrittelmehrheit");
        let service = PollService::with_translator(MotionPolls::default(), Settings::default(), Box::new(catalog));

        assert_eq!(
            service.verbose_name_for_value("majority_method", "two-thirds_majority").as_deref(),
            Some("Zweidrittelmehrheit")
        );
        assert_eq!(service.verbose_name_for_value("type", "named").as_deref(), Some("nominal"));
        assert_eq!(service.verbose_name_for_value("pollmethod", "bogus"), None);
        assert_eq!(service.verbose_name_for_key("onehundred_percent_base").as_deref(), Some("100% base"));
    }

    #[test]
    fn formats_counts_and_sentinels() {
        let service = PollService::new(MotionPolls::default(), Settings::default());
        assert_eq!(service.format_vote_value(Some(VoteValue::Count(12.0))), "12");
        assert_eq!(service.format_vote_value(Some(VoteValue::Count(1.5))), "1.5");
        assert_eq!(service.format_vote_value(Some(VoteValue::Majority)), "majority");
        assert_eq!(service.format_vote_value(Some(VoteValue::Undocumented)), "undocumented");
    }

    #[test]
    fn defaults_come_from_strategy() {
        let service = PollService::new(AssignmentPolls::default(), Settings::default());
        let defaults = service.default_poll_data();
        assert_eq!(defaults.onehundred_percent_base, PercentBase::YN);
        assert_eq!(defaults.majority_method, MajorityMethod::Disabled);
        assert_eq!(defaults.poll_type, PollType::Analog);
        assert_eq!(service.majority_method, MajorityMethod::Disabled);
    }
}
