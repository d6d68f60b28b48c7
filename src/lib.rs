pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod slides;
pub mod voting;

pub use config::Settings;
pub use error::{ConfigError, PollError, SlideError};
pub use models::{PollData, PollInput, ViewPoll, VoteValue};
pub use voting::{AssignmentPolls, MotionPolls, PollService, is_vote_documented};
