use log::{error, info};
use poll_tally::config::{EnvSettings, JsonFileSettings};
use poll_tally::i18n::{Catalog, Translator};
use poll_tally::models::{PollData, PollInput, ViewPoll};
use poll_tally::voting::percent::PercentBaseStrategy;
use poll_tally::{AssignmentPolls, MotionPolls, PollError, PollService};
use std::env;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

enum Input {
    Record(PollData),
    View(ViewPoll),
}

impl Input {
    fn as_poll_input(&self) -> PollInput<'_> {
        match self {
            Input::Record(poll) => PollInput::Record(poll),
            Input::View(view) => PollInput::View(view),
        }
    }
}

fn parse_input(raw: &str) -> Result<Input, PollError> {
    // A class_type field means the record came from a view, not the raw server data
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if value.get("class_type").is_some() {
        Ok(Input::View(serde_json::from_value(value)?))
    } else {
        Ok(Input::Record(serde_json::from_value(value)?))
    }
}

async fn load_catalog() -> Result<Box<dyn Translator + Send + Sync>, BoxError> {
    match env::var("POLL_TALLY_CATALOG") {
        Ok(path) => {
            let raw = tokio::fs::read_to_string(&path).await?;
            info!("Using translations from {}", path);
            Ok(Box::new(Catalog::from_json(&raw)?))
        }
        Err(_) => Ok(Box::new(Catalog::default())),
    }
}

async fn build_service<S: PercentBaseStrategy>(strategy: S) -> Result<PollService<S>, BoxError> {
    let translator = load_catalog().await?;
    let service = match env::var("POLL_TALLY_CONSTANTS") {
        Ok(path) => PollService::from_source(strategy, &JsonFileSettings::new(path), translator).await?,
        Err(_) => PollService::from_source(strategy, &EnvSettings, translator).await?,
    };
    Ok(service)
}

fn report<S: PercentBaseStrategy>(service: &PollService<S>, input: PollInput<'_>) -> Result<(), BoxError> {
    let poll = input.data();

    println!("Result table:");
    for line in service.generate_table_data(poll) {
        for result in &line.value {
            let label = service.verbose_poll_key(result.vote);
            let subtitle = line
                .voting_option_subtitle
                .as_ref()
                .map(|name| format!("{}: ", name))
                .unwrap_or_default();
            let percent = result
                .percent
                .as_ref()
                .map(|percent| format!(" ({})", percent))
                .unwrap_or_default();
            println!("  {}{} {}{}", subtitle, label, service.format_vote_value(result.amount), percent);
        }
    }

    match service.majority_threshold(poll) {
        Some(threshold) => println!("Required majority: {}", threshold),
        None => println!("Required majority: none"),
    }

    println!("Chart data: {}", serde_json::to_string(&service.generate_chart_data(input))?);

    // Labels name candidates, so only elections get them
    if input.is_assignment() {
        println!("Chart labels:");
        for label in service.chart_labels(input)? {
            println!("  {}", label);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        error!("Usage: poll-tally <poll.json>");
        return;
    };

    let input = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => match parse_input(&raw) {
            Ok(input) => input,
            Err(e) => {
                error!("Failed to parse {}: {}", path, e);
                return;
            }
        },
        Err(e) => {
            error!("Failed to read {}: {}", path, e);
            return;
        }
    };

    // Pick the percent base rules that match the poll class
    let poll_input = input.as_poll_input();
    let assignment = poll_input.is_assignment();

    let outcome = if assignment {
        match build_service(AssignmentPolls::default()).await {
            Ok(service) => report(&service, poll_input),
            Err(e) => Err(e),
        }
    } else {
        match build_service(MotionPolls::default()).await {
            Ok(service) => report(&service, poll_input),
            Err(e) => Err(e),
        }
    };

    if let Err(why) = outcome {
        error!("Failed to report on {}: {:?}", path, why);
    }
}
