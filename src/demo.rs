use crate::assessment::{self, Questionnaire, Recommendation};
use crate::error::AppError;
use crate::resources::{self, ResourceFilter};
use crate::scheduling::{
    availability_grid, group_by_date, RandomAvailability, SeededAvailability, DEFAULT_AVAILABILITY,
};
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Args, Debug, Default)]
pub(crate) struct SlotsArgs {
    /// Anchor date for the 7-day grid (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Seed the availability sampler for a reproducible grid.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ResourcesArgs {
    /// Restrict to one language ("all" for no restriction)
    #[arg(long, default_value = "all")]
    pub(crate) language: String,
    /// Restrict to one category ("all" for no restriction)
    #[arg(long, default_value = "all")]
    pub(crate) category: String,
    /// Case-insensitive search over name, description, and category
    #[arg(long, default_value = "")]
    pub(crate) query: String,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// One option value (0-3) per question, in question order
    #[arg(required = true)]
    pub(crate) answers: Vec<u8>,
}

pub(crate) fn run_slots(args: SlotsArgs) -> Result<(), AppError> {
    let start = args.start.unwrap_or_else(|| Local::now().date_naive());
    let slots = match args.seed {
        Some(seed) => availability_grid(
            start,
            &mut SeededAvailability::new(seed, DEFAULT_AVAILABILITY),
        ),
        None => availability_grid(start, &mut RandomAvailability::default()),
    };

    println!("Counselling availability, week of {start}");
    for day in group_by_date(&slots) {
        println!("\n{}", day.date.format("%A, %B %-d"));
        for slot in &day.slots {
            let marker = if slot.available { "open" } else { "taken" };
            println!("  {:<14} {}", slot.time_label(), marker);
        }
    }

    Ok(())
}

pub(crate) fn run_resources(args: ResourcesArgs) -> Result<(), AppError> {
    let directory = resources::directory();
    let filter = ResourceFilter::new(&args.language, &args.category, &args.query);
    let filtered = resources::filter_resources(directory, &filter);

    if filtered.is_empty() {
        println!("No resources found. Try adjusting your search or filter criteria.");
        return Ok(());
    }

    println!("{} of {} resources", filtered.len(), directory.len());
    for resource in &filtered {
        println!("\n- {} [{} / {}]", resource.name, resource.language, resource.category);
        println!("  {}", resource.description);
        println!("  {}", resource.url);
    }

    Ok(())
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let questionnaire = Questionnaire::standard();
    let outcome = assessment::score_answers(&questionnaire, &args.answers)?;

    println!(
        "Assessment score: {} / {}",
        outcome.score,
        questionnaire.max_score()
    );
    println!("Wellness score: {} / 100", assessment::wellness_score(outcome.score));
    println!("{}", outcome.recommendation.label());
    if outcome.recommendation == Recommendation::ProfessionalSupport {
        println!("Consider booking a consultation with one of our mental health professionals.");
    }

    Ok(())
}
