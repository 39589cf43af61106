use clap::Args;
use job_portal::error::AppError;
use job_portal::listings::{
    filter_listings, Category, FilterCriteria, FilterFacets, JobRecord, ListingSnapshot,
    SnapshotImporter,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Job snapshot to filter (JSON array or CSV)
    #[arg(long)]
    pub(crate) jobs: PathBuf,
    /// Category snapshot used to expand parent categories (JSON array)
    #[arg(long)]
    pub(crate) categories: Option<PathBuf>,
    /// Category or subcategory to include (repeatable)
    #[arg(long = "category")]
    pub(crate) category: Vec<String>,
    /// City to restrict to ("All" for every city)
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Job type to include (repeatable)
    #[arg(long = "job-type")]
    pub(crate) job_type: Vec<String>,
    /// Work mode to include (repeatable)
    #[arg(long = "work-mode")]
    pub(crate) work_mode: Vec<String>,
    /// Suburb to include (repeatable)
    #[arg(long = "suburb")]
    pub(crate) suburb: Vec<String>,
    /// Only show listings that are no longer active
    #[arg(long)]
    pub(crate) past_only: bool,
    /// Print the result as JSON instead of a listing table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FacetsArgs {
    /// Job snapshot to summarize (JSON array or CSV)
    #[arg(long)]
    pub(crate) jobs: PathBuf,
    /// Print the option lists as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct FilterOutput<'a> {
    criteria: &'a FilterCriteria,
    total: usize,
    matched: usize,
    jobs: Vec<&'a JobRecord>,
}

pub(crate) fn run_filter(args: FilterArgs) -> Result<(), AppError> {
    let criteria = criteria_from_args(&args);
    let snapshot = load_snapshot(args.jobs, args.categories)?;
    let visible = filter_listings(snapshot.jobs(), &criteria, snapshot.category_index());

    if args.json {
        let output = FilterOutput {
            criteria: &criteria,
            total: snapshot.jobs().len(),
            matched: visible.len(),
            jobs: visible,
        };
        print_json(&output);
    } else {
        render_listings(&criteria, snapshot.jobs().len(), &visible);
    }

    Ok(())
}

pub(crate) fn run_facets(args: FacetsArgs) -> Result<(), AppError> {
    let jobs = SnapshotImporter::jobs_from_path(&args.jobs)?;
    let facets = FilterFacets::from_records(&jobs);

    if args.json {
        print_json(&facets);
    } else {
        render_facets(&facets);
    }

    Ok(())
}

/// Replays the CLI flags as popup toggles so both paths share normalization.
pub(crate) fn criteria_from_args(args: &FilterArgs) -> FilterCriteria {
    let mut criteria = FilterCriteria::default();
    for label in &args.category {
        select(&mut criteria, label, FilterCriteria::toggle_category);
    }
    for label in &args.job_type {
        select(&mut criteria, label, FilterCriteria::toggle_job_type);
    }
    for label in &args.work_mode {
        select(&mut criteria, label, FilterCriteria::toggle_work_mode);
    }
    for label in &args.suburb {
        select(&mut criteria, label, FilterCriteria::toggle_suburb);
    }
    if let Some(city) = &args.city {
        criteria.select_city(city);
    }
    criteria.set_past_only(args.past_only);
    criteria
}

// Repeated flags must not toggle a label back off.
fn select(
    criteria: &mut FilterCriteria,
    label: &str,
    toggle: fn(&mut FilterCriteria, &str) -> bool,
) {
    if !toggle(criteria, label) {
        toggle(criteria, label);
    }
}

pub(crate) fn load_snapshot(
    jobs_path: PathBuf,
    categories_path: Option<PathBuf>,
) -> Result<ListingSnapshot, AppError> {
    let jobs = SnapshotImporter::jobs_from_path(jobs_path)?;
    let categories: Vec<Category> = match categories_path {
        Some(path) => SnapshotImporter::categories_from_path(path)?,
        None => Vec::new(),
    };
    Ok(ListingSnapshot::new(1, jobs, categories))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("JSON output unavailable: {}", err),
    }
}

fn render_listings(criteria: &FilterCriteria, total: usize, visible: &[&JobRecord]) {
    println!("Job listings");
    println!("City: {}", criteria.city.as_str());
    print_selection("Categories", criteria.categories.iter());
    print_selection("Job types", criteria.job_types.iter());
    print_selection("Work modes", criteria.work_modes.iter());
    print_selection("Suburbs", criteria.suburbs.iter());
    if criteria.past_only {
        println!("Showing past listings only");
    }

    println!("\n{} of {} listings match", visible.len(), total);
    for job in visible {
        let location = match (job.suburb.trim(), job.city.trim()) {
            ("", "") => "location not listed".to_string(),
            ("", city) => city.to_string(),
            (suburb, "") => suburb.to_string(),
            (suburb, city) => format!("{suburb}, {city}"),
        };
        let status = if job.is_active { "" } else { " (closed)" };
        println!(
            "- {} | {} | {} | {} | {}{}",
            job.id, job.title, job.company, job.job_type, location, status
        );
    }
}

fn print_selection<'a, I>(label: &str, values: I)
where
    I: Iterator<Item = &'a String>,
{
    let values: Vec<&str> = values.map(String::as_str).collect();
    if values.is_empty() {
        println!("{label}: any");
    } else {
        println!("{label}: {}", values.join(", "));
    }
}

fn render_facets(facets: &FilterFacets) {
    if facets.cities.is_empty() {
        println!("Cities: none");
    } else {
        println!("Cities and suburbs");
        for entry in facets.cities.entries() {
            println!("- {}: {}", entry.city, entry.suburbs.join(", "));
        }
    }

    if facets.job_types.is_empty() {
        println!("\nJob types: none");
    } else {
        println!("\nJob types: {}", facets.job_types.join(", "));
    }

    if facets.work_modes.is_empty() {
        println!("Work modes: none");
    } else {
        println!("Work modes: {}", facets.work_modes.join(", "));
    }
}
