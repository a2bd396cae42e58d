use crate::infra::parse_date;
use crate::render::{render_feedback, render_jobs, render_plan};
use crate::server;
use career_mentor::config::{AppConfig, PlanningConfig};
use career_mentor::error::AppError;
use career_mentor::mentor::{
    evaluate, match_jobs, parse_tag_list, EducationLevel, JobCatalog, MentorPlanner,
    ProfileMetrics, ProfileSubmission,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Career Mentor",
    about = "Plan next-step projects, sprint roadmaps, profile feedback and job matches",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Build recommendations, a sprint roadmap and job matches for a profile
    Plan(PlanArgs),
    /// Review repository and professional profile statistics
    Feedback(MetricsArgs),
    /// List catalog postings overlapping the given skills
    Jobs(JobsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the roadmap horizon in weeks
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) weeks: Option<u32>,
    /// Load job postings from a CSV file instead of the built-in catalog
    #[arg(long)]
    pub(crate) job_catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    /// Undergraduate, Graduate or "Early Career"
    #[arg(long, default_value = "undergraduate")]
    education: EducationLevel,
    #[arg(long, default_value = "")]
    degree: String,
    /// Year of study (1-6)
    #[arg(long, default_value_t = 1)]
    year: u8,
    /// Comma separated skills, e.g. "python, sql"
    #[arg(long, default_value = "")]
    skills: String,
    /// Comma separated career interests, e.g. "data science"
    #[arg(long, default_value = "")]
    interests: String,
    /// Hours available per week (2-40)
    #[arg(long, default_value_t = 10)]
    hours: u32,
    /// Override the roadmap horizon in weeks
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    weeks: Option<u32>,
    /// First sprint start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,
    /// Load job postings from a CSV file instead of the built-in catalog
    #[arg(long)]
    job_catalog: Option<PathBuf>,
    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    metrics: MetricsArgs,
}

#[derive(Args, Debug, Default)]
struct MetricsArgs {
    /// Public repository count
    #[arg(long)]
    repo_count: Option<u32>,
    /// The GitHub profile README exists
    #[arg(long)]
    profile_readme: bool,
    /// Top repositories with a README
    #[arg(long)]
    top_repos_with_readme: Option<u32>,
    /// Days since the last commit
    #[arg(long)]
    days_since_commit: Option<u32>,
    /// LinkedIn headline length in characters
    #[arg(long)]
    headline_length: Option<u32>,
    /// LinkedIn About section length in words
    #[arg(long)]
    about_words: Option<u32>,
    /// Featured links count
    #[arg(long)]
    featured_links: Option<u32>,
    /// Quantified bullets across experience and projects
    #[arg(long)]
    quantified_bullets: Option<u32>,
}

impl MetricsArgs {
    fn provided(&self) -> bool {
        self.profile_readme
            || [
                self.repo_count,
                self.top_repos_with_readme,
                self.days_since_commit,
                self.headline_length,
                self.about_words,
                self.featured_links,
                self.quantified_bullets,
            ]
            .iter()
            .any(Option::is_some)
    }

    fn to_metrics(&self) -> ProfileMetrics {
        ProfileMetrics {
            repo_count: self.repo_count.unwrap_or_default(),
            has_profile_readme: self.profile_readme,
            top_repos_with_readme: self.top_repos_with_readme.unwrap_or_default(),
            days_since_last_commit: self.days_since_commit.unwrap_or_default(),
            headline_length: self.headline_length.unwrap_or_default(),
            about_word_count: self.about_words.unwrap_or_default(),
            featured_link_count: self.featured_links.unwrap_or_default(),
            quantified_bullet_count: self.quantified_bullets.unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug)]
struct JobsArgs {
    /// Comma separated skills, e.g. "python, sql"
    #[arg(long)]
    skills: String,
    /// Load job postings from a CSV file instead of the built-in catalog
    #[arg(long)]
    job_catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Plan(args) => run_plan(args),
        Command::Feedback(args) => {
            render_feedback(&evaluate(&args.to_metrics()));
            Ok(())
        }
        Command::Jobs(args) => run_jobs(args),
    }
}

fn planning_config(
    weeks: Option<u32>,
    job_catalog: Option<PathBuf>,
) -> Result<PlanningConfig, AppError> {
    let mut planning = AppConfig::load()?.planning;
    if let Some(weeks) = weeks {
        planning.roadmap_weeks = weeks;
    }
    if job_catalog.is_some() {
        planning.job_catalog = job_catalog;
    }
    Ok(planning)
}

fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let planning = planning_config(args.weeks, args.job_catalog.clone())?;
    let catalog = JobCatalog::load(planning.job_catalog.as_deref())?;

    let profile = ProfileSubmission {
        name: args.name,
        email: args.email,
        education: args.education,
        degree: args.degree,
        year_of_study: args.year,
        skills: vec![args.skills],
        interests: vec![args.interests],
        weekly_hours: args.hours,
    }
    .into_profile()?;

    let metrics = args.metrics.provided().then(|| args.metrics.to_metrics());
    let planner = MentorPlanner::new(&catalog, planning.roadmap_weeks);
    let plan = planner.plan(&profile, metrics.as_ref(), args.start);

    if args.json {
        let body = serde_json::to_string_pretty(&plan)?;
        println!("{body}");
    } else {
        render_plan(&plan);
    }
    Ok(())
}

fn run_jobs(args: JobsArgs) -> Result<(), AppError> {
    let planning = planning_config(None, args.job_catalog)?;
    let catalog = JobCatalog::load(planning.job_catalog.as_deref())?;
    let skills = parse_tag_list(&args.skills);
    render_jobs(&match_jobs(&skills, &catalog), catalog.len());
    Ok(())
}
