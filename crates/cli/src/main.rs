use clap::{Parser, Subcommand};
use pfms_core::{
    categorization_summary, parse_date, parse_feedback_records, parse_feedback_records_lenient,
    FeedbackError, FeedbackRecord, FeedbackService,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pfms")]
#[command(about = "PFMS patient feedback insights CLI")]
struct Cli {
    /// Skip malformed feedback records instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Categorize every feedback record in a file
    Categorize {
        /// JSON file holding an array of feedback records
        file: PathBuf,
    },
    /// Cluster feedback by patient
    Clusters {
        /// JSON file holding an array of feedback records
        file: PathBuf,
        /// Only include feedback for this department
        #[arg(long)]
        department: Option<i64>,
        /// Print clusters as pretty JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize feedback types and sentiment
    Summary {
        /// JSON file holding an array of feedback records
        file: PathBuf,
        /// Only include feedback for this department
        #[arg(long)]
        department: Option<i64>,
    },
    /// Count feedback types per week
    Weekly {
        /// JSON file holding an array of feedback records
        file: PathBuf,
        /// First day of the range (YYYY-MM-DD)
        start: String,
        /// Last day of the range (YYYY-MM-DD)
        end: String,
    },
}

fn load(path: &Path, lenient: bool) -> Result<Vec<FeedbackRecord>, FeedbackError> {
    let contents = std::fs::read_to_string(path).map_err(FeedbackError::FileRead)?;
    if lenient {
        let report = parse_feedback_records_lenient(&contents)?;
        if report.skipped > 0 {
            eprintln!("Skipped {} malformed feedback records", report.skipped);
        }
        Ok(report.records)
    } else {
        parse_feedback_records(&contents)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let service = FeedbackService::default();

    match cli.command {
        Some(Commands::Categorize { file }) => {
            let records = load(&file, cli.lenient)?;
            for record in &records {
                let category = service.categorize(record);
                println!("{}: {}", record.id, categorization_summary(&category));
            }
        }
        Some(Commands::Clusters {
            file,
            department,
            json,
        }) => {
            let records = load(&file, cli.lenient)?;
            let clusters = service.clusters(&records, department);
            if json {
                println!("{}", serde_json::to_string_pretty(&clusters)?);
            } else if clusters.is_empty() {
                println!("No feedback found.");
            } else {
                for cluster in clusters {
                    println!(
                        "Patient: {}, Verdict: {}, Positive: {}, Negative: {}, Neutral: {}, Last feedback: {}",
                        cluster.patient_id,
                        cluster.overall_category.overall,
                        cluster.positive_count,
                        cluster.negative_count,
                        cluster.neutral_count,
                        cluster.last_feedback_date
                    );
                }
            }
        }
        Some(Commands::Summary { file, department }) => {
            let records = load(&file, cli.lenient)?;
            let types = service.type_summary(&records, department);
            let sentiment = service.sentiment_breakdown(&records, department);
            println!(
                "Total: {}, Complaints: {}, Suggestions: {}, Compliments: {}, Other: {}",
                types.total, types.complaints, types.suggestions, types.compliments, types.other
            );
            println!(
                "Positive: {} ({:.1}%), Negative: {} ({:.1}%), Neutral: {} ({:.1}%)",
                sentiment.positive,
                sentiment.positive_percent,
                sentiment.negative,
                sentiment.negative_percent,
                sentiment.neutral,
                sentiment.neutral_percent
            );
        }
        Some(Commands::Weekly { file, start, end }) => {
            let start = parse_date(&start)?;
            let end = parse_date(&end)?;
            let records = load(&file, cli.lenient)?;
            for week in service.weekly_trend(&records, start, end)? {
                println!(
                    "Week {} ({}): Complaints: {}, Suggestions: {}, Compliments: {}",
                    week.iso_week,
                    week.week_start,
                    week.complaints,
                    week.suggestions,
                    week.compliments
                );
            }
        }
        None => {
            println!("Use 'pfms --help' for commands");
        }
    }

    Ok(())
}
