use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use citizen_insights::models::{
    FeedbackFilter, FeedbackRecord, FeedbackSubmission, Recommendation, SubmissionReceipt,
    SummaryReport, Theme,
};
use citizen_insights::analysis::ImportReport;
use citizen_insights::{Config, FeedbackPipeline, PipelineConfig, Storage};

#[derive(Parser, Debug)]
#[command(name = "citizen-insights")]
#[command(version = "0.1.0")]
#[command(about = "Collect citizen feedback and turn it into theme and sentiment insights")]
struct Args {
    /// Database path (overrides DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<String>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the feedback table if it does not exist
    Init,

    /// Submit one feedback entry
    Submit {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        body: String,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        contact: Option<String>,
    },

    /// Import a JSON array of feedback entries
    Import {
        /// Path to the JSON file
        file: String,
    },

    /// List stored feedback, newest first
    List {
        /// Only entries carrying this theme
        #[arg(long)]
        tag: Option<Theme>,

        /// Only entries with sentiment at or above this value
        #[arg(long = "min-sent", default_value = "-1", allow_hyphen_values = true)]
        min_sent: f64,
    },

    /// Summarize recurring themes, counts and average sentiment
    Summary,

    /// Suggest actions for themes with negative sentiment
    Actionable,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("citizen_insights=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;
    let database = args
        .database
        .clone()
        .unwrap_or_else(|| config.database_path.clone());

    let storage = Storage::new(&database)?;
    let pipeline = FeedbackPipeline::new(storage, PipelineConfig::from(&config));
    let json = args.format == "json";

    let output = match &args.command {
        Command::Init => {
            tracing::info!("Database ready at {}", database);
            if json {
                serde_json::to_string_pretty(&serde_json::json!({
                    "status": "ok",
                    "message": "database initialized",
                }))?
            } else {
                format!("Database initialized at {}\n", database)
            }
        }
        Command::Submit {
            title,
            body,
            category,
            contact,
        } => {
            let submission = FeedbackSubmission {
                title: title.clone(),
                body: body.clone(),
                category: category.clone(),
                contact: contact.clone(),
            };
            let receipt = pipeline.submit(&submission)?;
            if json {
                serde_json::to_string_pretty(&receipt)?
            } else {
                format_receipt(&receipt)
            }
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(file)?;
            let submissions: Vec<FeedbackSubmission> = serde_json::from_str(&raw)?;
            let report = pipeline.import(submissions).await?;
            if json {
                serde_json::to_string_pretty(&report)?
            } else {
                format_import(&report)
            }
        }
        Command::List { tag, min_sent } => {
            let filter = FeedbackFilter {
                tag: *tag,
                min_sentiment: *min_sent,
            };
            let records = pipeline.list(&filter)?;
            if json {
                serde_json::to_string_pretty(&records)?
            } else {
                format_records(&records)
            }
        }
        Command::Summary => {
            let report = pipeline.summary()?;
            if json {
                serde_json::to_string_pretty(&report)?
            } else {
                format_summary(&report)
            }
        }
        Command::Actionable => {
            let recommendations = pipeline.recommendations()?;
            if json {
                serde_json::to_string_pretty(&serde_json::json!({
                    "recommendations": recommendations,
                }))?
            } else {
                format_recommendations(&recommendations)
            }
        }
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn join_themes<'a>(themes: impl IntoIterator<Item = &'a Theme>) -> String {
    themes
        .into_iter()
        .map(Theme::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_receipt(receipt: &SubmissionReceipt) -> String {
    format!(
        "Stored feedback #{}\n  Sentiment: {:.3}\n  Themes: {}\n",
        receipt.id,
        receipt.sentiment,
        join_themes(&receipt.tags)
    )
}

fn format_import(report: &ImportReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Imported {} entries, rejected {}\n",
        report.accepted.len(),
        report.rejected.len()
    ));

    for receipt in &report.accepted {
        output.push_str(&format!(
            "  #{} ({:.3}): {}\n",
            receipt.id,
            receipt.sentiment,
            join_themes(&receipt.tags)
        ));
    }

    for rejected in &report.rejected {
        output.push_str(&format!(
            "  entry {} rejected: {}\n",
            rejected.index, rejected.reason
        ));
    }

    output
}

fn format_records(records: &[FeedbackRecord]) -> String {
    if records.is_empty() {
        return "No feedback found.\n".to_string();
    }

    let mut output = String::new();
    for record in records {
        output.push_str(&format!(
            "#{} [{}] {} ({:.3})\n",
            record.id,
            record.category,
            record.title,
            record.sentiment
        ));
        output.push_str(&format!("  Themes: {}\n", join_themes(&record.tags)));
        if !record.body.is_empty() {
            output.push_str(&format!("  {}\n", record.body));
        }
        output.push_str(&format!(
            "  Submitted: {}\n",
            record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}

fn format_summary(report: &SummaryReport) -> String {
    let summary = match report.as_summary() {
        Some(summary) => summary,
        None => return "No feedback stored yet.\n".to_string(),
    };

    let mut output = String::new();

    output.push_str("\n=== Feedback Summary ===\n\n");
    output.push_str(&format!("Total feedback: {}\n", summary.total_feedback));

    output.push_str("\nBy category:\n");
    for (category, count) in summary.by_category.iter() {
        output.push_str(&format!("  - {}: {}\n", category, count));
    }

    output.push_str("\nTop themes:\n");
    for theme in &summary.top_themes {
        output.push_str(&format!(
            "  - {}: {} entries (avg sentiment {:.3})\n",
            theme.theme, theme.count, theme.avg_sentiment
        ));
    }

    output
}

fn format_recommendations(recommendations: &[Recommendation]) -> String {
    let mut output = String::new();

    output.push_str("Recommendations:\n");
    for recommendation in recommendations {
        match recommendation {
            Recommendation::Action {
                theme, suggestion, ..
            } => output.push_str(&format!("  ! [{}] {}\n", theme, suggestion)),
            Recommendation::Note { note } => output.push_str(&format!("  {}\n", note)),
        }
    }

    output
}
