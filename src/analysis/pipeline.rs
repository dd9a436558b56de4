use std::sync::Arc;
use chrono::Utc;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio::sync::Semaphore;

use crate::analysis::analyzer::FeedbackAnalyzer;
use crate::analysis::insights::InsightAggregator;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::models::{
    Analysis, FeedbackFilter, FeedbackRecord, FeedbackSubmission, NewFeedback, Recommendation,
    SubmissionReceipt, SummaryReport,
};
use crate::storage::Storage;

/// A submission from an import batch that failed validation.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedSubmission {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub accepted: Vec<SubmissionReceipt>,
    pub rejected: Vec<RejectedSubmission>,
}

/// Ties the analyzer, the record store and the aggregator together.
pub struct FeedbackPipeline {
    analyzer: FeedbackAnalyzer,
    aggregator: InsightAggregator,
    storage: Storage,
    config: PipelineConfig,
}

impl FeedbackPipeline {
    pub fn new(storage: Storage, config: PipelineConfig) -> Self {
        Self {
            analyzer: FeedbackAnalyzer::new(),
            aggregator: InsightAggregator::new(),
            storage,
            config,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn submit(&self, submission: &FeedbackSubmission) -> Result<SubmissionReceipt> {
        let normalized = submission.normalized();

        let analysis = self
            .analyzer
            .analyze(&normalized.title, &normalized.body)
            .map_err(|e| {
                tracing::warn!("Rejected feedback submission: {}", e);
                e
            })?;
        tracing::debug!(
            "Analyzed feedback: sentiment={} tags={:?}",
            analysis.sentiment,
            analysis.tags
        );

        let record = NewFeedback::from_analysis(&normalized, analysis, Utc::now());
        let id = self.storage.insert_feedback(&record)?;
        tracing::info!("Stored feedback {} in category {}", id, record.category);

        Ok(SubmissionReceipt::from(&record.with_id(id)))
    }

    /// Analyze a batch concurrently, then store the accepted items in input order.
    pub async fn import(&self, submissions: Vec<FeedbackSubmission>) -> Result<ImportReport> {
        tracing::info!("Importing {} feedback submissions", submissions.len());

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit.max(1)));
        let pb = self.progress_bar(submissions.len() as u64);

        let mut analysis_futures = Vec::new();

        for (index, submission) in submissions.into_iter().enumerate() {
            let sem = semaphore.clone();
            let analyzer = self.analyzer;
            let pb_clone = pb.clone();

            analysis_futures.push(async move {
                let _permit = sem.acquire().await.ok();

                let result = tokio::task::spawn_blocking(move || {
                    let normalized = submission.normalized();
                    analyzer
                        .analyze(&normalized.title, &normalized.body)
                        .map(|analysis| (normalized, analysis))
                })
                .await;

                pb_clone.inc(1);
                (index, result)
            });
        }

        let results = join_all(analysis_futures).await;
        pb.finish_with_message("Analysis complete");

        let mut report = ImportReport::default();
        let mut accepted: Vec<(FeedbackSubmission, Analysis)> = Vec::new();

        for (index, result) in results {
            match result? {
                Ok(pair) => accepted.push(pair),
                Err(Error::Validation(reason)) => {
                    tracing::warn!("Rejected submission #{}: {}", index, reason);
                    report.rejected.push(RejectedSubmission { index, reason });
                }
                Err(e) => return Err(e),
            }
        }

        let created_at = Utc::now();
        let records: Vec<NewFeedback> = accepted
            .into_iter()
            .map(|(submission, analysis)| NewFeedback::from_analysis(&submission, analysis, created_at))
            .collect();

        let ids = self.storage.insert_many(&records)?;
        report.accepted = records
            .into_iter()
            .zip(ids)
            .map(|(record, id)| SubmissionReceipt::from(&record.with_id(id)))
            .collect();

        tracing::info!(
            "Imported {} submissions, rejected {}",
            report.accepted.len(),
            report.rejected.len()
        );

        Ok(report)
    }

    pub fn list(&self, filter: &FeedbackFilter) -> Result<Vec<FeedbackRecord>> {
        Ok(filter.apply(self.storage.list_feedback()?))
    }

    /// Reports walk records oldest first, so count ties keep submission order.
    pub fn summary(&self) -> Result<SummaryReport> {
        let records = self.storage.list_feedback_oldest_first()?;
        Ok(self.aggregator.summarize(&records))
    }

    pub fn recommendations(&self) -> Result<Vec<Recommendation>> {
        let records = self.storage.list_feedback_oldest_first()?;
        Ok(self.aggregator.recommend(&records))
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} submissions")
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;

    fn pipeline() -> FeedbackPipeline {
        let config = PipelineConfig {
            concurrency_limit: 2,
            show_progress: false,
        };
        FeedbackPipeline::new(Storage::in_memory().unwrap(), config)
    }

    #[test]
    fn test_submit_stores_analysis() {
        let pipeline = pipeline();
        let receipt = pipeline
            .submit(
                &FeedbackSubmission::new("Delivery delay", "My package was delayed 5 days")
                    .with_category("logistics")
                    .with_contact("user@example.com"),
            )
            .unwrap();

        assert_eq!(receipt.sentiment, -1.0);
        assert!(receipt.tags.contains(&Theme::Delivery));

        let records = pipeline.list(&FeedbackFilter::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, receipt.id);
        assert_eq!(records[0].category, "logistics");
        assert_eq!(records[0].contact, "user@example.com");
    }

    #[test]
    fn test_blank_submission_never_reaches_store() {
        let pipeline = pipeline();
        let err = pipeline
            .submit(&FeedbackSubmission::new("  ", "").with_category("roads"))
            .unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(pipeline.storage().count().unwrap(), 0);
        assert!(pipeline.summary().unwrap().is_no_data());
    }

    #[test]
    fn test_list_applies_filters() {
        let pipeline = pipeline();
        pipeline
            .submit(&FeedbackSubmission::new("Refund", "Still waiting on my refund"))
            .unwrap();
        pipeline
            .submit(&FeedbackSubmission::new("Thanks", "Great helpful support agent"))
            .unwrap();

        let refunds = pipeline
            .list(&FeedbackFilter {
                tag: Some(Theme::Refunds),
                min_sentiment: -1.0,
            })
            .unwrap();
        assert_eq!(refunds.len(), 1);
        assert_eq!(refunds[0].title, "Refund");

        let positive = pipeline
            .list(&FeedbackFilter {
                tag: None,
                min_sentiment: 0.5,
            })
            .unwrap();
        assert_eq!(positive.len(), 1);
        assert_eq!(positive[0].title, "Thanks");
    }

    #[test]
    fn test_reports_over_stored_feedback() {
        let pipeline = pipeline();
        assert_eq!(
            pipeline.recommendations().unwrap(),
            vec![Recommendation::no_negative_themes()]
        );

        pipeline
            .submit(&FeedbackSubmission::new("Delivery delay", "My package was delayed 5 days"))
            .unwrap();
        pipeline
            .submit(&FeedbackSubmission::new("Great service", "The agent resolved my issue quickly, thank you"))
            .unwrap();

        let report = pipeline.summary().unwrap();
        let summary = report.as_summary().unwrap();
        assert_eq!(summary.total_feedback, 2);
        assert_eq!(summary.by_category.get("uncategorized"), Some(2));

        assert_eq!(
            pipeline.recommendations().unwrap(),
            vec![Recommendation::investigate(Theme::Delivery)]
        );
    }

    #[test]
    fn test_report_ties_follow_submission_order() {
        let pipeline = pipeline();
        pipeline
            .submit(
                &FeedbackSubmission::new("Delivery delay", "My package was delayed 5 days")
                    .with_category("logistics"),
            )
            .unwrap();
        pipeline
            .submit(&FeedbackSubmission::new("Police", "crime bad").with_category("safety"))
            .unwrap();

        let report = pipeline.summary().unwrap();
        let summary = report.as_summary().unwrap();
        let themes: Vec<_> = summary.top_themes.iter().map(|t| t.theme).collect();
        assert_eq!(themes, vec![Theme::Delivery, Theme::Safety]);

        let categories: Vec<_> = summary.by_category.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(categories, vec!["logistics", "safety"]);

        let recommended: Vec<_> = pipeline
            .recommendations()
            .unwrap()
            .iter()
            .filter_map(Recommendation::theme)
            .collect();
        assert_eq!(recommended, vec![Theme::Delivery, Theme::Safety]);

        // Listing stays newest first.
        let titles: Vec<_> = pipeline
            .list(&FeedbackFilter::default())
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Police", "Delivery delay"]);
    }

    #[tokio::test]
    async fn test_import_keeps_order_and_reports_rejections() {
        let pipeline = pipeline();
        let batch = vec![
            FeedbackSubmission::new("Street lighting", "The street lights are out"),
            FeedbackSubmission::new("", "   "),
            FeedbackSubmission::new("School bus", "Bus to the school is always late"),
            FeedbackSubmission::new("Police", "Thank you for the fast response"),
        ];

        let report = pipeline.import(batch).await.unwrap();

        assert_eq!(report.accepted.len(), 3);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 1);

        let ids: Vec<_> = report.accepted.iter().map(|r| r.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(report.accepted[0].tags.contains(&Theme::Infrastructure));
        assert!(report.accepted[1].tags.contains(&Theme::Education));
        assert!(report.accepted[2].tags.contains(&Theme::Safety));
        assert_eq!(report.accepted[2].sentiment, 1.0);

        assert_eq!(pipeline.storage().count().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_import_empty_batch() {
        let pipeline = pipeline();
        let report = pipeline.import(Vec::new()).await.unwrap();
        assert!(report.accepted.is_empty());
        assert!(report.rejected.is_empty());
    }
}
