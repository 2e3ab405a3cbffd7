use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;
use std::time::Instant;

pub struct QuakeMapEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> QuakeMapEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load. When the feed cannot be fetched the
    /// run still writes a fallback page and reports the failure in the
    /// returned summary; any other error aborts the run.
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        tracing::info!("Fetching earthquake feed...");

        let feed = match self.pipeline.extract().await {
            Ok(feed) => feed,
            Err(e) if e.is_fetch_failure() => {
                tracing::error!("Earthquake feed unavailable: {}", e);
                let summary = self.pipeline.load_fallback(&e).await?;
                tracing::warn!("Fallback map without markers saved to: {}", summary.output_path);
                return Ok(summary);
            }
            Err(e) => return Err(e),
        };
        tracing::info!("Fetched {} features", feed.features.len());

        let result = self.pipeline.transform(feed).await?;
        if let Some(generated) = result.metadata.as_ref().and_then(|m| m.generated_at()) {
            tracing::info!("Feed generated at {}", generated.to_rfc3339());
        }
        tracing::info!(
            "Prepared {} earthquakes ({} skipped, {} filtered)",
            result.features.len(),
            result.skipped.len(),
            result.filtered
        );

        let summary = self.pipeline.load(result).await?;
        tracing::info!(
            "Rendered {} markers to {} in {:?}",
            summary.rendered,
            summary.output_path,
            start_time.elapsed()
        );

        Ok(summary)
    }
}
