//! Runs one search and prints the response.

use partfinder_agent::PartFinder;
use partfinder_core::{AppConfig, PartSearchRequest};

/// Builds a [`PartFinder`] from `config`, runs `request` and prints the
/// response as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if the finder cannot be built, the search fails, or the
/// response cannot be serialized. A missing search key is reported with a
/// hint naming the variable.
pub(crate) async fn run_search(
    config: &AppConfig,
    request: &PartSearchRequest,
) -> anyhow::Result<()> {
    let finder = PartFinder::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build part finder: {e}"))?;

    let response = match finder.find_parts(request).await {
        Ok(response) => response,
        Err(e) if e.is_service_unavailable() => {
            anyhow::bail!("search unavailable: {e} (set SERPER_API_KEY in the environment or .env)")
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        total = response.total_results,
        fast_path_count = response.fast_path_count,
        slow_path_count = response.slow_path_count,
        search_time_ms = response.search_time_ms,
        "search complete"
    );
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
