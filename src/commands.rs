//! CLI Command Handlers
//!
//! Each handler takes CLI args and Output, returns ExitCode.

use tokio_util::sync::CancellationToken;

use crate::api::{FetchError, MovieDetailService, MovieSearchService, SearchError};
use crate::cli::{parse_imdb_id, ExitCode, InfoCmd, Output, SearchCmd};
use crate::config::Config;
use crate::controllers::MIN_QUERY_LEN;

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, config: &Config, output: &Output) -> ExitCode {
    if cmd.query.chars().count() < MIN_QUERY_LEN {
        return output.error(
            format!("Query must be at least {} characters", MIN_QUERY_LEN),
            ExitCode::InvalidArgs,
        );
    }
    let client = config.omdb_client();

    output.info(format!("Searching for: {}", cmd.query));

    match client.search(&cmd.query, CancellationToken::new()).await {
        Ok(mut results) => {
            results.truncate(cmd.limit);
            if let Err(e) = output.print(&results) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(SearchError::NotFound) => output.error("Movie not found", ExitCode::NotFound),
        Err(e) => output.error(format!("Search failed: {}", e), ExitCode::NetworkError),
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, config: &Config, output: &Output) -> ExitCode {
    if let Err(e) = parse_imdb_id(&cmd.imdb_id) {
        return output.error(e, ExitCode::InvalidArgs);
    }
    let client = config.omdb_client();

    output.info(format!("Getting info for: {}", cmd.imdb_id));

    match client.fetch_detail(&cmd.imdb_id, CancellationToken::new()).await {
        Ok(detail) => {
            if let Err(e) = output.print(&detail) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(FetchError::NotFound(msg)) => output.error(msg, ExitCode::NotFound),
        Err(e) => output.error(format!("Movie info failed: {}", e), ExitCode::NetworkError),
    }
}
