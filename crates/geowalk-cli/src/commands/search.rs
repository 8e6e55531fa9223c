//! Saved-location search.

use std::io;

use anyhow::Result;

use geowalk_lib::{PatternMatcher, SearchAlgorithm};

use super::CommandContext;
use crate::output::SearchView;

#[derive(Debug, Clone)]
pub struct SearchCommandArgs {
    pub query: String,
    pub algorithm: SearchAlgorithm,
    /// Fuzzy threshold; ignored by the exact algorithms.
    pub max_distance: usize,
    /// Report every match instead of the first.
    pub all: bool,
}

/// Handle the search subcommand. No match is reported, not treated as a failure.
pub fn handle_search_command(ctx: &CommandContext, args: &SearchCommandArgs) -> Result<()> {
    let locations = ctx.load_locations()?;
    let matcher =
        PatternMatcher::new(&args.query, args.algorithm).with_max_distance(args.max_distance);

    let matches = if args.query.trim().is_empty() {
        Vec::new()
    } else if args.all {
        matcher.find_all(locations.iter())
    } else {
        locations.search_with(&matcher).into_iter().collect()
    };
    tracing::debug!(query = %args.query, matches = matches.len(), "location search finished");

    let view = SearchView {
        query: &args.query,
        algorithm: args.algorithm,
        matches,
    };
    ctx.format.write_search(&mut io::stdout().lock(), &view)
}
