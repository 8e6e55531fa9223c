//! Network and saved-location statistics.

use std::io;

use anyhow::Result;

use super::CommandContext;
use crate::output::StatsView;

pub fn handle_stats_command(ctx: &CommandContext) -> Result<()> {
    let (graph, import) = ctx.load_graph()?;
    let locations = ctx.load_locations_if_present()?;

    let view = StatsView {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        isolated_nodes: graph.nodes().filter(|node| node.degree() == 0).count(),
        import,
        locations: locations.map(|list| list.len()),
    };
    ctx.format.write_stats(&mut io::stdout().lock(), &view)
}
