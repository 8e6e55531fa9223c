//! Nearest-vertex lookup.

use std::io;

use anyhow::{Context, Result};

use geowalk_lib::Coordinate;

use super::CommandContext;
use crate::output::NearestView;

pub fn handle_nearest_command(ctx: &CommandContext, at: Coordinate) -> Result<()> {
    let (graph, _) = ctx.load_graph()?;
    let node = graph
        .find_nearest(at.latitude, at.longitude)
        .context("the walking network has no vertices")?;

    let view = NearestView {
        query: at,
        id: node.id(),
        latitude: node.latitude(),
        longitude: node.longitude(),
        distance_km: node.distance_to_point(at.latitude, at.longitude),
        degree: node.degree(),
    };
    ctx.format.write_nearest(&mut io::stdout().lock(), &view)
}
