//! Route command handler for walking routes between coordinates or saved places.

use std::io;

use anyhow::{bail, Result};

use geowalk_lib::{plan_route, RouteRequest};

use super::{CommandContext, Endpoint};
use crate::output::RouteView;
use crate::terminal::ColorPalette;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub from: Endpoint,
    pub to: Endpoint,
}

/// Handle the route subcommand.
pub fn handle_route_command(ctx: &CommandContext, args: &RouteCommandArgs) -> Result<()> {
    let locations = if args.from.is_named() || args.to.is_named() {
        Some(ctx.load_locations()?)
    } else {
        None
    };
    let start = args.from.resolve(locations.as_ref())?;
    let goal = args.to.resolve(locations.as_ref())?;

    let (graph, _) = ctx.load_graph()?;
    let request = RouteRequest::new(start, goal);

    let (from, to) = (args.from.label(), args.to.label());

    let Some(plan) = plan_route(&graph, &request)? else {
        bail!(format_route_not_found_message(&from, &to));
    };

    let view = RouteView {
        from: &from,
        to: &to,
        plan: &plan,
    };
    ctx.format
        .write_route(&mut io::stdout().lock(), &view, ColorPalette::detect())
}

fn format_route_not_found_message(start: &str, goal: &str) -> String {
    format!(
        "No route found between {start} and {goal}. Try a larger --primary-radius or \
         --relevance-factor, or raise --max-iterations."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_both_endpoints() {
        let message = format_route_not_found_message("Fort Station", "6.940000,79.880000");
        assert!(message.starts_with("No route found between Fort Station and 6.940000,79.880000."));
        assert!(message.contains("--relevance-factor"));
    }
}
