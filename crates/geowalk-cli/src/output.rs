//! Rendering of command results.
//!
//! Every renderer writes to a caller-supplied writer so command handlers can
//! target stdout while tests capture into a buffer.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use geowalk_lib::{
    Coordinate, ImportSummary, NodeId, RoutePlan, SearchAlgorithm, TravelLocation,
};

use crate::terminal::{format_distance, ColorPalette};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON for scripting.
    Json,
}

/// A planned route with the labels the user asked for.
#[derive(Debug, Serialize)]
pub struct RouteView<'a> {
    pub from: &'a str,
    pub to: &'a str,
    #[serde(flatten)]
    pub plan: &'a RoutePlan,
}

/// Nearest-vertex lookup result.
#[derive(Debug, Serialize)]
pub struct NearestView {
    pub query: Coordinate,
    pub id: NodeId,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub degree: usize,
}

/// Location search result.
#[derive(Debug, Serialize)]
pub struct SearchView<'a> {
    pub query: &'a str,
    pub algorithm: SearchAlgorithm,
    pub matches: Vec<&'a TravelLocation>,
}

/// Network and location counts.
#[derive(Debug, Serialize)]
pub struct StatsView {
    pub nodes: usize,
    pub edges: usize,
    pub isolated_nodes: usize,
    pub import: ImportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<usize>,
}

impl OutputFormat {
    pub fn write_route<W: Write>(
        self,
        out: &mut W,
        view: &RouteView<'_>,
        palette: ColorPalette,
    ) -> Result<()> {
        match self {
            OutputFormat::Json => write_json(out, view),
            OutputFormat::Text => write_route_text(out, view, palette),
        }
    }

    pub fn write_nearest<W: Write>(self, out: &mut W, view: &NearestView) -> Result<()> {
        match self {
            OutputFormat::Json => write_json(out, view),
            OutputFormat::Text => {
                writeln!(
                    out,
                    "Nearest vertex to {}: #{} at {} ({} away, {} edge{})",
                    view.query,
                    view.id,
                    Coordinate::new(view.latitude, view.longitude),
                    format_distance(view.distance_km),
                    view.degree,
                    if view.degree == 1 { "" } else { "s" }
                )?;
                Ok(())
            }
        }
    }

    pub fn write_search<W: Write>(self, out: &mut W, view: &SearchView<'_>) -> Result<()> {
        match self {
            OutputFormat::Json => write_json(out, view),
            OutputFormat::Text => {
                if view.matches.is_empty() {
                    writeln!(
                        out,
                        "No location matches '{}' ({}).",
                        view.query, view.algorithm
                    )?;
                    return Ok(());
                }
                writeln!(out, "Matches for '{}' ({}):", view.query, view.algorithm)?;
                write_location_lines(out, &view.matches)
            }
        }
    }

    pub fn write_locations<W: Write>(self, out: &mut W, locations: &[&TravelLocation]) -> Result<()> {
        match self {
            OutputFormat::Json => write_json(out, locations),
            OutputFormat::Text => {
                if locations.is_empty() {
                    writeln!(out, "No saved locations.")?;
                    return Ok(());
                }
                write_location_lines(out, locations)
            }
        }
    }

    pub fn write_stats<W: Write>(self, out: &mut W, view: &StatsView) -> Result<()> {
        match self {
            OutputFormat::Json => write_json(out, view),
            OutputFormat::Text => {
                writeln!(
                    out,
                    "Network: {} nodes, {} edges ({} isolated)",
                    view.nodes, view.edges, view.isolated_nodes
                )?;
                writeln!(
                    out,
                    "Ways: {} of {} walkable",
                    view.import.walkable_ways, view.import.ways
                )?;
                writeln!(
                    out,
                    "Edges: {} added, {} duplicate, {} rejected",
                    view.import.edges_added, view.import.duplicate_edges, view.import.rejected_edges
                )?;
                if let Some(count) = view.locations {
                    writeln!(out, "Saved locations: {count}")?;
                }
                Ok(())
            }
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_route_text<W: Write>(out: &mut W, view: &RouteView<'_>, palette: ColorPalette) -> Result<()> {
    let plan = view.plan;
    writeln!(
        out,
        "Route from {bold}{}{reset} to {bold}{}{reset}:",
        view.from,
        view.to,
        bold = palette.white_bold,
        reset = palette.reset
    )?;
    writeln!(
        out,
        "  strategy: {} | hops: {} | distance: {green}{}{reset} | iterations: {}",
        plan.strategy,
        plan.hop_count(),
        format_distance(plan.total_distance_km),
        plan.iterations,
        green = palette.green,
        reset = palette.reset
    )?;

    let last = plan.steps.len().saturating_sub(1);
    for step in &plan.steps {
        let coordinate = Coordinate::new(step.latitude, step.longitude);
        let tag = if step.index == 0 {
            format!("{}START{}", palette.tag_start, palette.reset)
        } else if step.index == last {
            format!("{}GOAL{} ", palette.tag_goal, palette.reset)
        } else {
            "STEP ".to_string()
        };

        if step.index == 0 {
            writeln!(out, "  {tag} #{} ({coordinate})", step.id)?;
        } else {
            writeln!(
                out,
                "  {tag} #{} ({coordinate}) {gray}+{}{reset}",
                step.id,
                format_distance(step.leg_km),
                gray = palette.gray,
                reset = palette.reset
            )?;
        }
    }
    Ok(())
}

fn write_location_lines<W: Write>(out: &mut W, locations: &[&TravelLocation]) -> Result<()> {
    for (index, location) in locations.iter().enumerate() {
        write!(
            out,
            "{:>3}. {} ({}) created {}",
            index + 1,
            location.name,
            location.coordinate(),
            location.created_at.format("%Y-%m-%d %H:%M UTC")
        )?;
        if let Some(owner) = &location.owner {
            write!(out, " owner: {owner}")?;
        }
        if !location.preferences.is_empty() {
            let labels: Vec<&str> = location
                .preferences
                .iter()
                .map(|preference| preference.label.as_str())
                .collect();
            write!(out, " [{}]", labels.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
