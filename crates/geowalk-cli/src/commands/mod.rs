// Handlers for CLI subcommands.
//
// main.rs parses arguments into a `CommandContext` plus per-command args and
// dispatches here; shared data loading lives in this module.

pub mod nearest;
pub mod route;
pub mod search;
pub mod sort;
pub mod stats;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use geowalk_lib::{
    load_locations, load_network, resolve_locations_path, resolve_network_path, Coordinate,
    Error as LibError, Graph, GraphConfig, ImportSummary, LocationList,
};

use crate::output::OutputFormat;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub network: Option<PathBuf>,
    pub locations: Option<PathBuf>,
    pub format: OutputFormat,
    pub config: GraphConfig,
}

impl CommandContext {
    /// Load the walking network and build the routing graph.
    pub fn load_graph(&self) -> Result<(Graph, ImportSummary)> {
        let path = resolve_network_path(self.network.as_deref())
            .context("failed to resolve the walking network path")?;
        let network = load_network(&path)
            .with_context(|| format!("failed to load walking network from {}", path.display()))?;

        let mut graph = Graph::with_config(self.config);
        let summary = graph.import(&network);
        Ok((graph, summary))
    }

    /// Load saved locations; the file must exist.
    pub fn load_locations(&self) -> Result<LocationList> {
        let path = self.locations_path()?;
        load_locations(&path)
            .with_context(|| format!("failed to load saved locations from {}", path.display()))
    }

    /// Load saved locations when the file exists.
    pub fn load_locations_if_present(&self) -> Result<Option<LocationList>> {
        let path = self.locations_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no saved locations file");
            return Ok(None);
        }
        self.load_locations().map(Some)
    }

    fn locations_path(&self) -> Result<PathBuf> {
        resolve_locations_path(self.locations.as_deref())
            .context("failed to resolve the saved locations path")
    }
}

/// A route endpoint given on the command line: `LAT,LON` or a saved name.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Coordinate(Coordinate),
    Named(String),
}

impl Endpoint {
    /// Resolve to a coordinate, looking names up in `locations`.
    pub fn resolve(&self, locations: Option<&LocationList>) -> Result<Coordinate> {
        match self {
            Endpoint::Coordinate(coordinate) => Ok(*coordinate),
            Endpoint::Named(name) => {
                let list = locations.with_context(|| {
                    format!("'{name}' is not a coordinate and no saved locations are available")
                })?;
                Ok(list.resolve(name)?.coordinate())
            }
        }
    }

    /// Label shown in output: the name, or the coordinate as typed.
    pub fn label(&self) -> String {
        match self {
            Endpoint::Coordinate(coordinate) => coordinate.to_string(),
            Endpoint::Named(name) => name.clone(),
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Endpoint::Named(_))
    }
}

impl FromStr for Endpoint {
    type Err = LibError;

    /// Anything that looks numeric before a comma must be a valid coordinate;
    /// everything else is treated as a location name.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.parse::<Coordinate>() {
            Ok(coordinate) => Ok(Endpoint::Coordinate(coordinate)),
            Err(err) if looks_numeric(input) => Err(err),
            Err(_) => Ok(Endpoint::Named(input.trim().to_string())),
        }
    }
}

fn looks_numeric(input: &str) -> bool {
    input
        .split_once(',')
        .is_some_and(|(lat, _)| lat.trim().parse::<f64>().is_ok())
}
