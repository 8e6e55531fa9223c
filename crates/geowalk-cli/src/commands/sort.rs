//! Sorted listing of saved locations.

use std::io;

use anyhow::Result;

use geowalk_lib::{LocationList, SortAlgorithm, SortKey};

use super::CommandContext;

#[derive(Debug, Clone)]
pub struct SortCommandArgs {
    pub key: SortKey,
    pub algorithm: SortAlgorithm,
    pub descending: bool,
    /// Only list locations saved by this owner.
    pub owner: Option<String>,
}

pub fn handle_sort_command(ctx: &CommandContext, args: &SortCommandArgs) -> Result<()> {
    let locations = ctx.load_locations()?;
    let locations: LocationList = match args.owner.as_deref() {
        Some(owner) => locations.owned_by(owner).cloned().collect(),
        None => locations,
    };
    let key = args.key;
    let descending = args.descending;

    let sorted = locations.sorted(args.algorithm, |a, b| {
        let ordering = key.compare(a, b);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });

    ctx.format.write_locations(&mut io::stdout().lock(), &sorted)
}
