//! `denv tree` command

use anyhow::Result;

use super::Session;
use crate::cli::TreeArgs;
use denv::graph::PackageGraph;
use denv::ops::tree;

pub fn execute(args: TreeArgs, session: &mut Session) -> Result<()> {
    let pkg = session.package(&args.package)?;
    let graph = PackageGraph::build(&pkg)?;

    print!("{}", tree(&graph, args.depth));
    Ok(())
}
