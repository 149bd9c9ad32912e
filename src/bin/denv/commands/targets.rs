//! `denv targets` command

use anyhow::Result;

use super::Session;
use crate::cli::TargetsArgs;
use denv::graph::{PackageGraph, TargetGraph};

pub fn execute(args: TargetsArgs, session: &mut Session) -> Result<()> {
    let pkg = session.package(&args.package)?;
    let packages = PackageGraph::build(&pkg)?;
    let targets = TargetGraph::build(&packages)?;

    tracing::debug!(
        "{} targets across {} packages",
        targets.len(),
        packages.len()
    );

    for (i, target) in targets.build_order().into_iter().enumerate() {
        println!("{:>3}. {} ({})", i + 1, target, target.kind);
    }
    Ok(())
}
