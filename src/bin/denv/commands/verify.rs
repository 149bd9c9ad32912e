//! `denv verify` command

use anyhow::{bail, Result};

use super::Session;
use crate::cli::VerifyArgs;
use denv::graph::{PackageGraph, TargetGraph};
use denv::ops::{verify, VerifyReport};
use denv::util::diagnostic::emit;

pub fn execute(args: VerifyArgs, session: &mut Session) -> Result<()> {
    let pkg = session.package(&args.package)?;
    let color = session.ctx.color();

    // Linking the whole graph catches dangling references and cycles
    // across packages; the per-package checks below catch miswiring.
    let packages = PackageGraph::build(&pkg)
        .and_then(|graph| TargetGraph::build(&graph).map(|_| graph))
        .map_err(|e| {
            emit(&e.to_diagnostic(), color);
            anyhow::anyhow!("verification failed: {} does not link", args.package)
        })?;

    let reports: Vec<VerifyReport> = if args.all {
        packages
            .topological_order()
            .into_iter()
            .map(|p| verify(p))
            .collect()
    } else {
        vec![verify(&pkg)]
    };

    let mut errors = 0;
    let mut warnings = 0;
    for report in &reports {
        for diag in &report.diagnostics {
            emit(diag, color);
        }
        errors += report.errors();
        warnings += report.warnings();

        if report.diagnostics.is_empty() {
            println!("{}: ok", report.package);
        }
    }

    if errors > 0 {
        bail!(
            "verification failed: {} error(s), {} warning(s)",
            errors,
            warnings
        );
    }
    if warnings > 0 {
        println!("{} warning(s)", warnings);
    }
    Ok(())
}
