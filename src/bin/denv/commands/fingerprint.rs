//! `denv fingerprint` command

use anyhow::Result;

use super::Session;
use crate::cli::FingerprintArgs;
use denv::ops::fingerprint;
use denv::util::hash;

pub fn execute(args: FingerprintArgs, session: &mut Session) -> Result<()> {
    let pkg = session.package(&args.package)?;

    let full = fingerprint(&pkg);
    let shown = if args.short { hash::short(&full) } else { &full };
    println!("{}  {}", shown, pkg.name());
    Ok(())
}
