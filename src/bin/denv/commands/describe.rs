//! `denv describe` command

use anyhow::Result;

use super::Session;
use crate::cli::DescribeArgs;
use denv::ops::describe;

pub fn execute(args: DescribeArgs, session: &mut Session) -> Result<()> {
    let pkg = session.package(&args.package)?;

    let config = session.ctx.config();
    let format = args.format.unwrap_or_else(|| config.format());
    let separator = args.separator.unwrap_or_else(|| config.separator());

    let text = describe(&pkg, format, separator)?;
    println!("{}", text.trim_end());
    Ok(())
}
