//! List command implementation.

use crate::cli::ListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the list command.
pub async fn execute_list(args: ListArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let records = super::load_records(&args.document, &config.extractor)?;
    println!("{}", formatter.format_records(&records)?);
    Ok(())
}
