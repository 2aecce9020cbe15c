use std::collections::BTreeMap;

use crate::args;
use crate::error::*;

/// Print the generator settings as JSON
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ExportArgs {
    /// Print on a single line
    #[arg(long)]
    compact: bool,

    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl ExportArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let site = self.config.load_site()?;
        let settings: BTreeMap<_, _> = site.to_settings().into_iter().collect();
        let json = if self.compact {
            serde_json::to_string(&settings)
        } else {
            serde_json::to_string_pretty(&settings)
        }
        .context("Failed to serialize settings")?;
        anstream::println!("{json}");

        Ok(())
    }
}
