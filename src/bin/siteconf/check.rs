use crate::args;
use crate::error::*;

/// Validate the site configuration
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CheckArgs {
    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let site = self.config.load_site()?;

        let suppressed = site.suppressed();
        if !suppressed.is_empty() {
            log::info!("{} of {} outputs suppressed", suppressed.len(), site.outputs.len());
        }
        let disabled = site.disabled_feeds();
        if !disabled.is_empty() {
            log::info!("{} of {} feeds disabled", disabled.len(), site.feeds.len());
        }
        log::info!("Configuration for `{}` is valid", site.site_title);

        Ok(())
    }
}
