use std::io::Write;
use std::path;

use crate::error::*;

/// Validate and export static site settings
#[derive(Debug, clap::Parser)]
#[command(name = "siteconf", about, version, propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: crate::Command,

    #[command(flatten)]
    pub(crate) verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(flatten)]
    pub(crate) color: colorchoice_clap::Color,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Config file to use [default: _siteconf.yml]
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<path::PathBuf>,

    /// Base URL to publish under, overriding `site_url`
    #[arg(long, value_name = "URL")]
    pub(crate) site_url: Option<String>,

    /// Link relative to the current document, for previews without a server
    #[arg(long, overrides_with("absolute_urls"))]
    relative_urls: bool,

    /// Link through `site_url`, for publishing
    #[arg(long, overrides_with("relative_urls"))]
    absolute_urls: bool,
}

impl ConfigArgs {
    pub(crate) fn load_config(&self) -> Result<siteconf::config::Config> {
        let mut config = if let Some(config_path) = self.config.as_deref() {
            siteconf::config::Config::from_file(config_path).with_context(|| {
                format!("Error reading config file {}", config_path.display())
            })?
        } else {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            siteconf::config::Config::from_cwd(cwd)?
        };

        if let Some(site_url) = &self.site_url {
            config.site_url = Some(site_url.clone());
        }
        if let Some(relative_urls) = resolve_bool_arg(self.relative_urls, self.absolute_urls) {
            config.relative_urls = relative_urls;
        }

        Ok(config)
    }

    pub(crate) fn load_site(&self) -> Result<siteconf::SiteConfig> {
        let config = self.load_config()?;
        let site = siteconf::SiteConfig::from_config(config)?;
        Ok(site)
    }
}

fn resolve_bool_arg(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
        (_, _) => unreachable!("clap should make this impossible"),
    }
}

pub(crate) fn init_logging(
    level: &clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,
    colored: bool,
) {
    let mut builder = env_logger::Builder::new();
    builder.write_style(if colored {
        env_logger::WriteStyle::Always
    } else {
        env_logger::WriteStyle::Never
    });
    builder.filter_level(level.log_level_filter());
    builder.format(|f, record| {
        let style = f.default_level_style(record.level());
        let level = format!("[{}]", record.level()).to_lowercase();
        writeln!(f, "{style}{level:8}{style:#} {}", record.args())
    });
    builder.init();
}
