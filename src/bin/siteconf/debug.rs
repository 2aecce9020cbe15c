use std::collections::BTreeMap;
use std::io::Write;

use siteconf::site_model::{FeedKind, OutputKind, Placeholder};

use crate::args;
use crate::error::*;

/// Print site debug information
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints post-processed config
    Config {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Lists where each kind of output and feed is written
    Outputs {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Shows the link and file a document with this title would get
    Path {
        /// Document title, slugified the way the generator does
        title: String,

        /// Kind of output to resolve
        #[arg(long, default_value = "page")]
        kind: OutputKind,

        /// Language code [default: `default_lang`]
        #[arg(long)]
        lang: Option<String>,

        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },
}

impl DebugCommands {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config { config } => {
                let site = config.load_site()?;
                anstream::println!("{site}");
            }
            Self::Outputs { config } => {
                let site = config.load_site()?;
                let dim = anstyle::Style::new().dimmed();
                let mut stdout = anstream::stdout().lock();
                for kind in OutputKind::ALL {
                    let output = site.output(kind);
                    if output.is_suppressed() {
                        writeln!(stdout, "{:<16} {dim}(suppressed){dim:#}", kind.as_str())?;
                    } else {
                        writeln!(
                            stdout,
                            "{:<16} {} -> {}",
                            kind.as_str(),
                            output.url,
                            output.save_as
                        )?;
                    }
                }
                for kind in FeedKind::ALL {
                    match site.feed(kind) {
                        Some(path) => writeln!(stdout, "{:<16} {path}", kind.as_str())?,
                        None => {
                            writeln!(stdout, "{:<16} {dim}(disabled){dim:#}", kind.as_str())?;
                        }
                    }
                }
            }
            Self::Path {
                title,
                kind,
                lang,
                config,
            } => {
                let site = config.load_site()?;
                let output = site.output(*kind);
                if output.is_suppressed() {
                    bail!("`{kind}` outputs are suppressed");
                }

                let slug = siteconf::config::path::slugify(title);
                if slug.is_empty() {
                    bail!("`{title}` has nothing to slugify");
                }
                let lang = lang.clone().unwrap_or_else(|| site.default_lang.clone());
                let values = BTreeMap::from([
                    (Placeholder::Slug, slug),
                    (Placeholder::Name, title.clone()),
                    (Placeholder::Lang, lang),
                ]);

                let url = output
                    .url
                    .render(&values)
                    .with_context(|| format!("Failed to render `{}`", output.url))?;
                let save_as = output
                    .save_as
                    .render(&values)
                    .with_context(|| format!("Failed to render `{}`", output.save_as))?;

                let mut stdout = anstream::stdout().lock();
                writeln!(stdout, "url: {}", site.link(&url))?;
                writeln!(stdout, "save_as: {save_as}")?;
            }
        }

        Ok(())
    }
}
