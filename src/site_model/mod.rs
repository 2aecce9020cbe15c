mod collision;
mod config;
mod content;
mod markdown;
mod output;
mod settings;
mod template;

pub use self::config::*;
pub use self::content::*;
pub use self::markdown::*;
pub use self::output::*;
pub use self::template::*;

pub use siteconf_config::{FeedKind, OutputKind};
