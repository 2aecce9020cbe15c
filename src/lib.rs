//! Load and validate the settings a static site generator reads at startup.
//!
//! ```no_run
//! let config = siteconf::load("_siteconf.yml")?;
//! assert!(config.per_page().is_none());
//! # Ok::<(), siteconf::Error>(())
//! ```

pub mod error;
pub mod site_model;

pub use siteconf_config as config;

pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::site_model::SiteConfig;

/// Read, parse and validate a configuration file.
pub fn load<P: Into<std::path::PathBuf>>(path: P) -> Result<SiteConfig> {
    let config = config::Config::from_file(path)?;
    SiteConfig::from_config(config)
}

/// Like [`load`], searching `cwd` and its parents for `_siteconf.yml`.
pub fn load_from_cwd<P: Into<std::path::PathBuf>>(cwd: P) -> Result<SiteConfig> {
    let config = config::Config::from_cwd(cwd)?;
    SiteConfig::from_config(config)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn load_from_cwd_finds_config() {
        let site = load_from_cwd("tests/fixtures/config").unwrap();
        assert_eq!(site.site_title, "The OpenType Cookbook");
        assert_eq!(site.root, std::path::Path::new("tests/fixtures/config"));
    }

    #[test]
    fn load_from_cwd_without_config_is_incomplete() {
        let actual = load_from_cwd("tests/fixtures");
        assert!(matches!(
            actual,
            Err(Error::MissingField { field: "author" })
        ));
    }
}
