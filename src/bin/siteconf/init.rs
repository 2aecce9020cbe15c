use std::fs;
use std::io::Write;
use std::path;

use crate::error::*;

const SITECONF_YML: &str = "\
author: Your Name
site_title: My Site
site_url: http://example.com
content_path: content
timezone: UTC
default_lang: en
default_pagination: false
markdown_extensions:
  - toc
  - extra
relative_urls: true
theme: theme
outputs:
  page:
    url: \"{slug}.html\"
    save_as: \"{slug}.html\"
page_paths:
  - \"\"
article_paths:
  - nopath
suppress:
  - article
  - article_lang
  - category
  - tag
  - author
  - year_archive
  - month_archive
  - day_archive
  - archives
  - authors
  - categories
  - tags
  - index
disable_feeds:
  - all_atom
  - category_atom
  - translation_atom
  - author_atom
  - author_rss
";

/// Create a starter configuration for a pages-only site
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct InitArgs {
    /// Target directory
    #[arg(default_value = "./")]
    pub(crate) directory: path::PathBuf,
}

impl InitArgs {
    pub(crate) fn run(&self) -> Result<()> {
        create_new_project(&self.directory).with_context(|| {
            format!("Could not create a new site in {}", self.directory.display())
        })?;
        log::info!("Created new site at {}", self.directory.display());

        Ok(())
    }
}

pub(crate) fn create_new_project(dest: &path::Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    create_file(
        &dest.join(siteconf::config::CONFIG_FILE_NAME),
        SITECONF_YML,
    )?;
    fs::create_dir_all(dest.join("content"))?;

    Ok(())
}

fn create_file(path: &path::Path, content: &str) -> Result<()> {
    log::trace!("Creating file {}", path.display());

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Failed to create file {}", path.display()))?;

    file.write_all(content.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starter_config_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        create_new_project(dir.path()).unwrap();

        let site = siteconf::load(dir.path().join("_siteconf.yml")).unwrap();
        assert_eq!(site.site_title, "My Site");
        assert!(dir.path().join("content").is_dir());
        assert!(site.feed(siteconf::site_model::FeedKind::AllAtom).is_none());
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        create_new_project(dir.path()).unwrap();
        assert!(create_new_project(dir.path()).is_err());
    }
}
