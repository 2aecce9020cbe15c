/// `default_pagination` accepts either a flag or a page size.
#[derive(Copy, Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DefaultPagination {
    Toggle(bool),
    PerPage(u32),
}

impl Default for DefaultPagination {
    fn default() -> Self {
        DefaultPagination::Toggle(false)
    }
}
