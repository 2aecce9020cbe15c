use crate::site_model::TemplateError;

/// Why a site configuration could not be loaded.
///
/// Every variant is detected before generation starts and is fatal.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to load site configuration")]
    Load(#[from] status::Status),

    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid template for `{setting}` ({template:?})")]
    InvalidTemplate {
        setting: String,
        template: String,
        #[source]
        source: TemplateError,
    },

    #[error(
        "`{first}` ({first_template:?}) and `{second}` ({second_template:?}) can write the same file"
    )]
    TemplateCollision {
        first: String,
        first_template: String,
        second: String,
        second_template: String,
    },

    #[error("unknown markdown extension `{name}`")]
    UnknownExtension { name: String },

    #[error("`{path}` is listed in both `page_paths` and `article_paths`")]
    PathOverlap { path: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
