mod config;
mod output;
mod overrides;
mod pagination;

pub mod path;

pub use self::config::*;
pub use self::output::*;
pub use self::overrides::*;
pub use self::pagination::*;

pub type RelPath = relative_path::RelativePathBuf;

type Status = status::Status;
type Result<T, E = Status> = std::result::Result<T, E>;
