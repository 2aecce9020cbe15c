pub(crate) use anyhow::{bail, Context as _, Result};
