use const_format::concatcp;
use git_version::git_version;

const GIT_DESCRIBE: &str = git_version!(args = ["--always", "--dirty=-modified"], fallback = "nogit");

/// Crate version plus the git revision it was built from
pub const STACK_VERSION: &str = concatcp!(env!("CARGO_PKG_VERSION"), "-", GIT_DESCRIBE);
