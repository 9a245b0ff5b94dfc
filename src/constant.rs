/// Tokens which, in first position, request the help of the current command.
pub(crate) const HELP_TOKENS: [&str; 4] = ["help", "-help", "--help", "?"];

/// Placeholder used in `--name=<..>` when an argument has no example text.
pub(crate) const DEFAULT_EXAMPLE: &str = "foo";

/// Indent of the top-level help rows (the summary line and the `Commands:` listing).
pub(crate) const TOP_INDENT: usize = 3;

/// Dispatch succeeded, or help was explicitly requested.
pub const EXIT_SUCCESS: i32 = 0;

/// The input tokens were rejected (help and a diagnostic have been printed).
pub const EXIT_USAGE: i32 = -1;

/// The command tree contains a node that is neither a leaf nor a group.
pub const EXIT_MALFORMED: i32 = -2;
