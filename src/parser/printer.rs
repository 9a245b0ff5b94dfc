use crate::api::{Argument, Command};
use crate::constant::TOP_INDENT;
use crate::model::Flags;
use crate::parser::interface::UserInterface;

/// One collected row of help: the left column, and the description shown after ` : `.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLine {
    left: String,
    right: Option<String>,
}

impl HelpLine {
    fn new(left: String, right: Option<String>) -> Self {
        Self {
            left,
            right: right.filter(|r| !r.is_empty()),
        }
    }

    fn blank() -> Self {
        Self::new(String::default(), None)
    }

    fn header(title: &str) -> Self {
        Self::new(title.to_string(), None)
    }

    /// The text left of the ` : ` separator, before padding.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// The description, absent on headers and blank rows.
    pub fn right(&self) -> Option<&str> {
        self.right.as_deref()
    }
}

/// The help of a command and everything below it.
///
/// Collection walks the tree the same way dispatch does.
/// Argument columns are aligned per command, while the left column of every row is aligned to the widest row of the whole tree.
///
/// ### Example
/// ```
/// use argtree::{Command, Help};
///
/// let root = Command::new()
///     .about("Example App")
///     .command("start", Command::new().about("Starts Daemon").callback(|_| ()));
/// let help = Help::collect(&root, &["program"]);
///
/// assert_eq!(
///     help.render(),
///     vec![
///         "Usage:              ",
///         "   program <Command> : Example App",
///         "                    ",
///         "Commands:           ",
///         "   start             : Starts Daemon",
///         "                    ",
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct Help {
    lines: Vec<HelpLine>,
    width: usize,
}

struct ArgumentRow<'c> {
    name: &'c str,
    text: String,
    short: String,
    description: String,
}

impl<'c> From<&'c Argument> for ArgumentRow<'c> {
    fn from(argument: &'c Argument) -> Self {
        let short = match argument.short_name() {
            Some(s) => format!(" (-{s})"),
            None => "".to_string(),
        };
        let text = if argument.is_unnamed() {
            format!("<{}>", argument.name())
        } else if argument.flags().contains(Flags::VALUE) {
            format!(
                "--{}=<{}>",
                argument.name(),
                argument
                    .example_text()
                    .unwrap_or(crate::constant::DEFAULT_EXAMPLE)
            )
        } else {
            format!("--{}", argument.name())
        };
        let base = argument
            .description()
            .filter(|d| !d.is_empty())
            .unwrap_or(argument.name());
        let description = match argument.default_value() {
            Some(default) => format!("{base} (default: {})", default.display()),
            None if argument.is_required() => base.to_string(),
            None => format!("{base} (optional)"),
        };

        Self {
            name: argument.name(),
            text,
            short,
            description,
        }
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

impl Help {
    /// Collect the help of `command`, reached via `path` (the program name followed by the sub-command names).
    pub fn collect<S: AsRef<str>>(command: &Command, path: &[S]) -> Self {
        let path: Vec<String> = path.iter().map(|p| p.as_ref().to_string()).collect();
        let mut help = Self {
            lines: Vec::default(),
            width: 0,
        };
        help.collect_command(command, &path, 0, 0);
        help
    }

    /// The collected rows, in output order.
    pub fn lines(&self) -> &[HelpLine] {
        &self.lines
    }

    /// The width of the left column, across every collected row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The final output rows.
    pub fn render(&self) -> Vec<String> {
        let width = self.width;
        self.lines
            .iter()
            .map(|line| match &line.right {
                Some(right) => format!("{:width$} : {right}", line.left),
                None => format!("{:width$}", line.left),
            })
            .collect()
    }

    pub(crate) fn print(&self, user_interface: &(impl UserInterface + ?Sized)) {
        for line in self.render() {
            user_interface.print(line);
        }
    }

    fn push(&mut self, line: HelpLine) {
        self.width = std::cmp::max(self.width, width(&line.left));
        self.lines.push(line);
    }

    /// `indent` is zero only for the command help was requested for.
    /// `name_width` is shared by a command and its siblings.
    fn collect_command(
        &mut self,
        command: &Command,
        path: &[String],
        indent: usize,
        name_width: usize,
    ) {
        let top = indent == 0;
        let prefix = " ".repeat(if top { TOP_INDENT } else { indent });
        let mut unnamed = Vec::default();
        let mut named = Vec::default();
        let mut text_width = 0;
        let mut short_width = 0;

        if command.is_leaf() {
            for argument in command.arguments() {
                let row = ArgumentRow::from(argument);
                text_width = std::cmp::max(text_width, width(&row.text));
                short_width = std::cmp::max(short_width, width(&row.short));

                if argument.is_unnamed() {
                    unnamed.push(row);
                } else {
                    named.push(row);
                }
            }
        }

        named.sort_by(|a, b| a.name.cmp(b.name));

        let last = path.last().map(String::as_str).unwrap_or_default();
        let name = if top { path.join(" ") } else { last.to_string() };
        let name = format!("{name:name_width$}");
        let mut summary = format!("{prefix}{name}");

        if command.has_children() {
            summary.push_str(" <Command>");
        }

        if !unnamed.is_empty() {
            summary.push_str(" <Arguments>");
        }

        if !named.is_empty() {
            summary.push_str(" [Options]");
        }

        if top {
            self.push(HelpLine::header("Usage:"));
        }

        let description = command
            .description()
            .filter(|d| !d.is_empty())
            .unwrap_or(last)
            .to_string();
        self.push(HelpLine::new(summary, Some(description)));

        let column = " ".repeat(name_width + 1);

        if !unnamed.is_empty() && top {
            self.push(HelpLine::blank());
            self.push(HelpLine::header("Arguments:"));
        }

        for row in unnamed {
            self.push_argument(&prefix, &column, row, text_width, short_width);
        }

        if !named.is_empty() && top {
            self.push(HelpLine::blank());
            self.push(HelpLine::header("Options:"));
        }

        for row in named {
            self.push_argument(&prefix, &column, row, text_width, short_width);
        }

        if command.has_children() {
            let child_indent = if top {
                self.push(HelpLine::blank());
                self.push(HelpLine::header("Commands:"));
                TOP_INDENT
            } else {
                indent + width(&name) + 1
            };
            let child_width = command
                .children()
                .map(|(n, _)| width(n))
                .max()
                .unwrap_or_default();

            for (child_name, child) in command.children() {
                let mut child_path = path.to_vec();
                child_path.push(child_name.to_string());
                self.collect_command(child, &child_path, child_indent, child_width);
            }

            self.push(HelpLine::blank());
        } else if top {
            self.push(HelpLine::blank());
        }
    }

    fn push_argument(
        &mut self,
        prefix: &str,
        column: &str,
        row: ArgumentRow,
        text_width: usize,
        short_width: usize,
    ) {
        let ArgumentRow {
            text,
            short,
            description,
            ..
        } = row;
        self.push(HelpLine::new(
            format!("{prefix}{column}{text:text_width$}{short:short_width$}"),
            Some(description),
        ));
    }
}

impl std::fmt::Display for Help {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render().join("\n"))
    }
}
