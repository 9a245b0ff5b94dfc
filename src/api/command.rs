use std::collections::HashSet;

use crate::api::{Argument, Bindings};
use crate::constant::HELP_TOKENS;
use crate::model::Flags;
use crate::parser::ConfigError;

type Callback = Box<dyn Fn(&Bindings) -> i32 + Send + Sync>;

/// Behaviour to turn a callback result into a process exit code.
///
/// Empty results (`()`, `None`, `0`, `false`) mean success.
pub trait Outcome {
    /// The exit code of this result.
    fn exit_code(self) -> i32;
}

impl Outcome for () {
    fn exit_code(self) -> i32 {
        0
    }
}

impl Outcome for i32 {
    fn exit_code(self) -> i32 {
        self
    }
}

impl Outcome for Option<i32> {
    fn exit_code(self) -> i32 {
        self.unwrap_or(0)
    }
}

impl Outcome for bool {
    fn exit_code(self) -> i32 {
        i32::from(self)
    }
}

/// A node of the command tree.
///
/// A command is either a *leaf*, bound to a callback and its arguments, or a *group* of named child commands.
/// A command with a callback is a leaf, even if children were also added.
/// A command with neither is malformed; dispatching into it yields [`EXIT_MALFORMED`](crate::EXIT_MALFORMED).
///
/// ### Example
/// ```
/// use argtree::{Argument, Command};
///
/// let root = Command::new()
///     .about("Example App")
///     .command(
///         "daemon",
///         Command::new()
///             .about("Daemon manager")
///             .command("start", Command::new().about("Starts Daemon").callback(|_| ()))
///             .command(
///                 "stop",
///                 Command::new()
///                     .about("Stops Daemon")
///                     .add(Argument::option("force").short("f").help("force shutdown"))
///                     .callback(|bindings| {
///                         let _force = bindings.flag("force");
///                     }),
///             ),
///     );
/// assert!(root.validate().is_ok());
/// ```
#[derive(Default)]
pub struct Command {
    about: Option<String>,
    callback: Option<Callback>,
    arguments: Vec<Argument>,
    children: Vec<(String, Command)>,
}

impl Command {
    /// Create an empty command.
    /// Give it a callback (leaf) or children (group) before dispatching into it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document the command in the help output.
    /// If repeated, only the final description applies.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Bind the callback that runs once the arguments are bound.
    pub fn callback<F, R>(mut self, callback: F) -> Self
    where
        F: Fn(&Bindings) -> R + Send + Sync + 'static,
        R: Outcome,
    {
        self.callback
            .replace(Box::new(move |bindings: &Bindings| {
                callback(bindings).exit_code()
            }));
        self
    }

    /// Add an argument.
    ///
    /// The order of `UNNAMED` arguments is their positional order during dispatch.
    pub fn add(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Add a child command, typed on the command line as `name`.
    ///
    /// Children are listed in insertion order.
    /// If repeated for the same `name`, the new command replaces the old one in its original position.
    pub fn command(mut self, name: impl Into<String>, command: Command) -> Self {
        let name = name.into();

        match self.children.iter_mut().find(|(n, _)| n == &name) {
            Some((_, existing)) => *existing = command,
            None => self.children.push((name, command)),
        }

        self
    }

    /// The help text, if any.
    pub fn description(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// The declared arguments, in declaration order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// The child commands, in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Command)> {
        self.children.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// The child typed as `name`.
    pub fn child(&self, name: &str) -> Option<&Command> {
        self.children
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Whether a callback is bound.
    pub fn is_leaf(&self) -> bool {
        self.callback.is_some()
    }

    /// Whether any child command was added.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub(crate) fn invoke(&self, bindings: &Bindings) -> Option<i32> {
        self.callback.as_ref().map(|callback| callback(bindings))
    }

    /// Check the command tree for configuration errors.
    ///
    /// Dispatch never calls this; it is meant for the host program (or its tests) to catch mistakes early:
    /// * a command that is neither a leaf nor a group,
    /// * repeated argument names or short aliases within a command,
    /// * an argument that is both `VALUE` and `UNNAMED`,
    /// * an empty child name, or one that collides with a help token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_at("")
    }

    fn validate_at(&self, path: &str) -> Result<(), ConfigError> {
        let label = if path.is_empty() { "<root>" } else { path };

        if !self.is_leaf() && !self.has_children() {
            return Err(ConfigError(format!(
                "Command '{label}' needs either a callback or child commands."
            )));
        }

        let mut names = HashSet::new();
        let mut shorts = HashSet::new();

        for argument in &self.arguments {
            if !names.insert(argument.name()) {
                return Err(ConfigError(format!(
                    "Command '{label}' cannot duplicate the argument '{}'.",
                    argument.name()
                )));
            }

            if let Some(short) = argument.short_name() {
                if !shorts.insert(short) {
                    return Err(ConfigError(format!(
                        "Command '{label}' cannot duplicate the short alias '-{short}'."
                    )));
                }
            }

            if argument.flags().contains(Flags::VALUE | Flags::UNNAMED) {
                return Err(ConfigError(format!(
                    "Command '{label}' argument '{}' cannot be both VALUE and UNNAMED.",
                    argument.name()
                )));
            }
        }

        for (name, child) in &self.children {
            if name.is_empty() || HELP_TOKENS.contains(&name.as_str()) {
                return Err(ConfigError(format!(
                    "Command '{label}' cannot name a child command '{name}'."
                )));
            }

            let child_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path} {name}")
            };
            child.validate_at(&child_path)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("about", &self.about)
            .field("leaf", &self.is_leaf())
            .field("arguments", &self.arguments)
            .field(
                "children",
                &self.children.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;
    use rstest::rstest;

    #[rstest]
    #[case(().exit_code(), 0)]
    #[case(0i32.exit_code(), 0)]
    #[case(3i32.exit_code(), 3)]
    #[case((-4i32).exit_code(), -4)]
    #[case(None::<i32>.exit_code(), 0)]
    #[case(Some(7i32).exit_code(), 7)]
    #[case(false.exit_code(), 0)]
    #[case(true.exit_code(), 1)]
    fn outcome(#[case] code: i32, #[case] expected: i32) {
        assert_eq!(code, expected);
    }

    #[test]
    fn command_replaces_in_place() {
        // Setup
        let command = Command::new()
            .command("a", Command::new().about("first"))
            .command("b", Command::new())
            .command("a", Command::new().about("second"));

        // Execute
        let children: Vec<(&str, Option<&str>)> = command
            .children()
            .map(|(n, c)| (n, c.description()))
            .collect();

        // Verify
        assert_eq!(children, vec![("a", Some("second")), ("b", None)]);
        assert!(command.child("b").is_some());
        assert!(command.child("c").is_none());
    }

    #[test]
    fn invoke() {
        // Setup
        let leaf = Command::new().callback(|bindings| bindings.len() as i32 + 10);
        let group = Command::new().command("x", Command::new());

        // Verify
        assert_eq!(leaf.invoke(&Bindings::default()), Some(10));
        assert_eq!(group.invoke(&Bindings::default()), None);
        assert!(leaf.is_leaf());
        assert!(!group.is_leaf());
        assert!(group.has_children());
    }

    #[test]
    fn validate_ok() {
        // Setup
        let root = Command::new().command(
            "service",
            Command::new().command(
                "halt",
                Command::new()
                    .add(Argument::unnamed("service").required())
                    .add(Argument::value("wait").short("w"))
                    .callback(|_| ()),
            ),
        );

        // Execute & verify
        root.validate().unwrap();
    }

    #[rstest]
    #[case(Command::new(), "Command '<root>' needs either a callback or child commands.")]
    #[case(
        Command::new().command("a", Command::new().command("b", Command::new())),
        "Command 'a b' needs either a callback or child commands."
    )]
    #[case(
        Command::new().add(Argument::option("x")).add(Argument::value("x")).callback(|_| ()),
        "cannot duplicate the argument 'x'"
    )]
    #[case(
        Command::new().add(Argument::option("x").short("s")).add(Argument::value("y").short("s")).callback(|_| ()),
        "cannot duplicate the short alias '-s'"
    )]
    #[case(
        Command::new().add(Argument::new("x", Flags::VALUE | Flags::UNNAMED)).callback(|_| ()),
        "argument 'x' cannot be both VALUE and UNNAMED"
    )]
    #[case(
        Command::new().command("", Command::new().callback(|_| ())),
        "cannot name a child command ''"
    )]
    #[case(
        Command::new().command("help", Command::new().callback(|_| ())),
        "cannot name a child command 'help'"
    )]
    fn validate_error(#[case] command: Command, #[case] message: &str) {
        // Execute
        let error = command.validate().unwrap_err();

        // Verify
        assert_contains!(error.to_string(), message);
    }
}
