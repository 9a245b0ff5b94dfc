use std::env;
use std::sync::Arc;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{Bindings, Command, Value};
use crate::constant::*;
use crate::model::Prefix;
use crate::parser::base::{ConfigError, UsageError};
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::parser::printer::Help;

/// Runs an argument vector against a command tree.
///
/// ### Example
/// ```
/// use argtree::{Argument, Command, Dispatcher};
///
/// let root = Command::new().command(
///     "halt",
///     Command::new()
///         .add(Argument::unnamed("service").required())
///         .callback(|bindings| {
///             assert_eq!(bindings.text("service"), Some("myservice"));
///         }),
/// );
/// let dispatcher = Dispatcher::new("program", &root);
///
/// assert_eq!(dispatcher.dispatch(&["program", "halt", "myservice"]), 0);
/// ```
pub struct Dispatcher<'c> {
    program: String,
    root: &'c Command,
    user_interface: Box<dyn UserInterface>,
}

impl<'c> std::fmt::Debug for Dispatcher<'c> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("program", &self.program)
            .field("root", &self.root)
            .finish()
    }
}

impl<'c> Dispatcher<'c> {
    /// Create a dispatcher which writes help and errors to standard output.
    pub fn new(program: impl Into<String>, root: &'c Command) -> Self {
        Self::with_interface(program, root, Box::new(ConsoleInterface::default()))
    }

    /// Create a dispatcher which writes help and errors to `user_interface`.
    pub fn with_interface(
        program: impl Into<String>,
        root: &'c Command,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            program: program.into(),
            root,
            user_interface,
        }
    }

    /// Create a dispatcher, checking the command tree first (see [`Command::validate`]).
    pub fn validated(program: impl Into<String>, root: &'c Command) -> Result<Self, ConfigError> {
        root.validate()?;
        Ok(Self::new(program, root))
    }

    /// Dispatch a full argument vector, whose first element (the program name) is skipped.
    ///
    /// Returns the exit code:
    /// * the callback's result, `0` when it returns nothing,
    /// * `0` when help was requested,
    /// * [`EXIT_USAGE`] when the input was rejected,
    /// * [`EXIT_MALFORMED`] when dispatch reached a command that is neither a leaf nor a group.
    pub fn dispatch<S: AsRef<str>>(&self, argv: &[S]) -> i32 {
        let tokens: Vec<&str> = argv.iter().skip(1).map(AsRef::as_ref).collect();
        self.dispatch_tokens(&tokens)
    }

    /// Dispatch the tokens that follow the program name.
    pub fn dispatch_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> i32 {
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
        let mut path = vec![self.program.clone()];
        let code = self.execute(self.root, &tokens, &mut path);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatch of {tokens:?} exits with {code}.");
        }

        code
    }

    /// Print the help of the whole command tree.
    pub fn print_help(&self) {
        Help::collect(self.root, &[&self.program]).print(&*self.user_interface);
    }

    /// Dispatch the Cli [`env::args`] and exit the process with the resulting code (via [`std::process::exit`]).
    pub fn run(&self) -> ! {
        let argv: Vec<String> = env::args().collect();
        std::process::exit(self.dispatch(&argv));
    }

    fn execute(&self, command: &Command, tokens: &[&str], path: &mut Vec<String>) -> i32 {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Executing '{}' with {tokens:?}.", path.join(" "));
        }

        match tokens.first() {
            None if !command.is_leaf() => {
                return self.reject(command, path, UsageError::MissingCommand);
            }
            Some(token) if HELP_TOKENS.contains(token) => {
                Help::collect(command, path.as_slice()).print(&*self.user_interface);
                return EXIT_SUCCESS;
            }
            _ => {}
        }

        if command.is_leaf() {
            return match bind(command, tokens, &path.join(" ")) {
                Ok(bindings) => command.invoke(&bindings).unwrap_or(EXIT_SUCCESS),
                Err(error) => self.reject(command, path, error),
            };
        }

        if command.has_children() {
            // A group with no tokens has been rejected above.
            let token = tokens[0];

            return match command.child(token) {
                Some(child) => {
                    path.push(token.to_string());
                    self.execute(child, &tokens[1..], path)
                }
                None => self.reject(command, path, UsageError::UnknownCommand(token.to_string())),
            };
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Command '{}' is neither a leaf nor a group.", path.join(" "));
        }

        EXIT_MALFORMED
    }

    fn reject(&self, command: &Command, path: &[String], error: UsageError) -> i32 {
        Help::collect(command, path).print(&*self.user_interface);
        self.user_interface.print_error(&error);
        EXIT_USAGE
    }
}

/// Dispatch `argv` (program name first) against `root`, writing help and errors to standard output.
///
/// See [`Dispatcher::dispatch`] for the exit codes.
pub fn dispatch<S: AsRef<str>>(root: &Command, program: &str, argv: &[S]) -> i32 {
    Dispatcher::new(program, root).dispatch(argv)
}

/// Print the help of `root` to standard output.
pub fn print_help(program: &str, root: &Command) {
    Dispatcher::new(program, root).print_help();
}

/// Strip at most one leading and one trailing single quote.
fn unquote(value: &str) -> &str {
    let value = value.strip_prefix('\'').unwrap_or(value);
    value.strip_suffix('\'').unwrap_or(value)
}

/// Bind the tokens to the arguments of a leaf command.
///
/// Each token is matched by its prefix alone: `--name` by name, `-short` by short alias, and a bare token by the first unbound `UNNAMED` argument.
/// Arguments left unbound then take their default, fail if required, or bind to nothing.
pub(crate) fn bind(command: &Command, tokens: &[&str], path: &str) -> Result<Bindings, UsageError> {
    let arguments = command.arguments();
    let mut bindings = Bindings::default();

    if arguments.is_empty() {
        return Ok(bindings);
    }

    for token in tokens {
        let (prefix, body) = Prefix::classify(token);
        let (key, value) = match prefix {
            Prefix::Unnamed => (body, Some(body)),
            Prefix::Name | Prefix::Short => match body.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (body, None),
            },
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Token '{token}' classified as {prefix} '{key}'.");
        }

        let argument = arguments
            .iter()
            .find(|argument| match prefix {
                Prefix::Name => argument.name() == key,
                Prefix::Short => argument.short_name() == Some(key),
                Prefix::Unnamed => argument.is_unnamed() && !bindings.contains(argument.name()),
            })
            .ok_or_else(|| UsageError::UnknownArgument(token.to_string()))?;

        let bound: Value = if argument.flags().takes_value() || prefix == Prefix::Unnamed {
            let raw = value.unwrap_or_default();

            if raw.is_empty() {
                return Err(UsageError::MissingValue {
                    name: argument.name().to_string(),
                    example: argument.value_example(path),
                });
            }

            argument
                .capture(unquote(raw))
                .map_err(|_| UsageError::InvalidValue {
                    name: argument.name().to_string(),
                    example: argument.conversion_example(path),
                })?
        } else {
            Arc::new(true)
        };

        bindings.bind(argument.name(), Some(bound));
    }

    for argument in arguments {
        if bindings.contains(argument.name()) {
            continue;
        }

        if let Some(default) = argument.default_value() {
            bindings.bind(argument.name(), Some(default.value()));
        } else if argument.is_required() {
            return Err(UsageError::MissingRequired {
                name: argument.name().to_string(),
                example: argument.required_example(path),
            });
        } else {
            bindings.bind(argument.name(), None);
        }
    }

    Ok(bindings)
}
