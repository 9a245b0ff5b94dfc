use std::any::Any;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::constant::DEFAULT_EXAMPLE;
use crate::model::Flags;

/// A bound value, type-erased so that arguments of differing types live under one command.
pub type Value = Arc<dyn Any + Send + Sync>;

type Converter = Box<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// The declared default of an argument.
#[derive(Clone)]
pub(crate) struct DefaultValue {
    value: Value,
    display: String,
}

impl DefaultValue {
    pub(crate) fn value(&self) -> Value {
        self.value.clone()
    }

    pub(crate) fn display(&self) -> &str {
        &self.display
    }
}

/// The declaration of one parameter of a leaf [`Command`](crate::Command).
///
/// ### Example
/// ```
/// use argtree::{Argument, Flags};
///
/// let service = Argument::new("service", Flags::UNNAMED | Flags::REQUIRED)
///     .help("name of service");
/// let wait = Argument::value("wait")
///     .short("w")
///     .example("seconds")
///     .help("time to wait for service to be shutdown")
///     .default(0i64)
///     .parse::<i64>();
/// # let _ = (service, wait);
/// ```
pub struct Argument {
    name: String,
    flags: Flags,
    short: Option<String>,
    help: Option<String>,
    example: Option<String>,
    default: Option<DefaultValue>,
    converter: Option<Converter>,
}

impl Argument {
    /// Declare an argument with explicit flags.
    pub fn new(name: impl Into<String>, flags: Flags) -> Self {
        Self {
            name: name.into(),
            flags,
            short: None,
            help: None,
            example: None,
            default: None,
            converter: None,
        }
    }

    /// Declare a presence switch (`--name`), which binds `true` when given.
    pub fn option(name: impl Into<String>) -> Self {
        Self::new(name, Flags::OPTION)
    }

    /// Declare a named value (`--name=value`).
    pub fn value(name: impl Into<String>) -> Self {
        Self::new(name, Flags::VALUE)
    }

    /// Declare a positional value.
    pub fn unnamed(name: impl Into<String>) -> Self {
        Self::new(name, Flags::UNNAMED)
    }

    /// Mark the argument as required.
    /// A declared default still takes precedence.
    pub fn required(mut self) -> Self {
        self.flags |= Flags::REQUIRED;
        self
    }

    /// Alias usable with a single dash: `-short` or `-short=value`.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short.replace(short.into());
        self
    }

    /// Document the argument in the help output.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Placeholder shown in usage examples, ex: `--wait=<seconds>`.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example.replace(example.into());
        self
    }

    /// Value bound when the argument is absent.
    /// Any default counts as present, including `0`, `""` and `false`.
    pub fn default<T>(mut self, value: T) -> Self
    where
        T: Any + Send + Sync + std::fmt::Display,
    {
        let display = value.to_string();
        self.default.replace(DefaultValue {
            value: Arc::new(value),
            display,
        });
        self
    }

    /// Convert the raw value before binding it.
    /// A conversion error is reported to the user as a type mismatch; its detail is not shown.
    pub fn convert<T, E, F>(mut self, converter: F) -> Self
    where
        T: Any + Send + Sync,
        E: std::fmt::Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        self.converter.replace(Box::new(move |raw: &str| {
            converter(raw)
                .map(|value| Arc::new(value) as Value)
                .map_err(|error| error.to_string())
        }));
        self
    }

    /// Convert the raw value via [`FromStr`].
    pub fn parse<T>(self) -> Self
    where
        T: FromStr + Any + Send + Sync,
        <T as FromStr>::Err: std::fmt::Display,
    {
        self.convert(T::from_str)
    }

    /// The key of this argument in the [`Bindings`](crate::Bindings).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the argument is matched.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// The single dash alias, if any.
    pub fn short_name(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// The help text, if any.
    pub fn description(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub(crate) fn example_text(&self) -> Option<&str> {
        self.example.as_deref()
    }

    pub(crate) fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub(crate) fn is_unnamed(&self) -> bool {
        self.flags.contains(Flags::UNNAMED)
    }

    pub(crate) fn is_required(&self) -> bool {
        self.flags.contains(Flags::REQUIRED)
    }

    /// Turn a raw (already unquoted) value into its bound form.
    pub(crate) fn capture(&self, raw: &str) -> Result<Value, String> {
        match &self.converter {
            Some(converter) => converter(raw).map_err(|message| {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Argument '{}' cannot convert '{raw}': {message}.", self.name);
                }
                message
            }),
            None => Ok(Arc::new(raw.to_string())),
        }
    }

    /// The usage example for a missing value.
    pub(crate) fn value_example(&self, path: &str) -> String {
        if self.is_unnamed() {
            format!("{path} <{}>", self.name)
        } else {
            self.named_example(path)
        }
    }

    /// The usage example for a value that failed conversion, only when an example was declared.
    pub(crate) fn conversion_example(&self, path: &str) -> Option<String> {
        self.example.as_ref().map(|example| {
            if self.is_unnamed() {
                format!("{path} <{example}>")
            } else {
                format!("{path} --{}=<{example}>", self.name)
            }
        })
    }

    /// The usage example for a required argument that was not given.
    pub(crate) fn required_example(&self, path: &str) -> String {
        if self.is_unnamed() {
            format!("{path} <{}>", self.example.as_ref().unwrap_or(&self.name))
        } else {
            self.named_example(path)
        }
    }

    fn named_example(&self, path: &str) -> String {
        format!(
            "{path} --{}=<{}>",
            self.name,
            self.example.as_deref().unwrap_or(DEFAULT_EXAMPLE)
        )
    }
}

impl std::fmt::Debug for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let short = match &self.short {
            Some(s) => format!(", -{s}"),
            None => "".to_string(),
        };
        let default = match &self.default {
            Some(d) => format!(", default={}", d.display),
            None => "".to_string(),
        };

        write!(f, "Argument[{:?}, {}{short}{default}]", self.flags, self.name)
    }
}
