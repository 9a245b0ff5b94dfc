use std::any::Any;
use std::collections::HashMap;

use crate::api::Value;

/// The per-invocation values of a leaf command's arguments, keyed by argument name.
///
/// Every declared argument has an entry once dispatch reaches the callback:
/// * the converted value (or the raw `String` when no converter is declared),
/// * `true` for a given `OPTION`,
/// * the declared default,
/// * or nothing, when the argument is optional and absent.
#[derive(Default, Clone)]
pub struct Bindings {
    values: HashMap<String, Option<Value>>,
}

impl Bindings {
    pub(crate) fn bind(&mut self, name: impl Into<String>, value: Option<Value>) {
        self.values.insert(name.into(), value);
    }

    /// The value of `name`, when it is set and of type `T`.
    ///
    /// ### Example
    /// ```
    /// use argtree::{Argument, Command, Dispatcher};
    ///
    /// let root = Command::new()
    ///     .add(Argument::value("wait").parse::<u32>())
    ///     .callback(|bindings| {
    ///         assert_eq!(bindings.get::<u32>("wait"), Some(&5));
    ///     });
    /// let code = Dispatcher::new("program", &root).dispatch_tokens(&["--wait=5"]);
    /// assert_eq!(code, 0);
    /// ```
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.values
            .get(name)
            .and_then(|value| value.as_ref())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// The value of `name` as text, for arguments bound without a converter.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get::<String>(name).map(String::as_str)
    }

    /// Whether the switch `name` is on.
    /// Absent or non-boolean values read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get::<bool>(name).copied().unwrap_or(false)
    }

    /// Whether `name` holds a value (given, or defaulted).
    pub fn is_set(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Some(_)))
    }

    /// Whether `name` has been bound at all, even to nothing.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The number of bound names, including those bound to nothing.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The bound argument names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();

        for name in self.names() {
            let state = if self.is_set(name) { "set" } else { "unset" };
            map.entry(&name, &state);
        }

        map.finish()
    }
}
