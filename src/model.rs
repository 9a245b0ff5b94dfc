use bitflags::bitflags;

bitflags! {
    /// How an [`Argument`](crate::Argument) is matched and whether it must be supplied.
    ///
    /// Flags combine with `|`:
    /// ```
    /// # use argtree::Flags;
    /// let flags = Flags::UNNAMED | Flags::REQUIRED;
    /// assert!(flags.contains(Flags::UNNAMED));
    /// assert!(!flags.contains(Flags::VALUE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u8 {
        /// Takes a value: `--name=value` or `-short=value`.
        const VALUE    = 0b0000_0001;
        /// Positional: matched by order rather than by name.
        const UNNAMED  = 0b0000_0010;
        /// Must be supplied, unless a default is declared.
        const REQUIRED = 0b0000_0100;
    }
}

impl Flags {
    /// A presence switch: `--name` or `-short`, binding `true` when given.
    pub const OPTION: Flags = Flags::empty();

    /// Whether a matched token must carry a value.
    pub(crate) fn takes_value(&self) -> bool {
        self.intersects(Flags::VALUE | Flags::UNNAMED)
    }
}

/// The prefix class of an input token.
/// Matching is decided by this alone: `--` beats `-` beats bare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Prefix {
    /// `--name[=value]`
    Name,
    /// `-short[=value]`
    Short,
    /// `value`
    Unnamed,
}

impl Prefix {
    /// Split a token into its prefix class and the remaining body.
    pub(crate) fn classify(token: &str) -> (Prefix, &str) {
        if let Some(body) = token.strip_prefix("--") {
            (Prefix::Name, body)
        } else if let Some(body) = token.strip_prefix('-') {
            (Prefix::Short, body)
        } else {
            (Prefix::Unnamed, token)
        }
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
