mod argument;
mod bindings;
mod command;

pub use argument::*;
pub use bindings::*;
pub use command::*;
