mod base;
mod dispatcher;
mod interface;
mod printer;

pub use base::*;
pub use dispatcher::*;
pub use interface::*;
pub use printer::*;

#[cfg(test)]
pub(crate) use interface::util;
