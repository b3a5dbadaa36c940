pub mod classify;
pub mod nesting;

pub use classify::{classify, Declaration, DeclarationKind};
pub use nesting::{line_balance, NestingTracker};
