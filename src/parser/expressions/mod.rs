//! Expression grammar: precedence chain, predicate productions and atomics.

mod precedence;
mod predicate;
mod primary;
