//! Tag table: the shared memory the scan engine reads and writes.
//!
//! A tag is a named cell holding a [`TagValue`]. Tags are created on first
//! write (by a coil, a timer, a counter, a move block, or an editor action)
//! and live for the whole session unless explicitly removed.

mod table;
mod value;

pub use table::TagTable;
pub use value::TagValue;
