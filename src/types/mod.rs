//! Data types shared by the table controller.

mod column;
mod row;
mod state;

pub use column::*;
pub use row::*;
pub use state::*;
