mod check;
mod check_values;
mod list;
mod show;

pub use check::check;
pub use check_values::check_values;
pub use list::list;
pub use show::{export, show};
