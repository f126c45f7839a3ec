mod imports;

mod articles;
mod health_check;
pub use articles::*;
pub use health_check::*;
