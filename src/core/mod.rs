pub mod field;
pub mod page;
pub mod timing;

pub use field::*;
pub use page::*;
pub use timing::*;
