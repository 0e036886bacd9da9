pub mod keyboard;
pub mod page;
pub mod pointer;

pub use keyboard::wire_menu_escape;
pub use page::wire_page_lifecycle;
pub use pointer::{wire_pointer_handlers, PointerWiring};
