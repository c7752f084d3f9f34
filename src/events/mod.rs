mod controls;
mod keyboard;
mod pointer;

pub use controls::wire_control_panel;
pub use keyboard::wire_keyboard;
pub use pointer::wire_pointer;
