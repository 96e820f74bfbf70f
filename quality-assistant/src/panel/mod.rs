// Query panel domain: categories, result sets, and the panel state machine.

pub mod category;
pub mod state;

pub use category::Category;
pub use state::{transition, Effect, PanelEvent, PanelState, ResultSet, TextEdit};
