// Standalone components (no primitives)
pub mod badge;
pub mod button;
pub mod card;
pub mod empty_state;
pub mod form;
pub mod input;
pub mod page_header;
pub mod progress;
pub mod search_bar;
pub mod skeleton;

// Primitive wrappers
pub mod avatar;
pub mod label;
pub mod toast;

// Composites built from the pieces above
pub mod profile_card;
pub mod stat_card;

pub use avatar::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use empty_state::*;
pub use form::*;
pub use input::*;
pub use label::*;
pub use page_header::*;
pub use profile_card::*;
pub use progress::*;
pub use search_bar::*;
pub use skeleton::*;
pub use stat_card::*;
pub use toast::*;
