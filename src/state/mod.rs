pub mod playback;
pub mod session;
pub mod settings;

pub use playback::{Playback, PlaybackAction};
pub use session::{Role, Route, Session, guard, resolve_landing_route};
pub use settings::Settings;
