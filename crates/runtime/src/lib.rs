pub mod events;
pub mod session;

pub use events::GameEvent;
pub use session::{spawn_session, GameSessionHandle, SessionError};
