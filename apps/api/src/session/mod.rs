// Session layer: per-tab state (idea, roast, plan), the submission gate, and
// the in-memory store that owns every live session.

pub mod handlers;
pub mod service;
pub mod state;
pub mod store;

pub use service::SessionService;
pub use store::SessionStore;
