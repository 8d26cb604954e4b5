//! Private-post access - secret check, session unlocks, and the view flow

mod gate;
mod session;
mod view;

pub use gate::SecretGate;
pub use session::{SessionStore, UnlockStore};
pub use view::{Dismissed, PrivatePostView, Submission, ViewState};
