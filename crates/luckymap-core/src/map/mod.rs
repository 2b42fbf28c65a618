//! Map integration: the widget capability, the owned map session, the
//! envelope guard, and marker appearance.

mod guard;
mod marker;
mod session;
mod widget;

use thiserror::Error;

pub use guard::{PanOutcome, ViewportGuard};
pub use marker::MarkerSpec;
pub use session::{MapConfig, MapInfo, MapSession, SessionState};
pub use widget::{MapWidget, OverlayId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map credential is not configured")]
    MissingCredential,

    #[error("map script failed to load: {0}")]
    LoadFailed(String),

    #[error("map session is {state:?}; expected it to be loading")]
    NotLoading { state: SessionState },
}
