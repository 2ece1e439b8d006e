use std::sync::Arc;
use std::time::Duration;

use rendezvous_core::session::NoticeId;
use rendezvous_core::{GeoJsonSurface, Session};
use tokio::sync::Mutex;

use crate::SolverClient;

pub type SharedSession = Arc<Mutex<Session<GeoJsonSurface>>>;

/// Shared by every handler. The session lock serialises commands, so no
/// two of them ever run interleaved.
#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    pub solver: Arc<SolverClient>,
    pub notice_timeout: Duration,
    pub initial_zoom: u8,
}

impl AppState {
    pub fn new(
        session: Session<GeoJsonSurface>,
        solver: SolverClient,
        notice_timeout: Duration,
        initial_zoom: u8,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            solver: Arc::new(solver),
            notice_timeout,
            initial_zoom,
        }
    }

    /// One-shot auto-hide of a notice. Firing after a manual dismissal
    /// does nothing.
    pub fn schedule_expiry(&self, id: NoticeId) {
        let session = Arc::clone(&self.session);
        let delay = self.notice_timeout;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if session.lock().await.expire_notice(id) {
                tracing::debug!("Notice {id:?} expired");
            }
        });
    }
}
