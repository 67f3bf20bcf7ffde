use tracing::{info, trace};

use crate::input_context::{InputSource, Session};

// Only the first two input sources are ever polled
pub const MAX_FORWARDED_SOURCES: usize = 2;

/// Host-side access to the current immersive session, if any.
pub trait SessionProvider {
    fn current_session(&self) -> Option<&Session>;
}

impl SessionProvider for Option<Session> {
    fn current_session(&self) -> Option<&Session> {
        self.as_ref()
    }
}

impl SessionProvider for Session {
    fn current_session(&self) -> Option<&Session> {
        Some(self)
    }
}

///
/// SessionGate
///
/// Decides each frame whether controller polling happens at all.
/// Ending the session is the only way polling stops; there is no other cancellation.
///
#[derive(Debug, Default)]
pub struct SessionGate {
    polling: bool,
}

impl SessionGate {
    pub fn new() -> SessionGate {
        SessionGate { polling: false }
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    /// Sources to hand to the poll engine this frame, in session order.
    pub fn forward<'a>(&mut self, session: Option<&'a Session>) -> Vec<&'a InputSource> {
        let sources: Vec<&InputSource> = match session {
            Some(session) if session.immersive => session
                .input_sources
                .iter()
                .take(MAX_FORWARDED_SOURCES)
                .collect(),
            _ => Vec::new(),
        };

        let polling = !sources.is_empty();
        if polling != self.polling {
            if polling {
                info!("immersive session with {} input source(s), polling controllers", sources.len());
            } else {
                info!("no immersive session or input sources, controller polling paused");
            }
            self.polling = polling;
        }
        trace!("forwarding {} input source(s)", sources.len());

        sources
    }
}
