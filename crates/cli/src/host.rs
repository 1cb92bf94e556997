use std::sync::Arc;

use tracing::debug;
use wordpane::{Document, EmulatorHost, HostTransport, Session};

/// One acquired session against the demo host. Each flow opens its own and
/// disposes it when the flow ends, whether or not the flush succeeded.
pub struct PaneSession {
    session: Session,
}

impl PaneSession {
    pub fn open(host: &Arc<EmulatorHost>) -> Self {
        debug!(target = "wordpane", "acquiring session");
        let session = Session::acquire(Arc::clone(host) as Arc<dyn HostTransport>);
        Self { session }
    }

    pub fn document(&self) -> Document {
        self.session.document()
    }

    pub async fn flush(&self) -> wordpane::Result<()> {
        self.session.flush().await
    }

    pub fn dispose(self) {
        self.session.dispose();
    }
}
