//! Host service bundle injected into the desktop runtime by the entry layer.

use std::rc::Rc;

use crate::{
    ChatStreamService, MemoryPrefsStore, NoopChatStreamService, NoopPrefsStore, PrefsStore,
};

/// Host services consumed by the desktop runtime and, through it, by hosted apps.
#[derive(Clone)]
pub struct HostServices {
    /// Key-value storage used for the persisted note.
    pub prefs: Rc<dyn PrefsStore>,
    /// Chat transport used by the assistant app.
    pub chat: Rc<dyn ChatStreamService>,
}

impl HostServices {
    /// Builds a bundle from concrete services.
    pub fn new(prefs: Rc<dyn PrefsStore>, chat: Rc<dyn ChatStreamService>) -> Self {
        Self { prefs, chat }
    }

    /// Bundle that stores nothing and has no chat transport.
    pub fn noop() -> Self {
        Self::new(Rc::new(NoopPrefsStore), Rc::new(NoopChatStreamService))
    }

    /// Bundle with session-scoped in-memory storage and no chat transport.
    pub fn in_memory() -> Self {
        Self::new(
            Rc::new(MemoryPrefsStore::default()),
            Rc::new(NoopChatStreamService),
        )
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::noop()
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices").finish_non_exhaustive()
    }
}
