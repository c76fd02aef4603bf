use std::env;

use vsh_core::VfsStore;

/// The two load-time parameters, produced by argument parsing.
///
/// `vfs_path` is updated when `vfs-load` succeeds; otherwise both values
/// are immutable after startup.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub vfs_path: Option<String>,
    pub startup_script: Option<String>,
}

/// Mutable state of one shell session: the VFS store, the append-only
/// command history, and the startup configuration.
///
/// Owned exclusively by the [`Engine`](crate::Engine) for the lifetime of
/// one run; handlers borrow it for a single invocation only.
pub struct Session {
    pub store: VfsStore,
    pub history: Vec<String>,
    pub config: SessionConfig,
    user: String,
    host: String,
}

impl Session {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            store: VfsStore::new(),
            history: Vec::new(),
            config,
            user: env::var("USER").unwrap_or_else(|_| "anonymous".to_string()),
            host: env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string()),
        }
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Append a raw input line to the history. Callers skip blank lines;
    /// lines that later fail to parse or execute are still recorded.
    pub fn record(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    /// Current directory as shown in the prompt: `~` for root, else `~`
    /// followed by the absolute path.
    #[must_use]
    pub fn display_path(&self) -> String {
        let cwd = self.store.current_dir();
        if cwd == "/" {
            "~".to_string()
        } else {
            format!("~{cwd}")
        }
    }

    /// `user@host:displayed_path$ `
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{}@{}:{}$ ", self.user, self.host, self.display_path())
    }
}
