use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use shellstep::change::CommandHooks;
use shellstep::exec::command_line;

/// Hooks that count cleanup calls and can wrap the final command line.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    cleanups: AtomicUsize,
    prefix: Vec<String>,
}

impl RecordingHooks {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Prepend `prefix` to every final command (e.g. `["env", "FOO=1"]`).
    pub fn with_prefix<I, S>(prefix: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            cleanups: AtomicUsize::new(0),
            prefix: prefix.into_iter().map(Into::into).collect(),
        })
    }

    pub fn cleanups(&self) -> usize {
        self.cleanups.load(Ordering::SeqCst)
    }
}

impl CommandHooks for RecordingHooks {
    fn final_command(&self, executable: &str, args: &[String]) -> Vec<String> {
        let mut argv = self.prefix.clone();
        argv.extend(command_line(executable, args));
        argv
    }

    fn non_executed_cleanup(&self) {
        self.cleanups.fetch_add(1, Ordering::SeqCst);
    }
}
