/// Bounded in-memory command history.
///
/// Persistence is the host's concern; this only backs the current
/// session (hints, recall, and the shell-ready event).
#[derive(Debug)]
pub struct History {
    commands: Vec<String>,
    max_entries: usize,
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        Self {
            commands: Vec::new(),
            max_entries,
        }
    }

    /// Append a command. Consecutive duplicates are dropped and the
    /// oldest entries fall off past `max_entries`.
    pub fn add(&mut self, command: String) {
        if self.commands.last() == Some(&command) {
            return;
        }
        self.commands.push(command);
        if self.commands.len() > self.max_entries {
            let excess = self.commands.len() - self.max_entries;
            self.commands.drain(..excess);
        }
    }

    /// Commands oldest-first.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
