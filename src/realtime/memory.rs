use crate::error::ChannelError;
use crate::models::StartCommand;
use super::channel::RealtimeChannel;

/// In-process channel that records what was sent
///
/// Used where no backend is reachable: tests, benchmarks.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    sent: Vec<StartCommand>,
    closed: bool,
}

impl MemoryChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel that refuses every command
    #[must_use]
    pub fn closed() -> Self {
        Self {
            sent: Vec::new(),
            closed: true,
        }
    }

    #[must_use]
    pub fn sent(&self) -> &[StartCommand] {
        &self.sent
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl RealtimeChannel for MemoryChannel {
    fn request_start(&mut self, command: &StartCommand) -> Result<(), ChannelError> {
        if self.closed {
            return Err(ChannelError::Closed);
        }
        self.sent.push(command.clone());
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
