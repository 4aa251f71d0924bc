pub mod channel;
pub mod driver;
pub mod memory;
pub mod protocol;
pub mod socket;

pub use channel::{ConnectionStatus, IncomingMessage, RealtimeChannel};
pub use driver::{ProtocolDriver, Reaction};
pub use memory::MemoryChannel;
pub use socket::{InboundHook, SocketChannel};
