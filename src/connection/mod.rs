//! Connection to the server: addressing, transports, the websocket task and
//! the controller that ties them to the session store.

mod address;
mod controller;
mod transport;
pub mod ws;

pub use address::{AddressError, SessionAddress};
pub use controller::ConnectionController;
pub use transport::{MemoryTransport, Transport, TransportError, WsTransport};
pub use ws::ConnectionEvent;
