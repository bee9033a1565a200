//! Wire protocol shared with the server.
//!
//! Every frame is a JSON envelope `{"type": ..., "data": ...}`. Inbound
//! frames are decoded into [`InboundMessage`]; outbound frames are built from
//! [`OutboundMessage`]. Which inbound types become visible cards is decided by
//! the card [`registry`].

pub mod cards;
pub mod codec;
pub mod message;
pub mod registry;

pub use codec::{decode, encode, DecodeError};
pub use message::{ActionInfo, Card, Envelope, InboundMessage, InputValue, OutboundMessage};
pub use registry::{CardBody, CardKind, CardRole};
