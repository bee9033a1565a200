/// Marker trait for intents.
///
/// An intent is anything that may change a state: a key press, a decoded
/// server message, a transport event. Intents are consumed by reducers.
pub trait Intent: Send + 'static {}
