/// Marker trait for reducer-owned state.
///
/// `Default` lets owners `std::mem::take` the state into the reducer;
/// `PartialEq` lets tests compare snapshots.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
