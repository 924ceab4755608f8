/// Local bind address for the remote toggle bridge.
pub const STREAM_BIND_ADDR: &str = "127.0.0.1:9867";

/// Event type accepted by the bridge; anything else is ignored.
pub const TOGGLE_EVENT_TYPE: &str = "ToggleFilter";
