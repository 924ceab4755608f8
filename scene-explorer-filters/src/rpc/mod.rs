pub mod stream_bridge;
