//! Panel tools layered over the host scene.
//!
//! The side panel owns two tabs. The Filters tab lists every CSV record as a
//! checkbox; toggling one swaps a shared highlight material across the
//! record's target subtrees and mirrors the record in the Info tab. The Info
//! tab inspects whatever object is effective: the override set by the most
//! recent active filter, or the click selection.
//!
//! ### Toggle flow
//!
//! ```text
//! Checkbox click / remote bridge
//!   └─> FilterToggleEvent
//!       └─> apply_filter_toggles()
//!           ├─> swap or restore subtree materials (originals cached once)
//!           ├─> write record metadata onto the target root
//!           ├─> update the Info tab override (owner tracked per filter)
//!           └─> FrameRequest for the first resolved target
//! ```
//!
//! Remote toggles arrive through `rpc::stream_bridge` and are funnelled into
//! the same `FilterToggleEvent` path after the unknown-label / redundant-value
//! guards in `FilterPanelState::request`.

/// Collapsible side panel with the Filters and Info tabs.
pub mod filter_panel;

/// Highlight material swapping with original-binding restore.
pub mod highlight;

/// Inspector state and per-frame polling for the Info tab.
pub mod info_panel;

/// Ray intersection helper for click selection.
pub mod ray;

/// Click picking against scene object bounds.
pub mod selection;
