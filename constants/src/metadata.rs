/// Custom data keys read by the inspector and written when a filter activates.
pub const KEY_CONTACT: &str = "partner:contact";
pub const KEY_TYPE: &str = "partner:type";

/// Authored footprint override; takes precedence over the computed estimate.
pub const KEY_AREA_SQM: &str = "info:area_sqm";
