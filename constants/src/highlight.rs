use bevy::prelude::*;

/// Base colour of the shared highlight material.
pub fn highlight_color() -> Color {
    Color::srgb(0.98, 0.60, 0.08)
}

/// Emissive term so highlighted objects stay readable in shadow.
pub fn highlight_emissive() -> LinearRgba {
    LinearRgba::rgb(2.4, 1.2, 0.12)
}

/// Default colour for manifest nodes that do not declare one.
pub fn default_object_color() -> Color {
    Color::srgb(0.60, 0.62, 0.65)
}
