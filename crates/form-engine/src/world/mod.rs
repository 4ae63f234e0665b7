//! Typst World trait implementation for in-memory compilation

pub mod fonts;
pub mod virtual_fs;
pub mod virtual_world;

pub use fonts::{global_font_cache, init_global_font_cache, FontCache};
pub use virtual_fs::{asset_path, VirtualFilesystem, ASSET_ROOT};
pub use virtual_world::VirtualWorld;
