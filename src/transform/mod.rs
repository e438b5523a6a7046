//! Canonical (image pixel) <-> display (viewport pixel) space mapping.

pub mod coords;
