//! Virtual List Module
//!
//! Pure windowing arithmetic for rendering a slice of a long uniform-height
//! list. No state is kept between calls.

mod calculator;

pub use calculator::{VirtualListCalculator, VisibleRange, DEFAULT_OVERSCAN};
