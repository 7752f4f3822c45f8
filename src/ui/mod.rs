//! View state
//!
//! Pure state behind the interactive parts of the pages. Nothing here
//! touches the store or reads the clock; time is passed in where needed.
//! Browser-side timing values are rendered as data attributes for `site.js`.

pub mod calendar;
pub mod carousel;
pub mod image;
pub mod nav;
pub mod toast;

pub use calendar::{CalendarDay, CalendarMonth};
pub use carousel::Carousel;
pub use image::{image_or_placeholder, PLACEHOLDER_IMAGE};
pub use nav::{NavItem, NavView};
pub use toast::{Toast, ToastVariant};
