//! Presentation cell. Deterministic projection of a summary plus card state into a view.

pub mod card_view;
pub mod format;
pub mod labels;

pub use card_view::{CardPresenter, CardView, DEFAULT_FALLBACK_IMAGE};
pub use labels::{CardLabels, Locale};
