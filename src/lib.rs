//! Headless contact form workflow for the ARBE architecture studio site,
//! with gpui elements for its feedback surfaces.

pub mod contact;
pub mod feedback;
pub mod form;
pub mod i18n;
pub mod motion;
pub mod prelude;
pub mod provider;
pub mod submission;
pub mod view;
pub mod workflow;

pub use provider::SiteProvider;
