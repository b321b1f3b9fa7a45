//! Filter pipeline: widget values in, dashboard out.
//!
//! The whole pipeline reruns on every interaction. Each run uses one
//! database session and shares nothing with other runs.

mod dashboard;
mod form;
mod run;


pub use dashboard::{Dashboard, FilterOptions, Notice, Selection};
pub use form::{Criteria, FilterForm};
pub use run::{PipelineError, run, run_session};
