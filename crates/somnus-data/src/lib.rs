//! Sleep-duration-by-age aggregation pipeline.
//!
//! Synthetic participants are drawn from a table of published studies, binned
//! by age, and summarized per bin into a percentile ladder, a quantile dot plot
//! and box statistics. The summaries are joined into a [`dataset::Dataset`]
//! that answers "which percentile is this sleep time at this age?".
//!
//! # Modules
//!
//! - [`config`]: Pipeline parameters, age ladder and validation errors
//! - [`study`]: Study descriptors and the default study table
//! - [`sample`]: Seeded sample generation
//! - [`binning`]: Partitioning samples into age bins
//! - [`summary`]: Per-bin percentile, dot and box results
//! - [`dataset`]: Joining per-bin results, diagnostics
//! - [`estimate`]: Percentile lookup and guess scoring
//! - [`curves`]: Percentile curves across age
//! - [`guideline`]: Recommended sleep ranges per age group
//! - [`pipeline`]: All of the above in one call
//!
//! # Example
//!
//! ```
//! use somnus_data::{
//!     config::PipelineConfig, estimate::lookup_percentile, pipeline::Pipeline,
//!     sample::SampleSeed, study::default_studies,
//! };
//!
//! let pipeline = Pipeline::new(PipelineConfig::default(), &default_studies()).unwrap();
//! let output = pipeline.run_with_seed(SampleSeed::from(42_u64));
//! let p = lookup_percentile(&output.dataset, Some(40.0), Some(7.0)).unwrap();
//! assert!((0.05..=0.95).contains(&p));
//! ```

pub mod binning;
pub mod config;
pub mod curves;
pub mod dataset;
pub mod estimate;
pub mod guideline;
pub mod pipeline;
pub mod sample;
pub mod study;
pub mod summary;
