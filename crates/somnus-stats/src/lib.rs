//! Numeric kernels for the Somnus sleep-duration pipeline.
//!
//! Every function in this crate is pure and deterministic. Functions that take
//! `sorted_values` assert their precondition instead of re-sorting.
//!
//! # Modules
//!
//! - [`quantile`]: Sorted-quantile interpolation, probability ladders and key rounding
//! - [`dotbin`]: Wilkinson dot density binning with optional smoothing
//! - [`boxplot`]: Quartiles, outlier fence and outliers
//! - [`nearest`]: Nearest-value search with first-wins tie breaking
//! - [`density`]: Epanechnikov kernel density estimation
//!
//! # Examples
//!
//! ## Percentile ladder
//!
//! ```
//! use somnus_stats::quantile::{Ladder, percent_probabilities};
//!
//! let values = [5.5, 6.0, 6.5, 7.0, 7.5, 8.0, 8.5];
//! let ladder = Ladder::from_sorted(&values, &percent_probabilities(5, 95)).unwrap();
//! assert_eq!(ladder.get(0.5), Some(7.0));
//! ```
//!
//! ## Quantile dot plot positions
//!
//! ```
//! use somnus_stats::{
//!     dotbin::dotbin,
//!     quantile::{Ladder, midpoint_probabilities},
//! };
//!
//! let values = [5.5, 6.0, 6.5, 7.0, 7.5, 8.0, 8.5];
//! let quantiles = Ladder::from_sorted(&values, &midpoint_probabilities(20)).unwrap();
//! let qs: Vec<f64> = quantiles.iter().map(|point| point.q).collect();
//! let xs = dotbin(&qs, 0.45, false);
//! assert_eq!(xs.len(), 20);
//! ```
//!
//! ## Box plot
//!
//! ```
//! use somnus_stats::boxplot::BoxStats;
//!
//! let stats = BoxStats::new([1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
//! assert_eq!(stats.outliers, vec![100.0]);
//! ```

pub mod boxplot;
pub mod density;
pub mod dotbin;
pub mod nearest;
pub mod quantile;
