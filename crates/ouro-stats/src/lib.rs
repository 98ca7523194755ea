//! Statistical helpers for the Ouro trainer.
//!
//! The training driver reports per-generation summaries of score and fitness
//! distributions; this crate provides the descriptive statistics behind those
//! reports.
//!
//! # Examples
//!
//! ```
//! use ouro_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod descriptive;
