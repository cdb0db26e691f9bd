//! Grade aggregation and credit accumulation.
//!
//! This module takes a flat collection of course records, groups it by
//! term, resolves repeated attempts of a course to the best grade, and
//! computes the chronologically ordered GPA/CPA/credit series a dashboard
//! charts.

pub mod aggregate;
pub mod average;
pub mod classify;
pub mod grade;
pub mod group;
pub mod resolve;
pub mod types;
