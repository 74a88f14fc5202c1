//! Core library for the tourpay command line application.
//!
//! The crate ingests tabular delivery-tour files, aggregates tours per
//! driver, computes payroll amounts with user-maintained penalties, and
//! round-trips its state through a string-keyed store. The modules are
//! structured to keep responsibilities narrow and composable: raw-table
//! decoding and workbook writing live under [`io`], the persisted data
//! types inside [`model`], the pure row-to-payroll pipeline in
//! [`normalize`], [`aggregate`], and [`payroll`], the export document in
//! [`report`], persistence in [`store`], and the state-owning controller in
//! [`session`].

pub mod aggregate;
pub mod error;
pub mod io;
pub mod model;
pub mod normalize;
pub mod payroll;
pub mod report;
pub mod session;
pub mod store;

pub use error::{PayrollError, Result};
