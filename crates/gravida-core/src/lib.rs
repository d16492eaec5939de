//! gravida-core
//!
//! Pure domain types for obstetric point-of-care calculation: gestational
//! age arithmetic, validated reference tables, threshold bands, and the
//! result vocabulary. No I/O and no clock beyond history-record stamping;
//! this is the shared vocabulary of the Gravida system.

pub mod bands;
pub mod error;
pub mod gestation;
pub mod models;
pub mod table;
