//! # Optima Core
//!
//! Core types and calendars for the Optima receivables advance engine.
//!
//! This crate provides the foundational building blocks used throughout Optima:
//!
//! - **Types**: `Date`, financial institution fee profiles, titles, per-title
//!   results, repurchase items, extra fees and persisted operations
//! - **Business Day Calendars**: the Brazilian national holiday calendar
//!   (fixed dates plus Easter-derived mobile holidays) and settlement
//!   projection over business days
//!
//! ## Example
//!
//! ```rust
//! use optima_core::prelude::*;
//!
//! let calendar = NationalCalendar::for_years(2025, 2025);
//! let good_friday = Date::from_ymd(2025, 4, 18).unwrap();
//! assert!(!calendar.is_business_day(good_friday));
//!
//! // Due on Good Friday; the weekend and Tiradentes (Apr 21) are skipped
//! let settlement = calendar.project_settlement(good_friday, 0);
//! assert_eq!(settlement, Date::from_ymd(2025, 4, 22).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::return_self_not_must_use)]

pub mod calendars;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        holidays_for_year, holidays_for_years, is_business_day, project_settlement, Calendar,
        NationalCalendar, WeekendCalendar,
    };
    pub use crate::error::{OptimaError, OptimaResult};
    pub use crate::types::{
        CalculationResult, Date, DiscountMethod, ExtraFee, FinancialInstitution, Operation,
        OperationDetails, RepurchaseItem, Title, Totals,
    };
}

// Re-export commonly used types at crate root
pub use error::{OptimaError, OptimaResult};
pub use types::{Date, FinancialInstitution, Operation, Title};
