//! # Optima Engine
//!
//! Pure calculation engine for receivables advance operations.
//!
//! Every function here is a deterministic function of its arguments. Nothing
//! reads institution or title data from global state, and nothing performs
//! I/O; the only shared structure is the holiday calendar cache in
//! `optima-core`.
//!
//! - **Discount**: per-title settlement projection, chargeable days,
//!   discount, ad valorem, IOF and flat fees ([`compute_title`])
//! - **Totals**: operation-level sums ([`aggregate`])
//! - **Repurchase**: late charges on overdue titles ([`compute_repurchase`])
//! - **Assembler**: final net and the saved-operation record ([`assemble`])
//! - **Comparator**: predicted vs realized reconciliation ([`compare`])
//! - **History**: dashboard statistics ([`HistorySummary`])
//!
//! ## Example
//!
//! ```rust
//! use optima_engine::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let institution = FinancialInstitution {
//!     monthly_rate: dec!(2.5),
//!     tac: dec!(50),
//!     min_days: 15,
//!     ..FinancialInstitution::new("b1", "Banco Exemplo S.A.")
//! };
//! let op_date = Date::from_ymd(2025, 3, 10).unwrap();
//! let input = SimulationInput::new(op_date)
//!     .with_title(Title::new("1", dec!(5000), Date::from_ymd(2025, 4, 9).ok()));
//!
//! let simulation = assemble(&input, &institution);
//! assert!(simulation.can_save());
//! let operation = simulation.into_operation().unwrap();
//! assert_eq!(operation.titles_count, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::return_self_not_must_use)]

pub mod assembler;
pub mod comparator;
pub mod discount;
pub mod error;
pub mod history;
pub mod repurchase;
pub mod totals;

pub use assembler::{assemble, Simulation, SimulationInput};
pub use comparator::{
    compare, Comparison, ComparisonRow, ComparisonTotals, RealizedTitle, ReconciliationStatus,
};
pub use discount::{compute_title, compute_title_with_calendar, compute_titles};
pub use error::{EngineError, EngineResult};
pub use history::HistorySummary;
pub use repurchase::{compute_repurchase, summarize_repurchases, RepurchaseSummary};
pub use totals::aggregate;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::assembler::{assemble, Simulation, SimulationInput};
    pub use crate::comparator::{compare, Comparison, RealizedTitle, ReconciliationStatus};
    pub use crate::discount::{compute_title, compute_titles};
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::history::HistorySummary;
    pub use crate::repurchase::{compute_repurchase, RepurchaseSummary};
    pub use crate::totals::aggregate;
    pub use optima_core::prelude::*;
}
