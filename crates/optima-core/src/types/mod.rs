//! Domain types for receivables advance calculations.

mod date;
mod institution;
mod operation;
mod results;
mod title;

pub use date::{lenient_date, Date};
pub use institution::{
    DiscountMethod, FinancialInstitution, DAYS_PER_MONTH, DEFAULT_IOF_DAILY, DEFAULT_IOF_FIXED,
    MAX_WORKING_DAYS_FLOAT,
};
pub use operation::{ExtraFee, Operation, OperationDetails, OPERATION_DETAILS_VERSION};
pub use results::{CalculationResult, RepurchaseItem, Totals};
pub use title::Title;
