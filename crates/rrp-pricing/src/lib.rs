//! Marketplace pricing: size classification, commission schedules, the
//! margin solver, tax, and batch orchestration.

pub mod batch;
pub mod commission;
pub mod error;
pub mod export;
pub mod ingest;
pub mod resolver;
pub mod retailers;
pub mod size;
pub mod solver;
pub mod tax;

pub use batch::{run_batch, BatchReport, BatchSummary, PricingResult, PricingRun};
pub use commission::{lookup, CommissionEntry, CommissionSchedule, ScheduleImport};
pub use error::PricingError;
pub use export::write_results;
pub use ingest::{read_catalog, CatalogImport, CatalogUnits};
pub use resolver::{resolve_category, CategorySource, Resolution};
pub use retailers::{retailer_from_id, RetailerProfile, RETAILER_IDS};
pub use size::{classify, SizeClass, SizeRule};
pub use solver::{solve, Feasibility, Solution, SolverInput};
pub use tax::{compute_tax, TaxOutcome};
