//! Domain layer: Core prognosis types and logic.
//!
//! Pure, synchronous computation with no I/O. Everything here is a value
//! type; a new `FactorSet` is built for every evaluation or simulation.

mod combination;
mod evaluation;
pub mod evaluators;
mod factors;
mod input;
pub mod odds;
pub mod recommendations;
mod report;

pub use combination::{combine, Prognosis, DEFAULT_CYCLES_PER_YEAR};
pub use evaluation::Evaluation;
pub use evaluators::{evaluate, AgeBaseline, Assessment, FactorEvaluation};
pub use factors::{DiagnosticSet, FactorName, FactorSet};
pub use input::{
    AdenomyosisType, ClinicalInput, HsgResult, InputError, MyomaType, PolypType,
    ValidationError,
};
pub use report::{
    benchmark_percent, benchmark_phrase, BenchmarkComparison, Category, Report,
    SimulationResult, SimulationTarget,
};
