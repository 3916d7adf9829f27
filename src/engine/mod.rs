// ============================================================================
// Engine Module
// Contains the amortization calculators, product matching and the simulator
// ============================================================================

mod price;
mod product_matcher;
mod sac;
mod simulator;

pub mod factory;

pub use factory::{calculator_for, SimulatorBuilder};
pub use price::{annuity_factor, PriceCalculator, PriceSchedule};
pub use product_matcher::match_product;
pub use sac::{SacCalculator, SacSchedule};
pub use simulator::{simulate, DailyVolumeReport, Simulator};
