//! Stock-priced stablecoin payments.
//!
//! Wires the pipeline components together behind an [`Orchestrator`]:
//! - Wallet connection on the target chain
//! - Ticker price and stablecoin rate lookup
//! - Quote calculation with markup
//! - Token transfer submission

pub mod app;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod render;

pub use app::build_orchestrator;
pub use config::{AppConfig, WalletConfig};
pub use error::{AppError, AppResult};
pub use orchestrator::{Orchestrator, OrchestratorState, PaymentReceipt};
