//! Specialist agents for datacenter monitoring.
//!
//! This crate provides one specialist per monitoring domain:
//!
//! - **Energy Optimizer**: power usage and efficiency
//! - **Cooling Manager**: temperature and thermal optimization
//! - **Security Sentinel**: access logs and alerting
//! - **Predictive Maintainer**: equipment health
//! - **Compliance Auditor**: regulatory and sustainability metrics
//! - **Resource Allocator**: compute, storage, and bandwidth
//!
//! Each specialist owns a CSV-backed [`ReadingSource`], a fixed system
//! prompt, and a rule-based verdict function, and forwards the combined
//! context to the completion service for a recommendation.

pub mod compliance;
mod consult;
pub mod cooling;
pub mod energy;
pub mod maintenance;
pub mod resource;
pub mod security;
pub mod source;

pub use compliance::{ComplianceReading, ComplianceSpecialist};
pub use cooling::{CoolingReading, CoolingSpecialist};
pub use energy::{EnergyReading, EnergySpecialist};
pub use maintenance::{MaintenanceReading, MaintenanceSpecialist};
pub use resource::{ResourceReading, ResourceSpecialist};
pub use security::{SecurityReading, SecuritySpecialist};
pub use source::ReadingSource;

use std::path::Path;
use std::sync::Arc;
use vigil_common::{Result, Specialist};
use vigil_llm::CompletionClient;

/// Build all six specialists against one shared completion client, loading
/// each fixture from `data_dir`.
pub fn load_specialists(
    data_dir: &Path,
    client: Arc<dyn CompletionClient>,
) -> Result<Vec<Arc<dyn Specialist>>> {
    Ok(vec![
        Arc::new(EnergySpecialist::from_data_dir(data_dir, client.clone())?),
        Arc::new(CoolingSpecialist::from_data_dir(data_dir, client.clone())?),
        Arc::new(SecuritySpecialist::from_data_dir(data_dir, client.clone())?),
        Arc::new(MaintenanceSpecialist::from_data_dir(data_dir, client.clone())?),
        Arc::new(ComplianceSpecialist::from_data_dir(data_dir, client.clone())?),
        Arc::new(ResourceSpecialist::from_data_dir(data_dir, client)?),
    ])
}
