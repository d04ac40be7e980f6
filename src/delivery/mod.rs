//! Flight and landing model: kinematics, terrain, pad, outcome checks,
//! packages and the per-attempt session, plus the campaign around them.

pub mod campaign;
pub mod difficulty;
pub mod level;
pub mod outcome;
pub mod package;
pub mod pad;
pub mod physics;
pub mod reviews;
pub mod session;
pub mod ship;
pub mod terrain;

pub use campaign::{Campaign, CampaignEvent, CampaignFlow, CampaignScreen, CampaignStats};
pub use level::Level;
pub use outcome::{LandingReport, LandingStatus};
pub use package::{Package, PackageKind};
pub use pad::LandingPad;
pub use session::{ConfirmOutcome, DeliverySession, SessionState, TickControls};
pub use ship::{ShipFacing, ShipState};
pub use terrain::TerrainProfile;
