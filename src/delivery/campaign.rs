//! The outer loop: title screen, difficulty counter and one delivery after
//! another.

use super::session::{ConfirmOutcome, DeliverySession, SessionState, TickControls};
use crate::core::config::DeliveryConfig;
use crate::core::error::DeliveryResult;
use rand::Rng;

/// Discrete player commands the campaign reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignEvent {
    Confirm,
    Cancel,
}

/// Whether the program should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignFlow {
    Continue,
    Quit,
}

/// What is on screen.
#[derive(Debug, Clone)]
pub enum CampaignScreen {
    Title,
    Delivery(Box<DeliverySession>),
}

/// Running tallies shown on the title screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignStats {
    pub deliveries: u32,
    pub safe_landings: u32,
    pub best_level: u32,
}

/// Owns the configuration, the RNG and the difficulty counter that
/// survives between attempts.
pub struct Campaign<R: Rng> {
    config: DeliveryConfig,
    difficulty: u32,
    screen: CampaignScreen,
    stats: CampaignStats,
    rng: R,
}

impl<R: Rng> Campaign<R> {
    pub fn new(config: DeliveryConfig, rng: R) -> Self {
        Self {
            config,
            difficulty: 1,
            screen: CampaignScreen::Title,
            stats: CampaignStats::default(),
            rng,
        }
    }

    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Difficulty the next delivery will be generated at.
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn screen(&self) -> &CampaignScreen {
        &self.screen
    }

    pub fn stats(&self) -> CampaignStats {
        self.stats
    }

    /// The active delivery, if one is on screen.
    pub fn session(&self) -> Option<&DeliverySession> {
        match &self.screen {
            CampaignScreen::Delivery(session) => Some(&**session),
            CampaignScreen::Title => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut DeliverySession> {
        match &mut self.screen {
            CampaignScreen::Delivery(session) => Some(&mut **session),
            CampaignScreen::Title => None,
        }
    }

    /// React to a player command.
    pub fn handle(&mut self, event: CampaignEvent) -> DeliveryResult<CampaignFlow> {
        let on_title = matches!(self.screen, CampaignScreen::Title);
        match event {
            CampaignEvent::Cancel if on_title => {
                log::info!("Quit from title screen");
                Ok(CampaignFlow::Quit)
            }
            CampaignEvent::Cancel => {
                log::info!("Delivery at level {} abandoned", self.difficulty);
                self.screen = CampaignScreen::Title;
                Ok(CampaignFlow::Continue)
            }
            CampaignEvent::Confirm if on_title => {
                self.start_delivery()?;
                Ok(CampaignFlow::Continue)
            }
            CampaignEvent::Confirm => {
                let outcome = match &mut self.screen {
                    CampaignScreen::Delivery(session) => session.confirm(&mut self.rng),
                    CampaignScreen::Title => ConfirmOutcome::Stay,
                };
                match outcome {
                    ConfirmOutcome::Stay => {}
                    ConfirmOutcome::NextDelivery => {
                        self.record_finished();
                        self.difficulty = self.difficulty.saturating_add(1);
                        self.start_delivery()?;
                    }
                    ConfirmOutcome::Restart => {
                        self.record_finished();
                        self.difficulty = 1;
                        self.start_delivery()?;
                    }
                }
                Ok(CampaignFlow::Continue)
            }
        }
    }

    /// Forward one tick of pilot controls to the active delivery.
    pub fn tick(&mut self, controls: &TickControls) -> Option<SessionState> {
        match &mut self.screen {
            CampaignScreen::Delivery(session) => Some(session.tick(controls, &mut self.rng)),
            CampaignScreen::Title => None,
        }
    }

    fn record_finished(&mut self) {
        self.stats.deliveries += 1;
        if let Some(session) = self.session() {
            let succeeded = session.succeeded();
            let level = session.difficulty();
            if succeeded {
                self.stats.safe_landings += 1;
            }
            self.stats.best_level = self.stats.best_level.max(level);
        }
    }

    fn start_delivery(&mut self) -> DeliveryResult<()> {
        let session = DeliverySession::new(&self.config, self.difficulty, &mut self.rng)?;
        self.screen = CampaignScreen::Delivery(Box::new(session));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_campaign() -> Campaign<ChaCha8Rng> {
        Campaign::new(DeliveryConfig::default(), ChaCha8Rng::seed_from_u64(12345))
    }

    #[test]
    fn test_starts_on_title() {
        let campaign = create_campaign();
        assert!(matches!(campaign.screen(), CampaignScreen::Title));
        assert_eq!(campaign.difficulty(), 1);
        assert!(campaign.session().is_none());
    }

    #[test]
    fn test_cancel_on_title_quits() {
        let mut campaign = create_campaign();
        assert_eq!(
            campaign.handle(CampaignEvent::Cancel).unwrap(),
            CampaignFlow::Quit
        );
    }

    #[test]
    fn test_confirm_on_title_starts_delivery() {
        let mut campaign = create_campaign();
        campaign.handle(CampaignEvent::Confirm).unwrap();
        let session = campaign.session().unwrap();
        assert_eq!(session.state(), SessionState::Orbit);
        assert_eq!(session.difficulty(), 1);
    }

    #[test]
    fn test_cancel_in_delivery_returns_to_title() {
        let mut campaign = create_campaign();
        campaign.handle(CampaignEvent::Confirm).unwrap();
        assert_eq!(
            campaign.handle(CampaignEvent::Cancel).unwrap(),
            CampaignFlow::Continue
        );
        assert!(campaign.session().is_none());
    }

    #[test]
    fn test_title_tick_is_idle() {
        let mut campaign = create_campaign();
        assert_eq!(campaign.tick(&TickControls::default()), None);
    }
}
