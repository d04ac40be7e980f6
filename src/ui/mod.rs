pub mod delivery_scene;
pub mod game_common;

use orbital_delivery::delivery::{Campaign, CampaignScreen};
use rand::Rng;
use ratatui::Frame;

/// Draw whatever the campaign currently shows.
pub fn draw_campaign<R: Rng>(frame: &mut Frame, campaign: &Campaign<R>) {
    let area = frame.size();
    match campaign.screen() {
        CampaignScreen::Title => {
            delivery_scene::render_title(frame, area, campaign.difficulty(), campaign.stats())
        }
        CampaignScreen::Delivery(session) => {
            delivery_scene::render_delivery_scene(frame, area, session)
        }
    }
}
