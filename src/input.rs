//! Activate-action routing
//!
//! The game has one action (space bar or click). A click first checks the
//! sound toggle, whose position depends on the phase: centered under the
//! menu text on the title and game over screens, in the top-right corner of
//! the HUD while playing.

use glam::Vec2;

use crate::sim::GamePhase;

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    SoundToggle,
    Flap,
}

/// Half-width and vertical extent of the menu sound label
const MENU_TOGGLE_HALF_WIDTH: f32 = 40.0;
const MENU_TOGGLE_TOP: f32 = 485.0;
const MENU_TOGGLE_BOTTOM: f32 = 505.0;

/// Insets of the HUD speaker icon from the top-right corner
const HUD_TOGGLE_LEFT_INSET: f32 = 40.0;
const HUD_TOGGLE_RIGHT_INSET: f32 = 10.0;
const HUD_TOGGLE_TOP: f32 = 10.0;
const HUD_TOGGLE_BOTTOM: f32 = 30.0;

/// Inclusive screen rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub min: Vec2,
    pub max: Vec2,
}

impl Region {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Where the sound toggle sits for `phase` on a screen `screen_width` wide
pub fn sound_toggle_region(phase: GamePhase, screen_width: f32) -> Region {
    match phase {
        GamePhase::Start | GamePhase::GameOver => {
            let center_x = screen_width / 2.0;
            Region {
                min: Vec2::new(center_x - MENU_TOGGLE_HALF_WIDTH, MENU_TOGGLE_TOP),
                max: Vec2::new(center_x + MENU_TOGGLE_HALF_WIDTH, MENU_TOGGLE_BOTTOM),
            }
        }
        GamePhase::Playing => Region {
            min: Vec2::new(screen_width - HUD_TOGGLE_LEFT_INSET, HUD_TOGGLE_TOP),
            max: Vec2::new(screen_width - HUD_TOGGLE_RIGHT_INSET, HUD_TOGGLE_BOTTOM),
        },
    }
}

/// Route a click in canvas coordinates
pub fn route_click(phase: GamePhase, screen_width: f32, pos: Vec2) -> ClickTarget {
    if sound_toggle_region(phase, screen_width).contains(pos) {
        ClickTarget::SoundToggle
    } else {
        ClickTarget::Flap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_toggle() {
        for phase in [GamePhase::Start, GamePhase::GameOver] {
            assert_eq!(
                route_click(phase, 400.0, Vec2::new(200.0, 495.0)),
                ClickTarget::SoundToggle
            );
            assert_eq!(
                route_click(phase, 400.0, Vec2::new(160.0, 485.0)),
                ClickTarget::SoundToggle
            );
            assert_eq!(
                route_click(phase, 400.0, Vec2::new(241.0, 495.0)),
                ClickTarget::Flap
            );
            assert_eq!(
                route_click(phase, 400.0, Vec2::new(200.0, 300.0)),
                ClickTarget::Flap
            );
        }
    }

    #[test]
    fn test_hud_toggle_while_playing() {
        assert_eq!(
            route_click(GamePhase::Playing, 400.0, Vec2::new(375.0, 20.0)),
            ClickTarget::SoundToggle
        );
        // Menu region is not live during play
        assert_eq!(
            route_click(GamePhase::Playing, 400.0, Vec2::new(200.0, 495.0)),
            ClickTarget::Flap
        );
        assert_eq!(
            route_click(GamePhase::Playing, 400.0, Vec2::new(395.0, 20.0)),
            ClickTarget::Flap
        );
    }
}
