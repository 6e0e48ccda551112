//! # User Interface Elements
//!
//! HUD pieces drawn over the room: health and cooldown bars, the minimap,
//! the message log, and the full-screen phase overlays.

use crate::game::{EnemyKind, HeroKind, HudView, Phase, PlatformKind, ProjectileKind};
use crate::generation::{GridCoord, PillarKind};
use macroquad::prelude::*;
use std::collections::VecDeque;

/// Rolling log of short messages shown at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Adds a message, dropping the oldest once full.
    pub fn push(&mut self, message: impl Into<String>) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message.into());
    }

    /// The last `count` messages, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &String> {
        self.messages.iter().skip(self.messages.len().saturating_sub(count))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Green above half health, yellow above a quarter, red below.
pub fn health_color(fraction: f32) -> Color {
    if fraction > 0.5 {
        GREEN
    } else if fraction > 0.25 {
        YELLOW
    } else {
        RED
    }
}

pub fn hero_color(kind: HeroKind) -> Color {
    match kind {
        HeroKind::Knight => SKYBLUE,
        HeroKind::Cleric => GOLD,
        HeroKind::Archer => LIME,
    }
}

pub fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::SkeletonArcher => LIGHTGRAY,
        EnemyKind::SkeletonSpearman => BEIGE,
        EnemyKind::SkeletonWarrior => WHITE,
        EnemyKind::Gorgon => DARKGREEN,
        EnemyKind::DemonBoss => MAROON,
    }
}

pub fn pillar_color(kind: PillarKind) -> Color {
    match kind {
        PillarKind::Encapsulation => BLUE,
        PillarKind::Inheritance => GREEN,
        PillarKind::Polymorphism => PURPLE,
        PillarKind::Abstraction => ORANGE,
        PillarKind::Composition => RED,
    }
}

pub fn platform_color(kind: PlatformKind) -> Color {
    match kind {
        PlatformKind::Normal => BROWN,
        PlatformKind::Moving => DARKBLUE,
        PlatformKind::Breakable => Color::new(0.6, 0.45, 0.3, 1.0),
        PlatformKind::OneWay => Color::new(0.5, 0.5, 0.5, 0.6),
    }
}

pub fn projectile_color(kind: ProjectileKind) -> Color {
    match kind {
        ProjectileKind::Arrow => BEIGE,
        ProjectileKind::Fireball => ORANGE,
    }
}

/// Horizontal bar filled to `fraction`.
pub fn draw_bar(x: f32, y: f32, w: f32, h: f32, fraction: f32, color: Color) {
    draw_rectangle(x, y, w, h, Color::new(0.1, 0.1, 0.1, 0.8));
    draw_rectangle(x, y, w * fraction.clamp(0.0, 1.0), h, color);
    draw_rectangle_lines(x, y, w, h, 1.0, WHITE);
}

/// Health, potions, pillars and cooldowns in the top-left corner.
pub fn draw_hud(hud: &HudView) {
    let fraction = hud.health as f32 / hud.max_health.max(1) as f32;
    draw_text(&hud.hero.to_string().to_uppercase(), 20.0, 24.0, 22.0, hero_color(hud.hero));
    draw_bar(20.0, 32.0, 200.0, 14.0, fraction, health_color(fraction));
    draw_text(
        &format!("{}/{}", hud.health, hud.max_health),
        228.0,
        44.0,
        18.0,
        WHITE,
    );

    let attack_ready = 1.0 - hud.attack_cooldown.min(1.0);
    draw_text("Attack", 20.0, 66.0, 16.0, WHITE);
    draw_bar(80.0, 56.0, 100.0, 8.0, attack_ready, SKYBLUE);
    draw_text(hud.special_name, 20.0, 84.0, 16.0, WHITE);
    if hud.special_cooldown > 0.0 {
        draw_text(
            &format!("{:.0}s", hud.special_cooldown.ceil()),
            130.0,
            84.0,
            16.0,
            GRAY,
        );
    } else {
        draw_text("ready", 130.0, 84.0, 16.0, GREEN);
    }

    draw_text(
        &format!("Potions: {}   Pillars: {}/5", hud.potions, hud.pillars),
        20.0,
        104.0,
        16.0,
        WHITE,
    );
    let seconds = hud.play_time as u64;
    draw_text(
        &format!("Time: {:02}:{:02}", seconds / 60, seconds % 60),
        20.0,
        122.0,
        16.0,
        WHITE,
    );
}

/// Grid of visited rooms in the top-right corner.
pub fn draw_minimap(
    grid_size: (u32, u32),
    visited: &[GridCoord],
    current: Option<GridCoord>,
    boss: Option<GridCoord>,
) {
    let cell = 14.0;
    let gap = 3.0;
    let origin_x = screen_width() - 20.0 - grid_size.0 as f32 * (cell + gap);
    let origin_y = 20.0;

    for coord in visited {
        let x = origin_x + coord.col as f32 * (cell + gap);
        let y = origin_y + coord.row as f32 * (cell + gap);
        let color = if Some(*coord) == current {
            YELLOW
        } else if Some(*coord) == boss {
            MAROON
        } else {
            GRAY
        };
        draw_rectangle(x, y, cell, cell, color);
    }
    if let Some(current) = current {
        let x = origin_x + current.col as f32 * (cell + gap);
        let y = origin_y + current.row as f32 * (cell + gap);
        draw_rectangle_lines(x - 1.0, y - 1.0, cell + 2.0, cell + 2.0, 2.0, WHITE);
    }
}

/// Centered title with a subtitle line, over a dimmed screen.
pub fn draw_overlay(title: &str, subtitle: &str, tint: Color) {
    let (w, h) = (screen_width(), screen_height());
    draw_rectangle(0.0, 0.0, w, h, Color::new(0.0, 0.0, 0.0, 0.6));
    let title_size = measure_text(title, None, 48, 1.0);
    draw_text(title, (w - title_size.width) / 2.0, h / 2.0 - 10.0, 48.0, tint);
    let sub_size = measure_text(subtitle, None, 20, 1.0);
    draw_text(subtitle, (w - sub_size.width) / 2.0, h / 2.0 + 30.0, 20.0, WHITE);
}

/// Class choice screen.
pub fn draw_hero_select() {
    let (w, h) = (screen_width(), screen_height());
    clear_background(Color::new(0.05, 0.05, 0.08, 1.0));
    let title = "DUNGEON HEROES";
    let size = measure_text(title, None, 56, 1.0);
    draw_text(title, (w - size.width) / 2.0, h * 0.25, 56.0, GOLD);

    for (index, kind) in HeroKind::all().into_iter().enumerate() {
        let stats = kind.stats();
        let x = w / 2.0 - 330.0 + index as f32 * 230.0;
        let y = h * 0.4;
        draw_rectangle_lines(x, y, 200.0, 160.0, 2.0, hero_color(kind));
        draw_text(
            &format!("{}. {}", index + 1, kind.to_string().to_uppercase()),
            x + 12.0,
            y + 30.0,
            24.0,
            hero_color(kind),
        );
        draw_text(&format!("Health {}", stats.max_health), x + 12.0, y + 60.0, 18.0, WHITE);
        draw_text(&format!("Damage {}", stats.damage), x + 12.0, y + 82.0, 18.0, WHITE);
        draw_text(&format!("Speed {:.0}", stats.speed), x + 12.0, y + 104.0, 18.0, WHITE);
        draw_text(kind.special_name(), x + 12.0, y + 134.0, 18.0, LIGHTGRAY);
    }
    draw_text(
        "Press 1, 2 or 3 to choose. F9 loads the last save.",
        w / 2.0 - 230.0,
        h * 0.4 + 200.0,
        20.0,
        GRAY,
    );
}

/// Title and subtitle for the terminal and paused phases.
pub fn phase_banner(phase: Phase) -> Option<(&'static str, &'static str, Color)> {
    match phase {
        Phase::Paused => Some(("PAUSED", "P to resume", WHITE)),
        Phase::GameOver => Some(("YOU HAVE FALLEN", "R to return to hero select", RED)),
        Phase::Victory => Some(("VICTORY", "R to return to hero select", GOLD)),
        Phase::HeroSelect | Phase::Playing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_log_caps() {
        let mut log = MessageLog::new(3);
        for i in 0..5 {
            log.push(format!("message {}", i));
        }
        assert_eq!(log.len(), 3);
        let recent: Vec<_> = log.recent(2).cloned().collect();
        assert_eq!(recent, vec!["message 3".to_string(), "message 4".to_string()]);
    }

    #[test]
    fn test_health_color_thresholds() {
        assert_eq!(health_color(0.9), GREEN);
        assert_eq!(health_color(0.4), YELLOW);
        assert_eq!(health_color(0.1), RED);
    }

    #[test]
    fn test_phase_banner() {
        assert!(phase_banner(Phase::Playing).is_none());
        assert_eq!(phase_banner(Phase::Victory).map(|b| b.0), Some("VICTORY"));
    }
}
