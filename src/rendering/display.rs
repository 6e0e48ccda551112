//! # Display Management
//!
//! Draws a [`GameSnapshot`] with macroquad. Nothing here mutates the run;
//! the display only keeps its own message log.

use crate::game::{ActorView, AnimationState, Camera, GameEvent, GameSnapshot, Phase, Rect};
use crate::generation::{DoorKind, Room};
use crate::rendering::{
    draw_bar, draw_hero_select, draw_hud, draw_minimap, draw_overlay, enemy_color, health_color,
    hero_color, phase_banner, pillar_color, platform_color, projectile_color, MessageLog,
};
use crate::DungeonResult;
use macroquad::prelude::*;

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    /// Screen width in pixels
    pub screen_width: f32,
    /// Screen height in pixels
    pub screen_height: f32,
    /// Message history
    pub messages: MessageLog,
    /// Messages shown at once
    pub visible_messages: usize,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadDisplay {
    pub fn new() -> Self {
        Self {
            screen_width: screen_width(),
            screen_height: screen_height(),
            messages: MessageLog::default(),
            visible_messages: 3,
        }
    }

    /// Adds the printable events of a tick to the message log.
    pub fn push_events(&mut self, events: &[GameEvent]) {
        for message in events.iter().filter_map(GameEvent::message) {
            self.messages.push(message);
        }
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message);
    }

    /// Renders one frame.
    pub fn render(&mut self, snapshot: &GameSnapshot) -> DungeonResult<()> {
        self.screen_width = screen_width();
        self.screen_height = screen_height();

        if snapshot.phase == Phase::HeroSelect {
            draw_hero_select();
            self.render_messages();
            return Ok(());
        }

        clear_background(Color::new(0.08, 0.07, 0.1, 1.0));
        let view = Viewport::new(snapshot, self.screen_width);

        if let Some(room) = &snapshot.room {
            self.render_room(room, &view);
        }
        for enemy in &snapshot.enemies {
            let color = if enemy.stunned {
                Color::new(0.6, 0.6, 1.0, 1.0)
            } else if enemy.enraged {
                RED
            } else {
                enemy_color(enemy.kind)
            };
            self.render_actor(&enemy.actor, color, &view);
        }
        if let Some(hero) = &snapshot.hero {
            let color = snapshot
                .hud
                .as_ref()
                .map(|hud| hero_color(hud.hero))
                .unwrap_or(WHITE);
            self.render_actor(hero, color, &view);
        }
        for projectile in &snapshot.projectiles {
            let r = view.rect(&projectile.rect);
            draw_rectangle(r.x, r.y, r.w, r.h, projectile_color(projectile.kind));
        }

        if snapshot.overlay_alpha > 0 {
            draw_rectangle(
                0.0,
                0.0,
                self.screen_width,
                self.screen_height,
                Color::from_rgba(0, 0, 0, snapshot.overlay_alpha),
            );
        }

        if let Some(hud) = &snapshot.hud {
            draw_hud(hud);
        }
        draw_minimap(
            snapshot.grid_size,
            &snapshot.visited_rooms,
            snapshot.current_room,
            snapshot.boss_room,
        );
        if let Some(prompt) = &snapshot.prompt {
            let size = measure_text(prompt, None, 22, 1.0);
            draw_text(
                prompt,
                (self.screen_width - size.width) / 2.0,
                self.screen_height * 0.2,
                22.0,
                WHITE,
            );
        }
        self.render_messages();

        if let Some((title, subtitle, tint)) = phase_banner(snapshot.phase) {
            draw_overlay(title, subtitle, tint);
            if snapshot.phase.is_terminal() {
                let stats = &snapshot.statistics;
                let line = format!(
                    "Enemies defeated: {}   Rooms: {}   Damage dealt: {}",
                    stats.enemies_defeated, stats.rooms_visited, stats.damage_dealt
                );
                let size = measure_text(&line, None, 18, 1.0);
                draw_text(
                    &line,
                    (self.screen_width - size.width) / 2.0,
                    self.screen_height / 2.0 + 60.0,
                    18.0,
                    LIGHTGRAY,
                );
            }
        }
        Ok(())
    }

    fn render_room(&self, room: &Room, view: &Viewport) {
        let (_, floor_top) = view.point(0.0, room.floor_y());
        draw_rectangle(
            0.0,
            floor_top,
            self.screen_width,
            self.screen_height - floor_top,
            Color::new(0.25, 0.2, 0.18, 1.0),
        );

        for door in room.doors.values() {
            let r = view.rect(&door.rect);
            let color = if door.is_locked() {
                DARKGRAY
            } else if door.kind() == DoorKind::Interactive {
                GOLD
            } else {
                BROWN
            };
            draw_rectangle(r.x, r.y, r.w, r.h, color);
            if door.is_locked() {
                draw_rectangle_lines(r.x, r.y, r.w, r.h, 2.0, RED);
            }
        }

        for platform in room.platforms.iter().filter(|p| !p.is_broken()) {
            let r = view.rect(&platform.rect);
            draw_rectangle(r.x, r.y, r.w, r.h, platform_color(platform.kind));
        }
        for pillar in room.pillars.iter().filter(|p| !p.collected) {
            let r = view.rect(&pillar.rect);
            draw_rectangle(r.x, r.y, r.w, r.h, pillar_color(pillar.kind));
        }
        for potion in &room.potions {
            let r = view.rect(&potion.rect);
            draw_circle(r.x + r.w / 2.0, r.y + r.h / 2.0, r.w / 2.0, PINK);
        }
    }

    fn render_actor(&self, actor: &ActorView, color: Color, view: &Viewport) {
        let r = view.rect(&actor.bounds);
        let color = match actor.animation {
            AnimationState::Dead => return,
            AnimationState::Hurt => Color::new(1.0, 1.0, 1.0, 0.6),
            _ => color,
        };
        draw_rectangle(r.x, r.y, r.w, r.h, color);

        // Facing marker
        let eye_x = if actor.facing.sign() > 0.0 {
            r.x + r.w * 0.75
        } else {
            r.x + r.w * 0.25
        };
        draw_circle(eye_x, r.y + r.h * 0.3, 4.0, BLACK);

        if let AnimationState::Attacking(_) | AnimationState::Special = actor.animation {
            draw_rectangle_lines(r.x - 2.0, r.y - 2.0, r.w + 4.0, r.h + 4.0, 2.0, ORANGE);
        }

        let fraction = actor.health as f32 / actor.max_health.max(1) as f32;
        draw_bar(r.x, r.y - 10.0, r.w, 5.0, fraction, health_color(fraction));
    }

    /// Renders the message area.
    fn render_messages(&self) {
        let line_height = 18.0;
        let top = self.screen_height - 12.0 - self.visible_messages as f32 * line_height;
        for (i, message) in self.messages.recent(self.visible_messages).enumerate() {
            draw_text(message, 10.0, top + i as f32 * line_height, 16.0, WHITE);
        }
    }
}

/// Maps room pixels to screen pixels for one frame.
struct Viewport {
    camera: Camera,
    scale: f32,
    slide: f32,
}

impl Viewport {
    fn new(snapshot: &GameSnapshot, screen_width: f32) -> Self {
        let scale = if snapshot.camera.view_w > 0.0 {
            screen_width / snapshot.camera.view_w
        } else {
            1.0
        };
        Self {
            camera: snapshot.camera,
            scale,
            slide: snapshot.slide_offset * screen_width,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        let (x, y) = self.camera.to_screen(x, y);
        (x * self.scale + self.slide, y * self.scale)
    }

    fn rect(&self, rect: &Rect) -> Rect {
        let (x, y) = self.point(rect.x, rect.y);
        Rect::new(x, y, rect.w * self.scale, rect.h * self.scale)
    }
}
