//! # Item Generation
//!
//! Places the five pillars, healing potions and platforms into the rooms of
//! a dungeon. Pillars gate the boss room; potions and platforms only ever
//! appear in normal rooms.

use crate::game::{Platform, PlatformKind, Rect};
use crate::generation::{DungeonGraph, GenerationConfig, Generator, GridCoord, RoomKind};
use crate::{DungeonError, DungeonResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Pillar size in pixels.
pub const PILLAR_SIZE: (f32, f32) = (32.0, 64.0);

/// Potion size in pixels.
pub const POTION_SIZE: f32 = 24.0;

/// Platform size in pixels.
pub const PLATFORM_SIZE: (f32, f32) = (200.0, 20.0);

/// The five collectible pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PillarKind {
    Encapsulation,
    Inheritance,
    Polymorphism,
    Abstraction,
    Composition,
}

impl PillarKind {
    pub fn all() -> [PillarKind; 5] {
        [
            PillarKind::Encapsulation,
            PillarKind::Inheritance,
            PillarKind::Polymorphism,
            PillarKind::Abstraction,
            PillarKind::Composition,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            PillarKind::Encapsulation => "Encapsulation",
            PillarKind::Inheritance => "Inheritance",
            PillarKind::Polymorphism => "Polymorphism",
            PillarKind::Abstraction => "Abstraction",
            PillarKind::Composition => "Composition",
        }
    }
}

impl fmt::Display for PillarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pillar standing on the floor of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub kind: PillarKind,
    pub rect: Rect,
    pub collected: bool,
}

impl Pillar {
    /// Creates a pillar standing on `floor_y` at horizontal position `x`.
    pub fn new(kind: PillarKind, x: f32, floor_y: f32) -> Self {
        Self {
            kind,
            rect: Rect::new(x, floor_y - PILLAR_SIZE.1, PILLAR_SIZE.0, PILLAR_SIZE.1),
            collected: false,
        }
    }
}

/// A healing potion waiting to be picked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Potion {
    pub rect: Rect,
}

impl Potion {
    pub fn new(x: f32, floor_y: f32) -> Self {
        Self {
            rect: Rect::new(x, floor_y - 80.0, POTION_SIZE, POTION_SIZE),
        }
    }
}

/// Items and platforms to place, keyed by room.
#[derive(Debug, Clone, Default)]
pub struct ItemLayout {
    pub pillars: Vec<(GridCoord, Pillar)>,
    pub potions: Vec<(GridCoord, Potion)>,
    pub platforms: Vec<(GridCoord, Platform)>,
}

/// Generates pillar, potion and platform placement for one dungeon.
#[derive(Debug, Clone)]
pub struct ItemGenerator {
    start: GridCoord,
    boss: GridCoord,
    normal_rooms: Vec<GridCoord>,
}

impl ItemGenerator {
    /// Collects the room roles of `dungeon` in grid order.
    pub fn for_dungeon(dungeon: &DungeonGraph) -> Self {
        Self {
            start: dungeon.start(),
            boss: dungeon.boss(),
            normal_rooms: dungeon
                .rooms()
                .filter(|room| room.kind == RoomKind::Normal)
                .map(|room| room.coord)
                .collect(),
        }
    }

    fn place_pillars(&self, config: &GenerationConfig, rng: &mut StdRng, layout: &mut ItemLayout) {
        let floor_y = floor_y(config);
        layout.pillars.push((
            self.boss,
            Pillar::new(PillarKind::Composition, config.room_width / 2.0, floor_y),
        ));

        let mut hosts = self.normal_rooms.clone();
        hosts.shuffle(rng);
        if hosts.is_empty() {
            hosts.push(self.start);
        }

        let others = PillarKind::all()
            .into_iter()
            .filter(|kind| *kind != PillarKind::Composition);
        for (kind, room) in others.zip(hosts.iter().cycle()) {
            let x = random_x(rng, config.room_width, 200.0);
            layout.pillars.push((*room, Pillar::new(kind, x, floor_y)));
        }
    }

    fn place_potions(&self, config: &GenerationConfig, rng: &mut StdRng, layout: &mut ItemLayout) {
        if self.normal_rooms.is_empty() {
            return;
        }
        let floor_y = floor_y(config);
        let low = config.min_potion_rooms.min(config.max_potion_rooms) as usize;
        let high = config.max_potion_rooms.max(config.min_potion_rooms) as usize;
        let count = rng.gen_range(low..=high).min(self.normal_rooms.len());

        for room in self.normal_rooms.choose_multiple(rng, count) {
            for _ in 0..rng.gen_range(1..=2) {
                let x = random_x(rng, config.room_width, 150.0);
                layout.potions.push((*room, Potion::new(x, floor_y)));
            }
        }
    }

    fn place_platforms(&self, config: &GenerationConfig, rng: &mut StdRng, layout: &mut ItemLayout) {
        if !config.platforms {
            return;
        }
        let floor_y = floor_y(config);
        let kinds = PlatformKind::all();
        let rooms = std::iter::once(self.start).chain(self.normal_rooms.iter().copied());

        for room in rooms {
            let count = rng.gen_range(1..=2);
            for tier in 0..count {
                let y = floor_y - 120.0 - 90.0 * tier as f32;
                let x = random_x(rng, config.room_width, 250.0);
                let kind = kinds[rng.gen_range(0..kinds.len())];
                let platform = Platform::new(kind, Rect::new(x, y, PLATFORM_SIZE.0, PLATFORM_SIZE.1));
                layout.platforms.push((room, platform));
            }
        }
    }
}

fn floor_y(config: &GenerationConfig) -> f32 {
    (config.room_height * crate::config::FLOOR_RATIO).floor()
}

/// Random x in `[margin, width - margin]`, collapsing to the center for narrow rooms.
fn random_x(rng: &mut StdRng, width: f32, margin: f32) -> f32 {
    if width - margin <= margin {
        width / 2.0
    } else {
        rng.gen_range(margin..=width - margin)
    }
}

impl Generator<ItemLayout> for ItemGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DungeonResult<ItemLayout> {
        let mut layout = ItemLayout::default();
        self.place_pillars(config, rng, &mut layout);
        self.place_potions(config, rng, &mut layout);
        self.place_platforms(config, rng, &mut layout);

        log::debug!(
            "Placed {} pillars, {} potions and {} platforms",
            layout.pillars.len(),
            layout.potions.len(),
            layout.platforms.len()
        );
        Ok(layout)
    }

    fn validate(&self, content: &ItemLayout, _config: &GenerationConfig) -> DungeonResult<()> {
        let kinds: HashSet<PillarKind> = content.pillars.iter().map(|(_, p)| p.kind).collect();
        if kinds.len() != PillarKind::all().len() {
            return Err(DungeonError::Configuration(
                "Every pillar kind must be placed exactly once".to_string(),
            ));
        }
        if content.pillars.len() != kinds.len() {
            return Err(DungeonError::Configuration(
                "A pillar kind was placed twice".to_string(),
            ));
        }
        if content
            .potions
            .iter()
            .any(|(room, _)| *room == self.boss || *room == self.start)
        {
            return Err(DungeonError::Configuration(
                "Potions may only be placed in normal rooms".to_string(),
            ));
        }
        if content.platforms.iter().any(|(room, _)| *room == self.boss) {
            return Err(DungeonError::Configuration(
                "The boss room has no platforms".to_string(),
            ));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "ItemGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{utils, DungeonTemplate};

    fn layout_for(template: DungeonTemplate, seed: u64) -> DungeonResult<(DungeonGraph, ItemLayout)> {
        let config = GenerationConfig::new(seed).with_template(template);
        let dungeon = DungeonGraph::build(template, config.grid_size)?;
        let mut rng = utils::create_rng(&config);
        let layout = ItemGenerator::for_dungeon(&dungeon).generate_validated(&config, &mut rng)?;
        Ok((dungeon, layout))
    }

    #[test]
    fn test_composition_lives_in_boss_room() -> DungeonResult<()> {
        let (dungeon, layout) = layout_for(DungeonTemplate::Square, 3)?;
        let (room, pillar) = layout
            .pillars
            .iter()
            .find(|(_, p)| p.kind == PillarKind::Composition)
            .unwrap();
        assert_eq!(*room, dungeon.boss());
        assert_eq!(pillar.rect.bottom(), 480.0);
        Ok(())
    }

    #[test]
    fn test_other_pillars_in_normal_rooms() -> DungeonResult<()> {
        let (dungeon, layout) = layout_for(DungeonTemplate::Square, 11)?;
        for (room, pillar) in &layout.pillars {
            if pillar.kind != PillarKind::Composition {
                assert_eq!(dungeon.room(*room).unwrap().kind, RoomKind::Normal);
                assert!(pillar.rect.x >= 200.0 && pillar.rect.x <= 1400.0);
            }
        }
        Ok(())
    }

    #[test]
    fn test_demo_pillars_fall_back_to_start_room() -> DungeonResult<()> {
        let (dungeon, layout) = layout_for(DungeonTemplate::Demo, 5)?;
        let in_start = layout
            .pillars
            .iter()
            .filter(|(room, _)| *room == dungeon.start())
            .count();
        assert_eq!(in_start, 4);
        assert!(layout.potions.is_empty());
        Ok(())
    }

    #[test]
    fn test_potion_counts() -> DungeonResult<()> {
        for seed in 0..20 {
            let (_, layout) = layout_for(DungeonTemplate::Square, seed)?;
            let rooms: HashSet<GridCoord> = layout.potions.iter().map(|(room, _)| *room).collect();
            assert!((2..=4).contains(&rooms.len()));
            assert!(layout.potions.len() <= rooms.len() * 2);
        }
        Ok(())
    }

    #[test]
    fn test_platform_tiers() -> DungeonResult<()> {
        let (dungeon, layout) = layout_for(DungeonTemplate::Square, 8)?;
        for (room, platform) in &layout.platforms {
            assert_ne!(*room, dungeon.boss());
            assert!(platform.rect.y == 360.0 || platform.rect.y == 270.0);
        }
        Ok(())
    }

    #[test]
    fn test_same_seed_same_layout() -> DungeonResult<()> {
        let (_, a) = layout_for(DungeonTemplate::Square, 99)?;
        let (_, b) = layout_for(DungeonTemplate::Square, 99)?;
        assert_eq!(a.pillars, b.pillars);
        assert_eq!(a.potions, b.potions);
        Ok(())
    }
}
