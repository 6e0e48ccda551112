//! # Dungeon Graph
//!
//! Rooms on a grid, joined by directional doors.
//!
//! A [`DungeonGraph`] is built from a [`DungeonTemplate`] and a grid size.
//! The layout step is deterministic: the template picks which cells hold a
//! room, the start room is the grid center, and doors are created between
//! every pair of grid-adjacent rooms. Doors leading into the boss room start
//! locked until enough pillars are collected.

use crate::game::{Platform, Rect};
use crate::generation::{
    utils, GenerationConfig, Generator, ItemGenerator, ItemLayout, Pillar, PillarKind, Potion,
};
use crate::{config, DungeonError, DungeonResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

/// Grid address of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub col: u32,
    pub row: u32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Neighbor in the given direction, if it lies inside the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_heroes::{Direction, GridCoord};
    ///
    /// let corner = GridCoord::new(0, 0);
    /// assert_eq!(corner.neighbor(Direction::Right, (3, 3)), Some(GridCoord::new(1, 0)));
    /// assert_eq!(corner.neighbor(Direction::Up, (3, 3)), None);
    /// ```
    pub fn neighbor(self, direction: Direction, grid_size: (u32, u32)) -> Option<GridCoord> {
        let (dc, dr) = direction.delta();
        let col = self.col as i64 + dc as i64;
        let row = self.row as i64 + dr as i64;
        if col < 0 || row < 0 || col >= grid_size.0 as i64 || row >= grid_size.1 as i64 {
            return None;
        }
        Some(GridCoord::new(col as u32, row as u32))
    }

    /// Direction that leads from `self` to an adjacent `other`.
    pub fn direction_to(self, other: GridCoord) -> Option<Direction> {
        let dc = other.col as i64 - self.col as i64;
        let dr = other.row as i64 - self.row as i64;
        Direction::all()
            .into_iter()
            .find(|direction| direction.delta() == (dc as i32, dr as i32))
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Door directions. UP decreases the row, LEFT decreases the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Grid delta as (columns, rows).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Side doors are walked through; vertical doors need an interact action.
    pub fn door_kind(self) -> DoorKind {
        match self {
            Direction::Left | Direction::Right => DoorKind::WalkThrough,
            Direction::Up | Direction::Down => DoorKind::Interactive,
        }
    }

    /// Returns all four directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

/// How a door is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorKind {
    /// Triggers on overlap alone
    WalkThrough,
    /// Triggers on overlap plus an interact action
    Interactive,
}

/// A door in one wall of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub direction: Direction,
    /// Room on the other side
    pub destination: GridCoord,
    pub rect: Rect,
    locked: bool,
    lock_message: Option<String>,
}

impl Door {
    /// Creates an unlocked door placed for a room of the given size.
    pub fn new(direction: Direction, destination: GridCoord, room_width: f32, floor_y: f32) -> Self {
        let x = match direction {
            Direction::Left => 0.0,
            Direction::Right => room_width - config::DOOR_WIDTH,
            Direction::Up => {
                room_width / 2.0 - config::VERTICAL_DOOR_OFFSET - config::DOOR_WIDTH / 2.0
            }
            Direction::Down => {
                room_width / 2.0 + config::VERTICAL_DOOR_OFFSET - config::DOOR_WIDTH / 2.0
            }
        };
        Self {
            direction,
            destination,
            rect: Rect::new(
                x,
                floor_y - config::DOOR_HEIGHT,
                config::DOOR_WIDTH,
                config::DOOR_HEIGHT,
            ),
            locked: false,
            lock_message: None,
        }
    }

    pub fn kind(&self) -> DoorKind {
        self.direction.door_kind()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock_message(&self) -> Option<&str> {
        self.lock_message.as_deref()
    }

    /// Locks the door with a message shown to the player.
    pub fn lock(&mut self, message: impl Into<String>) {
        self.locked = true;
        self.lock_message = Some(message.into());
    }

    /// Unlocks the door. Unlocking an open door does nothing.
    pub fn unlock(&mut self) {
        self.locked = false;
        self.lock_message = None;
    }
}

/// Role of a room in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Start,
    Normal,
    Boss,
}

/// One cell of the dungeon grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub coord: GridCoord,
    pub width: f32,
    pub height: f32,
    /// Top of the walkable floor; fixed for the room's lifetime
    floor_y: f32,
    pub kind: RoomKind,
    pub doors: BTreeMap<Direction, Door>,
    pub pillars: Vec<Pillar>,
    pub potions: Vec<Potion>,
    pub platforms: Vec<Platform>,
    pub visited: bool,
}

impl Room {
    /// Creates an empty room. The floor sits at 80% of the height.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_heroes::{GridCoord, Room, RoomKind};
    ///
    /// let room = Room::new(GridCoord::new(1, 1), 1600.0, 600.0, RoomKind::Normal);
    /// assert_eq!(room.floor_y(), 480.0);
    /// assert!(room.doors.is_empty());
    /// ```
    pub fn new(coord: GridCoord, width: f32, height: f32, kind: RoomKind) -> Self {
        Self {
            coord,
            width,
            height,
            floor_y: (height * config::FLOOR_RATIO).floor(),
            kind,
            doors: BTreeMap::new(),
            pillars: Vec::new(),
            potions: Vec::new(),
            platforms: Vec::new(),
            visited: false,
        }
    }

    pub fn floor_y(&self) -> f32 {
        self.floor_y
    }

    pub fn is_boss_room(&self) -> bool {
        self.kind == RoomKind::Boss
    }

    pub fn is_start_room(&self) -> bool {
        self.kind == RoomKind::Start
    }

    pub fn door(&self, direction: Direction) -> Option<&Door> {
        self.doors.get(&direction)
    }

    pub fn has_door(&self, direction: Direction) -> bool {
        self.doors.contains_key(&direction)
    }

    /// Adds a door toward `destination`, replacing any door in that wall.
    pub fn add_door(&mut self, direction: Direction, destination: GridCoord) {
        let door = Door::new(direction, destination, self.width, self.floor_y);
        self.doors.insert(direction, door);
    }

    /// Interactive door under the given feet band, if any.
    pub fn interactive_door_at(&self, feet: &Rect) -> Option<&Door> {
        self.doors
            .values()
            .find(|door| door.kind() == DoorKind::Interactive && door.rect.intersects(feet))
    }

    /// Marks every pillar touching `body` as collected and returns the newly collected kinds.
    pub fn collect_pillars(&mut self, body: &Rect) -> Vec<PillarKind> {
        self.pillars
            .iter_mut()
            .filter(|pillar| !pillar.collected && pillar.rect.intersects(body))
            .map(|pillar| {
                pillar.collected = true;
                pillar.kind
            })
            .collect()
    }

    /// Removes every potion touching `body` and returns how many were picked up.
    pub fn collect_potions(&mut self, body: &Rect) -> u32 {
        let before = self.potions.len();
        self.potions.retain(|potion| !potion.rect.intersects(body));
        (before - self.potions.len()) as u32
    }

    /// Marks a pillar kind as collected without a pickup, used when restoring a save.
    pub fn mark_pillar_collected(&mut self, kind: PillarKind) {
        for pillar in self.pillars.iter_mut().filter(|pillar| pillar.kind == kind) {
            pillar.collected = true;
        }
    }
}

/// Predefined dungeon layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DungeonTemplate {
    /// Center room plus four arms
    Cross,
    /// Every cell of the grid
    Square,
    /// Start room and boss room side by side
    Demo,
    /// Every cell of the grid
    Full,
}

impl DungeonTemplate {
    pub fn as_str(self) -> &'static str {
        match self {
            DungeonTemplate::Cross => "cross",
            DungeonTemplate::Square => "square",
            DungeonTemplate::Demo => "demo",
            DungeonTemplate::Full => "full",
        }
    }

    /// Returns every template.
    pub fn all() -> [DungeonTemplate; 4] {
        [
            DungeonTemplate::Cross,
            DungeonTemplate::Square,
            DungeonTemplate::Demo,
            DungeonTemplate::Full,
        ]
    }

    /// Cells that hold a room, relative to a grid with the given center.
    fn layout(self, grid_size: (u32, u32), center: GridCoord) -> Vec<(i64, i64)> {
        let (cx, cy) = (center.col as i64, center.row as i64);
        match self {
            DungeonTemplate::Cross => vec![
                (cx, cy),
                (cx - 1, cy),
                (cx + 1, cy),
                (cx, cy - 1),
                (cx, cy + 1),
            ],
            DungeonTemplate::Demo => vec![(cx, cy), (cx + 1, cy)],
            DungeonTemplate::Square | DungeonTemplate::Full => (0..grid_size.1 as i64)
                .flat_map(|row| (0..grid_size.0 as i64).map(move |col| (col, row)))
                .collect(),
        }
    }

    /// Cell that becomes the boss room.
    fn boss_cell(self, grid_size: (u32, u32), center: GridCoord) -> (i64, i64) {
        match self {
            DungeonTemplate::Demo | DungeonTemplate::Cross => {
                (center.col as i64 + 1, center.row as i64)
            }
            DungeonTemplate::Square | DungeonTemplate::Full => (grid_size.0 as i64 - 1, 0),
        }
    }
}

impl fmt::Display for DungeonTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DungeonTemplate {
    type Err = DungeonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cross" => Ok(DungeonTemplate::Cross),
            "square" => Ok(DungeonTemplate::Square),
            "demo" => Ok(DungeonTemplate::Demo),
            "full" => Ok(DungeonTemplate::Full),
            other => Err(DungeonError::Configuration(format!(
                "Unknown dungeon template '{}'",
                other
            ))),
        }
    }
}

/// The rooms of a run and the door edges between them.
///
/// Tracks the room the hero is in and the room they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonGraph {
    template: DungeonTemplate,
    grid_size: (u32, u32),
    rooms: BTreeMap<GridCoord, Room>,
    start: GridCoord,
    boss: GridCoord,
    current: GridCoord,
    previous: Option<GridCoord>,
}

impl DungeonGraph {
    /// Builds the room layout and door graph for a template with default-sized rooms.
    ///
    /// Fails with a configuration error when the template does not fit the
    /// grid or yields no reachable boss room.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_heroes::{DungeonGraph, DungeonTemplate, GridCoord};
    ///
    /// let dungeon = DungeonGraph::build(DungeonTemplate::Cross, (3, 3)).unwrap();
    /// assert_eq!(dungeon.room_count(), 5);
    /// assert_eq!(dungeon.start(), GridCoord::new(1, 1));
    /// assert_eq!(dungeon.boss(), GridCoord::new(2, 1));
    /// ```
    pub fn build(template: DungeonTemplate, grid_size: (u32, u32)) -> DungeonResult<Self> {
        Self::build_with_room_size(template, grid_size, config::ROOM_WIDTH, config::ROOM_HEIGHT)
    }

    /// Builds the layout with an explicit room size.
    pub fn build_with_room_size(
        template: DungeonTemplate,
        grid_size: (u32, u32),
        room_width: f32,
        room_height: f32,
    ) -> DungeonResult<Self> {
        let (cols, rows) = grid_size;
        if cols == 0 || rows == 0 {
            return Err(DungeonError::Configuration(format!(
                "Grid size {}x{} has no cells",
                cols, rows
            )));
        }
        if !(room_width > 2.0 * config::DOOR_WIDTH && room_height > config::DOOR_HEIGHT) {
            return Err(DungeonError::Configuration(format!(
                "Room size {}x{} is too small for doors",
                room_width, room_height
            )));
        }

        let start = GridCoord::new(cols / 2, rows / 2);
        let in_grid = |(col, row): (i64, i64)| {
            (0..cols as i64).contains(&col) && (0..rows as i64).contains(&row)
        };

        let boss_cell = template.boss_cell(grid_size, start);
        if !in_grid(boss_cell) {
            return Err(DungeonError::Configuration(format!(
                "Template '{}' places the boss room outside a {}x{} grid",
                template, cols, rows
            )));
        }
        let boss = GridCoord::new(boss_cell.0 as u32, boss_cell.1 as u32);
        if boss == start {
            return Err(DungeonError::Configuration(format!(
                "Template '{}' puts the boss room on the start room in a {}x{} grid",
                template, cols, rows
            )));
        }

        let mut rooms = BTreeMap::new();
        for cell in template.layout(grid_size, start) {
            if !in_grid(cell) {
                return Err(DungeonError::Configuration(format!(
                    "Template '{}' needs cell ({}, {}) outside a {}x{} grid",
                    template, cell.0, cell.1, cols, rows
                )));
            }
            let coord = GridCoord::new(cell.0 as u32, cell.1 as u32);
            let kind = if coord == start {
                RoomKind::Start
            } else if coord == boss {
                RoomKind::Boss
            } else {
                RoomKind::Normal
            };
            rooms.insert(coord, Room::new(coord, room_width, room_height, kind));
        }

        if !rooms.contains_key(&boss) {
            return Err(DungeonError::Configuration(format!(
                "Template '{}' has no room at the boss cell {}",
                template, boss
            )));
        }

        let coords: Vec<GridCoord> = rooms.keys().copied().collect();
        for coord in &coords {
            for direction in Direction::all() {
                if let Some(neighbor) = coord.neighbor(direction, grid_size) {
                    if rooms.contains_key(&neighbor) {
                        if let Some(room) = rooms.get_mut(coord) {
                            room.add_door(direction, neighbor);
                        }
                    }
                }
            }
        }

        let mut dungeon = Self {
            template,
            grid_size,
            rooms,
            start,
            boss,
            current: start,
            previous: None,
        };
        dungeon.lock_boss_doors(config::BOSS_DOOR_MESSAGE);
        if let Some(room) = dungeon.rooms.get_mut(&start) {
            room.visited = true;
        }

        utils::validate_dungeon(&dungeon)?;
        Ok(dungeon)
    }

    pub fn template(&self) -> DungeonTemplate {
        self.template
    }

    pub fn grid_size(&self) -> (u32, u32) {
        self.grid_size
    }

    pub fn start(&self) -> GridCoord {
        self.start
    }

    pub fn boss(&self) -> GridCoord {
        self.boss
    }

    pub fn current(&self) -> GridCoord {
        self.current
    }

    pub fn previous(&self) -> Option<GridCoord> {
        self.previous
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn room(&self, coord: GridCoord) -> Option<&Room> {
        self.rooms.get(&coord)
    }

    pub fn room_mut(&mut self, coord: GridCoord) -> Option<&mut Room> {
        self.rooms.get_mut(&coord)
    }

    /// Room at the tracked coordinate.
    pub fn current_room(&self) -> Option<&Room> {
        self.rooms.get(&self.current)
    }

    pub fn current_room_mut(&mut self) -> Option<&mut Room> {
        self.rooms.get_mut(&self.current)
    }

    /// Coordinates of visited rooms, in grid order.
    pub fn visited_rooms(&self) -> Vec<GridCoord> {
        self.rooms
            .values()
            .filter(|room| room.visited)
            .map(|room| room.coord)
            .collect()
    }

    /// Side of the current room the hero entered through, if they came from a neighbor.
    pub fn entry_direction(&self) -> Option<Direction> {
        self.previous
            .and_then(|previous| self.current.direction_to(previous))
    }

    /// Moves the tracked room. Returns false if no room exists at `coord`.
    pub fn move_to(&mut self, coord: GridCoord) -> bool {
        match self.rooms.get_mut(&coord) {
            Some(room) => {
                room.visited = true;
                self.previous = Some(self.current);
                self.current = coord;
                true
            }
            None => false,
        }
    }

    /// Places the tracked room directly, with no previous room. Used when restoring a save.
    pub fn set_current(&mut self, coord: GridCoord) -> bool {
        match self.rooms.get_mut(&coord) {
            Some(room) => {
                room.visited = true;
                self.current = coord;
                self.previous = None;
                true
            }
            None => false,
        }
    }

    /// Floor-aligned spawn point for an actor entering `room`.
    ///
    /// `entry` is the wall the actor comes in through. Side entries spawn
    /// clear of the door so the walk-through trigger does not fire again;
    /// vertical entries spawn centered on the door; no entry means the room center.
    pub fn spawn_position_for_room(
        room: &Room,
        actor_width: f32,
        actor_height: f32,
        entry: Option<Direction>,
    ) -> (f32, f32) {
        let x = match entry.and_then(|direction| room.door(direction).map(|door| (direction, door)))
        {
            Some((Direction::Left, door)) => door.rect.right() + config::DOOR_SPAWN_OFFSET,
            Some((Direction::Right, door)) => {
                door.rect.x - config::DOOR_SPAWN_OFFSET - actor_width
            }
            Some((Direction::Up, door)) | Some((Direction::Down, door)) => {
                door.rect.center_x() - actor_width / 2.0
            }
            None => room.width / 2.0 - actor_width / 2.0,
        };
        let max_x = (room.width - actor_width).max(0.0);
        (x.clamp(0.0, max_x), room.floor_y() - actor_height)
    }

    /// Checks whether an actor can leave the current room through the door in `direction`.
    ///
    /// The actor's feet band must overlap an unlocked door. Interactive doors
    /// also need `interact`. Returns the room on the other side.
    pub fn try_enter_door(
        &self,
        actor_bbox: &Rect,
        direction: Direction,
        interact: bool,
    ) -> Option<GridCoord> {
        let room = self.current_room()?;
        let door = room.door(direction)?;
        if door.is_locked() {
            return None;
        }
        if door.kind() == DoorKind::Interactive && !interact {
            return None;
        }
        let feet = actor_bbox.feet_band(config::FEET_BAND_HEIGHT);
        if !door.rect.intersects(&feet) {
            return None;
        }
        self.rooms
            .contains_key(&door.destination)
            .then_some(door.destination)
    }

    /// First door in the current room the actor can pass through this tick.
    pub fn find_door_crossing(&self, actor_bbox: &Rect, interact: bool) -> Option<(Direction, GridCoord)> {
        Direction::all().into_iter().find_map(|direction| {
            self.try_enter_door(actor_bbox, direction, interact)
                .map(|target| (direction, target))
        })
    }

    /// Locked door under the actor's feet in the current room, if any.
    pub fn locked_door_at(&self, actor_bbox: &Rect) -> Option<&Door> {
        let feet = actor_bbox.feet_band(config::FEET_BAND_HEIGHT);
        self.current_room()?
            .doors
            .values()
            .find(|door| door.is_locked() && door.rect.intersects(&feet))
    }

    /// Locks every door whose destination is the boss room.
    pub fn lock_boss_doors(&mut self, message: &str) {
        let boss = self.boss;
        for door in self
            .rooms
            .values_mut()
            .flat_map(|room| room.doors.values_mut())
            .filter(|door| door.destination == boss)
        {
            door.lock(message);
        }
    }

    /// Unlocks every door whose destination is the boss room.
    ///
    /// Returns true if at least one door changed state.
    pub fn unlock_boss_doors(&mut self) -> bool {
        let boss = self.boss;
        let mut changed = false;
        for door in self
            .rooms
            .values_mut()
            .flat_map(|room| room.doors.values_mut())
            .filter(|door| door.destination == boss)
        {
            changed |= door.is_locked();
            door.unlock();
        }
        changed
    }

    /// Whether any door into the boss room is still locked.
    pub fn boss_doors_locked(&self) -> bool {
        self.rooms
            .values()
            .flat_map(|room| room.doors.values())
            .any(|door| door.destination == self.boss && door.is_locked())
    }

    /// Whether every door has a matching door in the opposite wall of its destination.
    pub fn doors_are_symmetric(&self) -> bool {
        self.rooms.values().all(|room| {
            room.doors.values().all(|door| {
                self.rooms
                    .get(&door.destination)
                    .and_then(|neighbor| neighbor.door(door.direction.opposite()))
                    .map(|back| back.destination == room.coord)
                    .unwrap_or(false)
            })
        })
    }

    /// Rooms reachable over door edges, ignoring locks.
    pub fn reachable_from(&self, origin: GridCoord) -> HashSet<GridCoord> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        if self.rooms.contains_key(&origin) {
            seen.insert(origin);
            queue.push_back(origin);
        }
        while let Some(coord) = queue.pop_front() {
            if let Some(room) = self.rooms.get(&coord) {
                for door in room.doors.values() {
                    if seen.insert(door.destination) {
                        queue.push_back(door.destination);
                    }
                }
            }
        }
        seen
    }

    /// Places generated items and platforms into their rooms.
    pub fn apply_items(&mut self, layout: ItemLayout) {
        for (coord, pillar) in layout.pillars {
            if let Some(room) = self.rooms.get_mut(&coord) {
                room.pillars.push(pillar);
            }
        }
        for (coord, potion) in layout.potions {
            if let Some(room) = self.rooms.get_mut(&coord) {
                room.potions.push(potion);
            }
        }
        for (coord, platform) in layout.platforms {
            if let Some(room) = self.rooms.get_mut(&coord) {
                room.platforms.push(platform);
            }
        }
    }
}

/// Builds a fully furnished dungeon: layout, pillars, potions and platforms.
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator;

impl DungeonGenerator {
    /// Creates a new dungeon generator.
    pub fn new() -> Self {
        Self
    }
}

impl Generator<DungeonGraph> for DungeonGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DungeonResult<DungeonGraph> {
        let mut dungeon = DungeonGraph::build_with_room_size(
            config.template,
            config.grid_size,
            config.room_width,
            config.room_height,
        )?;

        let items = ItemGenerator::for_dungeon(&dungeon).generate_validated(config, rng)?;
        dungeon.apply_items(items);

        log::info!(
            "Generated '{}' dungeon: {} rooms, start {}, boss {}",
            config.template,
            dungeon.room_count(),
            dungeon.start(),
            dungeon.boss()
        );
        Ok(dungeon)
    }

    fn validate(&self, content: &DungeonGraph, config: &GenerationConfig) -> DungeonResult<()> {
        if content.template() != config.template || content.grid_size() != config.grid_size {
            return Err(DungeonError::Configuration(
                "Generated dungeon does not match its configuration".to_string(),
            ));
        }
        utils::validate_dungeon(content)?;

        let placed: HashSet<PillarKind> = content
            .rooms()
            .flat_map(|room| room.pillars.iter().map(|pillar| pillar.kind))
            .collect();
        if placed.len() != PillarKind::all().len() {
            return Err(DungeonError::Configuration(format!(
                "Only {} of {} pillar kinds were placed",
                placed.len(),
                PillarKind::all().len()
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "DungeonGenerator"
    }
}
