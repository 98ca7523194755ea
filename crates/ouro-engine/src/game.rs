use std::collections::VecDeque;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{net::NET_INPUTS, seed::GameSeed};

/// Playfield width in cells.
pub const GRID_WIDTH: i32 = 12;
/// Playfield height in cells.
pub const GRID_HEIGHT: i32 = 12;

const START_LEN: usize = 3;

/// Steps the snake may take without eating before the episode is cut off.
///
/// Evolved controllers frequently settle into closed loops; without a hunger
/// limit such an episode would never terminate.
#[expect(clippy::cast_sign_loss)]
const HUNGER_LIMIT: u32 = (GRID_WIDTH * GRID_HEIGHT * 2) as u32;

/// A cell position on the grid. `x` grows east, `y` grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[must_use]
    pub fn moved(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Absolute heading of the snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Returns the heading after applying a relative turn.
    #[must_use]
    pub fn turned(self, turn: Turn) -> Self {
        let clockwise = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];
        let index = clockwise.iter().position(|d| *d == self).unwrap();
        match turn {
            Turn::Straight => self,
            Turn::Left => clockwise[(index + 3) % 4],
            Turn::Right => clockwise[(index + 1) % 4],
        }
    }
}

/// A relative turn chosen by the controller each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Straight,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    Running,
    Dead,
    Won,
}

/// One game of snake on a fixed 12×12 grid.
///
/// The snake starts with length 3, centered, heading east. All randomness
/// (food placement) comes from the [`GameSeed`] given at construction, so
/// the same seed and the same turn sequence replay the same game.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    rng: Pcg32,
    snake: VecDeque<Pos>,
    dir: Direction,
    food: Pos,
    score: u32,
    steps: u32,
    hunger: u32,
    state: GameState,
}

impl SnakeGame {
    #[must_use]
    pub fn with_seed(seed: GameSeed) -> Self {
        let head = Pos {
            x: GRID_WIDTH / 2,
            y: GRID_HEIGHT / 2,
        };
        let snake: VecDeque<Pos> = (0..START_LEN)
            .map(|i| {
                #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let offset = i as i32;
                Pos {
                    x: head.x - offset,
                    y: head.y,
                }
            })
            .collect();
        let mut game = Self {
            rng: Pcg32::from_seed(seed.into_bytes()),
            snake,
            dir: Direction::East,
            food: head,
            score: 0,
            steps: 0,
            hunger: 0,
            state: GameState::Running,
        };
        let placed = game.place_food();
        debug_assert!(placed, "fresh grid must have a free cell for food");
        game
    }

    /// Advances the game by one step with the given relative turn.
    ///
    /// Does nothing once the game has ended. The step counter is incremented
    /// before collision resolution, so every terminal episode has taken at
    /// least one step.
    pub fn step(&mut self, turn: Turn) {
        if !self.state.is_running() {
            return;
        }
        self.dir = self.dir.turned(turn);
        self.steps += 1;
        self.hunger += 1;

        let next = self.head().moved(self.dir);
        if !Self::in_bounds(next) || self.snake.contains(&next) {
            self.state = GameState::Dead;
            return;
        }

        self.snake.push_front(next);
        if next == self.food {
            self.score += 1;
            self.hunger = 0;
            if !self.place_food() {
                self.state = GameState::Won;
                return;
            }
        } else {
            self.snake.pop_back();
        }

        if self.hunger >= HUNGER_LIMIT {
            self.state = GameState::Dead;
        }
    }

    /// Returns the sensor vector fed to the controller network.
    ///
    /// Layout (all values 0.0 or 1.0):
    ///
    /// - `[0..3]`: danger one step to the left / ahead / to the right
    /// - `[3..7]`: heading one-hot (north, east, south, west)
    /// - `[7..11]`: food north / east / south / west of the head
    #[must_use]
    pub fn sense(&self) -> [f32; NET_INPUTS] {
        let head = self.head();
        let danger = |dir: Direction| f32::from(self.is_blocked(head.moved(dir)));
        let flag = |b: bool| f32::from(b);
        [
            danger(self.dir.turned(Turn::Left)),
            danger(self.dir),
            danger(self.dir.turned(Turn::Right)),
            flag(self.dir == Direction::North),
            flag(self.dir == Direction::East),
            flag(self.dir == Direction::South),
            flag(self.dir == Direction::West),
            flag(self.food.y < head.y),
            flag(self.food.x > head.x),
            flag(self.food.y > head.y),
            flag(self.food.x < head.x),
        ]
    }

    #[must_use]
    pub fn head(&self) -> Pos {
        *self.snake.front().expect("snake is never empty")
    }

    /// Iterates the snake's cells, head first.
    pub fn snake(&self) -> impl Iterator<Item = Pos> + '_ {
        self.snake.iter().copied()
    }

    #[must_use]
    pub fn food(&self) -> Pos {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn in_bounds(pos: Pos) -> bool {
        (0..GRID_WIDTH).contains(&pos.x) && (0..GRID_HEIGHT).contains(&pos.y)
    }

    fn is_blocked(&self, pos: Pos) -> bool {
        !Self::in_bounds(pos) || self.snake.contains(&pos)
    }

    /// Places food uniformly on a free cell. Returns `false` if the snake
    /// fills the whole grid.
    fn place_food(&mut self) -> bool {
        let free: Vec<Pos> = (0..GRID_HEIGHT)
            .flat_map(|y| (0..GRID_WIDTH).map(move |x| Pos { x, y }))
            .filter(|pos| !self.snake.contains(pos))
            .collect();
        if free.is_empty() {
            return false;
        }
        self.food = free[self.rng.random_range(0..free.len())];
        true
    }
}
