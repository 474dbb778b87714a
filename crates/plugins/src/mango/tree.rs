//! Mango tree shape
//!
//! A mango tree is a straight jungle log trunk five to seven blocks tall
//! with a leaf canopy around its top. The canopy spans five by five blocks
//! over the upper layers, drops each far corner at random per layer, and
//! narrows to a three by three cap one block above the trunk.

use super::rng::RngSource;
use level::{BlockOffset, BlockType, Location};

/// Shortest trunk
pub const TRUNK_MIN: i32 = 5;
/// Tallest trunk
pub const TRUNK_MAX: i32 = 7;
/// Horizontal reach of the canopy from the trunk
pub const CANOPY_RADIUS: i32 = 2;

/// One block of a generated structure, relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub offset: BlockOffset,
    pub block: BlockType,
}

impl Placement {
    /// World location of this placement for a tree rooted at `anchor`
    pub fn location(&self, anchor: &Location) -> Location {
        anchor.offset(self.offset)
    }
}

/// Generate a tree rooted at `anchor`.
///
/// The trunk height is drawn immediately; the canopy is produced lazily as
/// the returned iterator is consumed, drawing one coin per far corner cell.
pub fn generate<'a>(anchor: Location, rng: &'a mut dyn RngSource) -> TreeStructure<'a> {
    let height = TRUNK_MIN + rng.next_int((TRUNK_MAX - TRUNK_MIN + 1) as u32) as i32;
    TreeStructure {
        anchor,
        height,
        rng,
        cursor: Cursor::Trunk(0),
    }
}

#[derive(Debug, Clone, Copy)]
enum Cursor {
    Trunk(i32),
    Canopy { x: i32, z: i32, y: i32 },
    Done,
}

/// Lazily generated tree placements, trunk first, then the canopy
pub struct TreeStructure<'a> {
    anchor: Location,
    height: i32,
    rng: &'a mut dyn RngSource,
    cursor: Cursor,
}

impl<'a> TreeStructure<'a> {
    pub fn anchor(&self) -> Location {
        self.anchor
    }

    /// Trunk height in blocks
    pub fn height(&self) -> i32 {
        self.height
    }

    fn canopy_start(&self) -> Cursor {
        Cursor::Canopy {
            x: -CANOPY_RADIUS,
            z: -CANOPY_RADIUS,
            y: self.height - 3,
        }
    }

    /// Cell after `(x, z, y)` in canopy order: y fastest, then z, then x
    fn advance(&self, x: i32, z: i32, y: i32) -> Cursor {
        if y < self.height + 1 {
            Cursor::Canopy { x, z, y: y + 1 }
        } else if z < CANOPY_RADIUS {
            Cursor::Canopy { x, z: z + 1, y: self.height - 3 }
        } else if x < CANOPY_RADIUS {
            Cursor::Canopy { x: x + 1, z: -CANOPY_RADIUS, y: self.height - 3 }
        } else {
            Cursor::Done
        }
    }

    fn is_leaf(&mut self, x: i32, z: i32, y: i32) -> bool {
        let far_x = x.abs() == CANOPY_RADIUS;
        let far_z = z.abs() == CANOPY_RADIUS;

        if far_x && far_z && self.rng.next_bool() {
            return false;
        }
        if y == self.height + 1 && (far_x || far_z) {
            return false;
        }
        if x == 0 && z == 0 && y < self.height {
            return false;
        }
        true
    }
}

impl Iterator for TreeStructure<'_> {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        loop {
            match self.cursor {
                Cursor::Trunk(y) if y < self.height => {
                    self.cursor = Cursor::Trunk(y + 1);
                    return Some(Placement {
                        offset: BlockOffset::new(0, y, 0),
                        block: BlockType::JungleLog,
                    });
                }
                Cursor::Trunk(_) => self.cursor = self.canopy_start(),
                Cursor::Canopy { x, z, y } => {
                    self.cursor = self.advance(x, z, y);
                    if self.is_leaf(x, z, y) {
                        return Some(Placement {
                            offset: BlockOffset::new(x, y, z),
                            block: BlockType::JungleLeaves,
                        });
                    }
                }
                Cursor::Done => return None,
            }
        }
    }
}
