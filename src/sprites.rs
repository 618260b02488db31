//! Built-in sprite sheet.
//!
//! Ships and lasers are drawn as small ASCII-art bitmaps scaled up to
//! logical pixels.  The same art produces the sprite's collision mask, so
//! what you see is exactly what can be hit.

use std::sync::OnceLock;

use crate::mask::Mask;

/// Display colour of a sprite.  The renderer maps these to terminal colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Yellow,
    Red,
    Green,
    Blue,
}

/// Enemy palette.  All three share the same stats and differ only in looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyColor {
    Red,
    Green,
    Blue,
}

impl EnemyColor {
    pub const ALL: [EnemyColor; 3] = [EnemyColor::Red, EnemyColor::Green, EnemyColor::Blue];

    fn index(self) -> usize {
        match self {
            EnemyColor::Red => 0,
            EnemyColor::Green => 1,
            EnemyColor::Blue => 2,
        }
    }

    pub fn tint(self) -> Tint {
        match self {
            EnemyColor::Red => Tint::Red,
            EnemyColor::Green => Tint::Green,
            EnemyColor::Blue => Tint::Blue,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub tint: Tint,
    pub mask: Mask,
}

impl Sprite {
    pub fn from_art(tint: Tint, rows: &[&str], scale: i32) -> Self {
        Sprite {
            tint,
            mask: Mask::from_art(rows, scale),
        }
    }

    pub fn width(&self) -> i32 {
        self.mask.width()
    }

    pub fn height(&self) -> i32 {
        self.mask.height()
    }
}

// ── Art ───────────────────────────────────────────────────────────────────────

// 10×9 cells at scale 10 → 100×90
const PLAYER_SHIP: [&str; 9] = [
    "    ##    ",
    "    ##    ",
    "   ####   ",
    "##########",
    "# ###### #",
    "##########",
    "  ######  ",
    "  ##  ##  ",
    "  #    #  ",
];

// Same footprint as the player ship so a shot fired at the ship's anchor
// leaves from its nose.
const PLAYER_LASER: [&str; 9] = [
    "    ##    ",
    "    ##    ",
    "    ##    ",
    "    ##    ",
    "          ",
    "          ",
    "          ",
    "          ",
    "          ",
];

// 10×8 cells at scale 5 → 50×40
const RED_SHIP: [&str; 8] = [
    " ######## ",
    "##########",
    "## #### ##",
    "##########",
    " #  ##  # ",
    "    ##    ",
    "   ####   ",
    "  ##  ##  ",
];

const GREEN_SHIP: [&str; 8] = [
    "#        #",
    "##  ##  ##",
    "##########",
    " ## ## ## ",
    "  ######  ",
    "   ####   ",
    "  # ## #  ",
    " #  ##  # ",
];

const BLUE_SHIP: [&str; 8] = [
    "   ####   ",
    "  ######  ",
    " ## ## ## ",
    "##########",
    "##########",
    " #      # ",
    "##  ##  ##",
    "#   ##   #",
];

// 18×8 cells at scale 5 → 90×40.  Drawn 20 px left of the enemy, the bolt
// (cells 8-9 → 40..50) sits under the ship's centre.
const ENEMY_LASER: [&str; 8] = [
    "                  ",
    "        ##        ",
    "        ##        ",
    "        ##        ",
    "        ##        ",
    "        ##        ",
    "        ##        ",
    "                  ",
];

// ── Sheet ─────────────────────────────────────────────────────────────────────

pub struct SpriteSheet {
    pub player_ship: Sprite,
    pub player_laser: Sprite,
    enemy_ships: [Sprite; 3],
    enemy_lasers: [Sprite; 3],
}

impl SpriteSheet {
    fn build() -> Self {
        let laser = |tint| Sprite::from_art(tint, &ENEMY_LASER, 5);
        SpriteSheet {
            player_ship: Sprite::from_art(Tint::Yellow, &PLAYER_SHIP, 10),
            player_laser: Sprite::from_art(Tint::Yellow, &PLAYER_LASER, 10),
            enemy_ships: [
                Sprite::from_art(Tint::Red, &RED_SHIP, 5),
                Sprite::from_art(Tint::Green, &GREEN_SHIP, 5),
                Sprite::from_art(Tint::Blue, &BLUE_SHIP, 5),
            ],
            enemy_lasers: [laser(Tint::Red), laser(Tint::Green), laser(Tint::Blue)],
        }
    }

    pub fn enemy_ship(&self, color: EnemyColor) -> &Sprite {
        &self.enemy_ships[color.index()]
    }

    pub fn enemy_laser(&self, color: EnemyColor) -> &Sprite {
        &self.enemy_lasers[color.index()]
    }
}

/// The shared sprite sheet, built on first use.
pub fn sheet() -> &'static SpriteSheet {
    static SHEET: OnceLock<SpriteSheet> = OnceLock::new();
    SHEET.get_or_init(SpriteSheet::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_sizes() {
        let s = sheet();
        assert_eq!((s.player_ship.width(), s.player_ship.height()), (100, 90));
        assert_eq!((s.player_laser.width(), s.player_laser.height()), (100, 90));
        for color in EnemyColor::ALL {
            assert_eq!(s.enemy_ship(color).width(), 50);
            assert_eq!(s.enemy_ship(color).height(), 40);
            assert_eq!(s.enemy_laser(color).width(), 90);
            assert_eq!(s.enemy_ship(color).tint, color.tint());
        }
    }

    #[test]
    fn enemy_bolt_is_centred_under_ship() {
        // Bolt column 40..50 in laser space, laser drawn 20 px left of the ship
        let laser = sheet().enemy_laser(EnemyColor::Red);
        assert!(laser.mask.get(40, 10));
        assert!(laser.mask.get(49, 10));
        assert!(!laser.mask.get(39, 10));
        assert!(!laser.mask.get(50, 10));
    }

    #[test]
    fn enemy_palette_shares_footprint_but_not_art() {
        let s = sheet();
        assert_ne!(s.enemy_ship(EnemyColor::Red).mask, s.enemy_ship(EnemyColor::Green).mask);
        assert_ne!(s.enemy_ship(EnemyColor::Green).mask, s.enemy_ship(EnemyColor::Blue).mask);
    }
}
