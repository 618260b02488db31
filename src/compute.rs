//! Game-logic functions.
//!
//! Every function here mutates the state it is handed in place; the only
//! other side effect is the injected RNG, so a seeded RNG replays a run
//! exactly.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::consts::{
    CONTACT_DAMAGE, COOLDOWN, END_HOLD_FRAMES, ENEMY_FIRE_ODDS, ENEMY_LASER_OFFSET,
    ENEMY_VELOCITY, ENEMY_X_RANGE, ENEMY_Y_RANGE, HEIGHT, LASER_DAMAGE, LASER_VELOCITY,
    PLAYER_BOTTOM_MARGIN, PLAYER_START, PLAYER_VELOCITY, START_HEALTH, START_LIVES, WAVE_STEP,
    WIDTH, WIN_LEVEL,
};
use crate::entities::{
    Combatant, Controls, GameStatus, Projectile, Role, RunState, WaveState,
};
use crate::mask::collide;
use crate::sprites::EnemyColor;

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn new_player() -> Combatant {
    let (x, y) = PLAYER_START;
    Combatant::new(x, y, Role::Player, START_HEALTH)
}

pub fn new_enemy(x: i32, y: i32, color: EnemyColor) -> Combatant {
    Combatant::new(x, y, Role::Enemy(color), START_HEALTH)
}

/// Fresh run: full health, three lives, level 0 with no enemies yet.  The
/// first tick spawns wave 1.
pub fn init_state() -> RunState {
    RunState {
        player: new_player(),
        lives: START_LIVES,
        wave: WaveState::new(),
        status: GameStatus::Playing,
        game_over_frames: 0,
        win_frames: 0,
        frame: 0,
    }
}

// ── Firing ───────────────────────────────────────────────────────────────────

/// Fire one laser if the cooldown allows it.  Returns whether a shot left.
pub fn shoot(ship: &mut Combatant) -> bool {
    if ship.cooldown != 0 {
        return false;
    }
    let x = match ship.role {
        Role::Player => ship.x,
        Role::Enemy(_) => ship.x - ENEMY_LASER_OFFSET,
    };
    let laser = Projectile::new(x, ship.y, ship.laser());
    ship.projectiles.push(laser);
    ship.cooldown = 1;
    true
}

/// Advance the cooldown by one frame: 1 → 2 → … → COOLDOWN → 0.
pub fn cooldown(ship: &mut Combatant) {
    if ship.cooldown >= COOLDOWN {
        ship.cooldown = 0;
    } else if ship.cooldown > 0 {
        ship.cooldown += 1;
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Move an enemy's lasers and resolve hits on the player.
///
/// Off-screen lasers are dropped before they are tested, so a laser that
/// left the field can never hit.
pub fn move_enemy_lasers(enemy: &mut Combatant, velocity: i32, player: &mut Combatant) {
    cooldown(enemy);
    enemy.projectiles.retain_mut(|laser| {
        laser.advance(velocity);
        if laser.is_off_screen(HEIGHT) {
            return false;
        }
        if collide(&*laser, &*player) {
            player.health -= LASER_DAMAGE;
            log::debug!("player hit by laser, health {}", player.health);
            return false;
        }
        true
    });
}

/// Move the player's lasers; each one destroys at most one enemy.
/// Returns the number of enemies destroyed.
pub fn move_player_lasers(
    player: &mut Combatant,
    velocity: i32,
    enemies: &mut Vec<Combatant>,
) -> usize {
    cooldown(player);
    let mut destroyed = 0;
    player.projectiles.retain_mut(|laser| {
        laser.advance(velocity);
        if laser.is_off_screen(HEIGHT) {
            return false;
        }
        match enemies.iter().position(|enemy| collide(&*laser, enemy)) {
            Some(i) => {
                enemies.remove(i);
                destroyed += 1;
                false
            }
            None => true,
        }
    });
    destroyed
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Apply one frame of held keys.  The ship stays inside the field and keeps
/// `PLAYER_BOTTOM_MARGIN` free below it for the health bar.
pub fn apply_input(player: &mut Combatant, controls: &Controls) {
    let max_x = WIDTH - player.width();
    let max_y = HEIGHT - player.height() - PLAYER_BOTTOM_MARGIN;

    if controls.up {
        player.y = (player.y - PLAYER_VELOCITY).clamp(0, max_y);
    }
    if controls.down {
        player.y = (player.y + PLAYER_VELOCITY).clamp(0, max_y);
    }
    if controls.left {
        player.x = (player.x - PLAYER_VELOCITY).clamp(0, max_x);
    }
    if controls.right {
        player.x = (player.x + PLAYER_VELOCITY).clamp(0, max_x);
    }
    if controls.fire {
        shoot(player);
    }
}

// ── Waves ────────────────────────────────────────────────────────────────────

/// Start the next level: bump the level and wave length and drop a new
/// batch of enemies somewhere above the screen.
pub fn spawn_wave(wave: &mut WaveState, rng: &mut impl Rng) {
    wave.level += 1;
    wave.wave_length += WAVE_STEP;
    for _ in 0..wave.wave_length {
        let x = rng.gen_range(ENEMY_X_RANGE);
        let y = rng.gen_range(ENEMY_Y_RANGE);
        let color = *EnemyColor::ALL.choose(rng).unwrap_or(&EnemyColor::Red);
        wave.enemies.push(new_enemy(x, y, color));
    }
    log::info!("level {}: spawned {} enemies", wave.level, wave.wave_length);
}

/// Spawn the next wave if the current one is gone.  Returns whether it did.
pub fn advance_wave(wave: &mut WaveState, rng: &mut impl Rng) -> bool {
    if !wave.is_cleared() {
        return false;
    }
    spawn_wave(wave, rng);
    true
}

/// Width in logical pixels of the green part of the player's health bar.
pub fn health_bar_fill(ship: &Combatant) -> i32 {
    if ship.max_health <= 0 {
        return 0;
    }
    ship.width() * ship.health.clamp(0, ship.max_health) / ship.max_health
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Count one frame of an end-of-run banner; the run ends once the hold has
/// lasted longer than `END_HOLD_FRAMES`.
fn hold(counter: &mut u32) -> bool {
    *counter += 1;
    *counter > END_HOLD_FRAMES
}

/// Advance the simulation by one frame.
///
/// Order: lose check, win check, wave spawn, player input, enemies (move,
/// lasers, random fire, ramming, leaving the bottom), then player lasers.
/// While a win or lose banner is up nothing else moves.
pub fn tick(state: &mut RunState, controls: &Controls, rng: &mut impl Rng) {
    if state.status == GameStatus::Terminated {
        return;
    }
    state.frame += 1;

    // ── 1. Lose / win holds ──────────────────────────────────────────────────
    if state.lives <= 0 || state.player.health <= 0 {
        if state.status != GameStatus::GameOver {
            log::info!(
                "game over at level {} (lives {}, health {})",
                state.wave.level,
                state.lives,
                state.player.health
            );
        }
        state.status = GameStatus::GameOver;
        if hold(&mut state.game_over_frames) {
            state.status = GameStatus::Terminated;
            log::info!("run terminated after game over");
        }
        return;
    }

    if state.wave.level == WIN_LEVEL {
        if state.status != GameStatus::PlayerWin {
            log::info!("player wins with {} lives left", state.lives);
        }
        state.status = GameStatus::PlayerWin;
        if hold(&mut state.win_frames) {
            state.status = GameStatus::Terminated;
            log::info!("run terminated after win");
        }
        return;
    }

    // ── 2. Next wave ─────────────────────────────────────────────────────────
    advance_wave(&mut state.wave, rng);

    // ── 3. Player input ──────────────────────────────────────────────────────
    apply_input(&mut state.player, controls);

    // ── 4. Enemies ───────────────────────────────────────────────────────────
    let RunState {
        player,
        lives,
        wave,
        ..
    } = state;

    wave.enemies.retain_mut(|enemy| {
        enemy.y += ENEMY_VELOCITY;
        move_enemy_lasers(enemy, LASER_VELOCITY, player);

        if rng.gen_ratio(1, ENEMY_FIRE_ODDS) {
            shoot(enemy);
        }

        if collide(&*enemy, &*player) {
            player.health -= CONTACT_DAMAGE;
            log::debug!("player rammed, health {}", player.health);
            return false;
        }

        if enemy.y + enemy.height() > HEIGHT {
            *lives -= 1;
            log::debug!("enemy got through, lives {}", lives);
            return false;
        }
        true
    });

    // ── 5. Player lasers ─────────────────────────────────────────────────────
    move_player_lasers(player, -LASER_VELOCITY, &mut wave.enemies);
}
