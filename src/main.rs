mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_shooter::compute::{init_state, tick};
use space_shooter::consts::FPS;
use space_shooter::entities::{Controls, GameStatus, RunState};
use space_shooter::Settings;

const FRAME: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64); // 60 FPS

#[derive(Parser, Debug)]
#[command(name = "space_shooter", about = "Wave-based space shooter for the terminal")]
struct Cli {
    /// Settings file (default: ~/.space_shooter.json)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Seed for enemy placement and fire, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Write the default settings to the settings file and exit
    #[arg(long)]
    write_default_settings: bool,
}

// ── Held-key snapshot ─────────────────────────────────────────────────────────

/// Returns true if `key` was seen within the last `hold` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, hold: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= hold)
        .unwrap_or(false)
}

/// Which game keys are down this frame.  Arrows and WASD move, Space fires.
fn snapshot(key_frame: &HashMap<KeyCode, u64>, frame: u64, hold: u64) -> Controls {
    let held = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_frame, k, frame, hold));
    Controls {
        up: held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
        down: held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
        left: held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        right: held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        fire: held(&[KeyCode::Char(' ')]),
    }
}

fn is_quit_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
) -> std::io::Result<MenuResult> {
    display::render_menu(out, settings)?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Mouse(MouseEvent { kind: MouseEventKind::Down(_), .. })) => {
                return Ok(MenuResult::Start);
            }
            Ok(Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. })) => {
                if is_quit_key(code, modifiers) {
                    return Ok(MenuResult::Quit);
                }
                if code == KeyCode::Enter {
                    return Ok(MenuResult::Start);
                }
            }
            Ok(Event::Resize(..)) => display::render_menu(out, settings)?,
            Ok(_) => {}
            // Reader thread is gone; nothing more will ever arrive
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame of the last press or
/// repeat event for every key.  Each frame the keys still "fresh" (within
/// `key_hold_frames`) form the `Controls` snapshot handed to the
/// simulation, so holding a direction moves continuously and Space can be
/// held together with a direction.
///
/// Terminals with keyboard enhancement report `Release` and keys are dropped
/// immediately; classic terminals only repeat `Press`, and keys expire after
/// the hold window.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut RunState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    settings: &Settings,
) -> std::io::Result<bool> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    if is_quit_key(code, modifiers) {
                        log::info!("quit during run at frame {}", state.frame);
                        return Ok(true);
                    }
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let controls = snapshot(&key_frame, frame, settings.key_hold_frames);
        tick(state, &controls, rng);

        display::render(out, state, settings)?;

        if state.status == GameStatus::Terminated {
            return Ok(false);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Send log output to a file; stdout belongs to the game screen.
/// `RUST_LOG` overrides the default `info` filter.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed initialising logger")?;
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings_path = cli.settings.unwrap_or_else(Settings::default_path);

    if cli.write_default_settings {
        Settings::default()
            .save(&settings_path)
            .with_context(|| format!("failed writing {}", settings_path.display()))?;
        println!("wrote {}", settings_path.display());
        return Ok(());
    }

    // Load before the logger exists (it may name the log file); report after.
    let loaded = Settings::load(&settings_path);
    let settings = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&settings.log_path())?;
    match &loaded {
        Ok(_) => log::info!("settings: {:?}", settings),
        Err(e) => log::warn!("{}: {e}; using default settings", settings_path.display()),
    }

    let mut rng = match cli.seed {
        Some(seed) => {
            log::info!("using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    terminal::enable_raw_mode().context("failed enabling raw mode")?;
    let result = with_game_screen(&mut out, &settings, |out| run(out, &rx, &mut rng, &settings));

    log::info!("exiting");
    result.context("terminal I/O failed")
}

/// Switch to the game screen, run `body`, then put the terminal back.
///
/// The restore runs whether setup, `body` or neither failed, and also
/// leaves raw mode.
fn with_game_screen<W: Write, T>(
    out: &mut W,
    settings: &Settings,
    body: impl FnOnce(&mut W) -> std::io::Result<T>,
) -> std::io::Result<T> {
    let mut keyboard_enhanced = false;
    let result = enter_game_screen(out, settings, &mut keyboard_enhanced).and_then(|()| body(out));
    leave_game_screen(out, settings, keyboard_enhanced);
    result
}

fn enter_game_screen<W: Write>(
    out: &mut W,
    settings: &Settings,
    keyboard_enhanced: &mut bool,
) -> std::io::Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    if settings.mouse_capture {
        out.execute(EnableMouseCapture)?;
    }
    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    *keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    Ok(())
}

fn leave_game_screen<W: Write>(out: &mut W, settings: &Settings, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    if settings.mouse_capture {
        let _ = out.execute(DisableMouseCapture);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    settings: &Settings,
) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx, settings)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                log::info!("run started");
                let mut state = init_state();
                let quit = game_loop(out, &mut state, rx, rng, settings)?;
                log::info!(
                    "run ended at level {} after {} frames ({:?})",
                    state.wave.level,
                    state.frame,
                    state.status
                );
                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
