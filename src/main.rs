//! Phobics entry point
//!
//! The core has no window of its own. Natively this runs a headless demo:
//! it walks the menus into a new game on slot 1 and lets a simple autopilot
//! play for `DEMO_SECONDS`.

/// How long the headless demo plays before quitting
#[cfg(not(target_arch = "wasm32"))]
const DEMO_SECONDS: f32 = 30.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use phobics::audio::NullAudio;
    use phobics::platform::{FrameClock, InputEvent, Key};
    use phobics::settings::SETTINGS_FILE;
    use phobics::{Control, Engine, Settings};

    env_logger::init();
    log::info!("Phobics (headless) starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let mut clock = FrameClock::new(settings.fps);
    let mut engine = Engine::new(settings, Box::new(NullAudio));

    let mut script = demo::menu_script();
    let mut elapsed = 0.0;
    let mut last_stage = 0;

    loop {
        let dt = clock.tick();
        elapsed += dt;

        let mut events = Vec::new();
        if elapsed >= DEMO_SECONDS {
            events.push(InputEvent::Quit);
        } else if let Some(step) = script.next() {
            events.extend(demo::resolve_step(&engine, step));
        } else {
            let (held, fire) = demo::autopilot(engine.game());
            engine.set_held(held);
            if fire {
                events.push(InputEvent::KeyDown(Key::Space));
            }
        }

        for event in &events {
            if engine.handle_event(event) == Control::Quit {
                log::info!("Stopped after {:.1}s on stage {}", elapsed, engine.hud().stage);
                return;
            }
        }
        engine.update(dt);

        let hud = engine.hud();
        if hud.stage != last_stage && engine.menu().simulation_active() {
            log::info!("Stage {} ({})", hud.stage, hud.shot_label());
            last_stage = hud.stage;
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build only ships the library
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use phobics::Engine;
    use phobics::platform::{HeldInput, InputEvent, Key, MouseButton};
    use phobics::sim::GameState;
    use phobics::ui::MenuAction;

    /// One scripted menu step per frame
    #[derive(Debug, Clone, Copy)]
    pub enum Step {
        Press(Key),
        Click(MenuAction),
    }

    pub fn menu_script() -> impl Iterator<Item = Step> {
        [
            Step::Press(Key::Enter),
            Step::Click(MenuAction::NewGame),
            Step::Click(MenuAction::Slot(1)),
            Step::Click(MenuAction::Stage(1)),
        ]
        .into_iter()
    }

    /// Turn a step into an event against the buttons currently on screen
    pub fn resolve_step(engine: &Engine, step: Step) -> Option<InputEvent> {
        match step {
            Step::Press(key) => Some(InputEvent::KeyDown(key)),
            Step::Click(action) => {
                let button = engine.menu().buttons().iter().find(|b| b.action == action);
                let Some(button) = button else {
                    log::warn!("No {:?} button in {:?}", action, engine.mode());
                    return None;
                };
                let (x, y) = button.rect.center();
                Some(InputEvent::MouseDown {
                    button: MouseButton::Left,
                    x,
                    y,
                })
            }
        }
    }

    /// Head for the nearest collectible and spend the shot on the nearest
    /// enemy once it gets close
    pub fn autopilot(game: &GameState) -> (HeldInput, bool) {
        let (px, py) = game.player.center();
        let dist2 = |(x, y): (i32, i32)| {
            let (dx, dy) = (x - px, y - py);
            dx * dx + dy * dy
        };

        let mut held = HeldInput::default();
        if let Some((tx, ty)) = game.collectibles.iter().map(|c| c.center()).min_by_key(|c| dist2(*c)) {
            held.left = tx < px - 2;
            held.right = tx > px + 2;
            held.up = ty < py - 2;
            held.down = ty > py + 2;
        }

        let threat = game
            .enemies
            .iter()
            .map(|e| e.rect.center())
            .min_by_key(|c| dist2(*c));
        let mut fire = false;
        if let Some((ex, ey)) = threat {
            let (ox, oy) = game.world_offset();
            held.pointer = (ex + ox, ey + oy);
            fire = game.shot_available && dist2((ex, ey)) < 120 * 120;
        }
        (held, fire)
    }
}
