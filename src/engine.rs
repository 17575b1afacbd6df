//! Game engine
//!
//! Owns every piece of state and every collaborator. The outer frame loop
//! feeds it input events, calls `update` once, then renders from the
//! accessors. All of it runs on one thread.

use std::collections::BTreeSet;

use crate::assets::Assets;
use crate::audio::{AudioBackend, AudioManager, MusicTrack, SoundEffect};
use crate::catalog::CatalogFile;
use crate::consts::MAX_STAGES;
use crate::mode::{Command, MenuState, Mode, SlotMenuMode};
use crate::now_unix_s;
use crate::persistence::{SaveRecord, SaveStore};
use crate::platform::{HeldInput, InputEvent};
use crate::settings::Settings;
use crate::sim::{self, GameState, StageEvent, TickInput};
use crate::ui::TitleCard;

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// HUD values for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub stage: u32,
    pub shot_ready: bool,
}

impl Hud {
    pub fn shot_label(&self) -> &'static str {
        if self.shot_ready { "Shot: READY" } else { "Shot: USED" }
    }
}

/// Set the stage for a committed stage-select choice and build the record
/// that should be persisted for it. Does no I/O.
pub fn commit_stage_choice(game: &mut GameState, stage: u32, timestamp: f64) -> SaveRecord {
    game.stage = stage.clamp(1, MAX_STAGES);
    SaveRecord::for_stage(game.stage, timestamp)
}

pub struct Engine {
    settings: Settings,
    menu: MenuState,
    game: GameState,
    store: SaveStore,
    stages: CatalogFile,
    assets: Assets,
    audio: AudioManager,
    held: HeldInput,
    title: TitleCard,
}

impl Engine {
    /// Create an engine with a random stage seed
    pub fn new(settings: Settings, backend: Box<dyn AudioBackend>) -> Self {
        Self::with_seed(settings, backend, rand::random())
    }

    /// Create an engine with a fixed stage seed
    pub fn with_seed(settings: Settings, backend: Box<dyn AudioBackend>, seed: u64) -> Self {
        let mut assets = Assets::new(settings.texture_dir(), settings.sound_dir());
        assets.reload_all();

        let mut audio = AudioManager::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let store = SaveStore::new(&settings.saves_dir);
        if let Err(e) = std::fs::create_dir_all(store.dir()) {
            log::warn!("Could not create {}: {}", store.dir().display(), e);
        }

        let mut engine = Self {
            menu: MenuState::new(),
            game: GameState::new(settings.window(), seed),
            store,
            stages: CatalogFile::new(settings.stages_path()),
            assets,
            audio,
            held: HeldInput::default(),
            title: TitleCard::default(),
            settings,
        };
        engine.reset_stage();
        engine.play_music(MusicTrack::Title);
        engine
    }

    // --- accessors ---

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn mode(&self) -> Mode {
        self.menu.mode()
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn title_card(&self) -> &TitleCard {
        &self.title
    }

    pub fn current_music(&self) -> Option<MusicTrack> {
        self.audio.current_track()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            stage: self.game.stage,
            shot_ready: self.game.shot_available,
        }
    }

    /// Latest held keys and pointer position
    pub fn set_held(&mut self, held: HeldInput) {
        self.held = held;
    }

    fn window(&self) -> (i32, i32) {
        self.settings.window()
    }

    // --- frame entry points ---

    /// Route one input event through the mode state machine
    pub fn handle_event(&mut self, event: &InputEvent) -> Control {
        if let InputEvent::MouseDown { x, y, .. } = *event {
            self.held.pointer = (x, y);
        }
        let Some(resolved) = self.menu.resolve(event) else {
            return Control::Continue;
        };
        if resolved.select_sound {
            self.play_sound(SoundEffect::Select);
        }
        self.apply(resolved.command)
    }

    /// Advance one frame. The world only moves while playing and unpaused.
    pub fn update(&mut self, dt: f32) {
        if self.menu.mode() == Mode::Title {
            self.title.advance(dt);
        }
        if !self.menu.simulation_active() {
            return;
        }

        let (px, py) = self.held.pointer;
        let input = TickInput {
            up: self.held.up,
            down: self.held.down,
            left: self.held.left,
            right: self.held.right,
            pointer: Some(self.game.screen_to_world(px, py)),
        };
        let report = sim::tick(&mut self.game, &input, dt, &self.stages);
        for effect in report.sounds {
            self.play_sound(effect);
        }
        match report.event {
            Some(StageEvent::Died { stage }) => log::info!("Caught on stage {}, restarting", stage),
            Some(StageEvent::Cleared { from, to }) => log::info!("Stage {} cleared, now {}", from, to),
            None => {}
        }
    }

    fn apply(&mut self, command: Command) -> Control {
        let window = self.window();
        match command {
            Command::ShowFrontMenu => self.menu.enter_front_menu(window),
            Command::BackToTitle => self.back_to_title(),
            Command::OpenSlotMenu(mode) => {
                let slots = self.store.list_slots();
                self.menu.enter_slot_menu(mode, window, &slots);
            }
            Command::ContinueMostRecent => self.continue_most_recent(),
            Command::CloseSlotMenu => self.menu.enter_front_menu(window),
            Command::ChooseSlot(slot) => self.choose_slot(slot),
            Command::CommitStage(stage) => self.commit_stage(stage),
            Command::BackToSlotMenu => {
                let slots = self.store.list_slots();
                self.menu.return_to_slot_menu(window, &slots);
            }
            Command::OpenPauseMenu => self.menu.open_pause_menu(window),
            Command::Resume => self.menu.enter_playing(),
            Command::Restart => self.restart_game(),
            Command::OpenOptions => self.menu.open_options(window),
            Command::CloseOptions => self.menu.open_pause_menu(window),
            Command::FireAt { x, y } => {
                let (wx, wy) = self.game.screen_to_world(x, y);
                self.fire(wx, wy);
            }
            Command::FireAtPointer => {
                let (px, py) = self.held.pointer;
                let (wx, wy) = self.game.screen_to_world(px, py);
                self.fire(wx, wy);
            }
            Command::ReloadAssets => {
                log::info!("Reloading assets");
                self.assets.reload_all();
            }
            Command::Quit => {
                self.audio.stop_music();
                log::info!("Quit requested");
                return Control::Quit;
            }
        }
        Control::Continue
    }

    // --- actions ---

    /// Rebuild the world for the current stage from a fresh catalog read
    pub fn reset_stage(&mut self) {
        sim::reset_stage(&mut self.game, &self.stages);
    }

    fn fire(&mut self, wx: i32, wy: i32) {
        if sim::fire_projectile(&mut self.game, wx, wy) {
            self.play_sound(SoundEffect::Shoot);
        }
    }

    fn back_to_title(&mut self) {
        self.menu.enter_title();
        self.title.reset();
        self.play_music(MusicTrack::Title);
    }

    fn choose_slot(&mut self, slot: usize) {
        let window = self.window();
        match self.menu.slot_mode() {
            SlotMenuMode::New => {
                let unlocked = BTreeSet::from([1]);
                self.menu.enter_stage_select(slot, window, &unlocked);
            }
            SlotMenuMode::Load => {
                if !self.load_from_slot(slot) {
                    self.menu.set_message(format!("Slot {} is empty", slot));
                }
            }
            SlotMenuMode::Save => {
                self.save_to_slot(slot);
                self.menu.enter_playing();
            }
            SlotMenuMode::None => {}
        }
    }

    fn commit_stage(&mut self, stage: u32) {
        let record = commit_stage_choice(&mut self.game, stage, now_unix_s());
        if let Some(slot) = self.menu.selected_slot() {
            match self.store.write(slot, &record) {
                Ok(()) => log::info!("Created new game in slot {} at stage {}", slot, record.stage),
                Err(e) => log::warn!("Could not write slot {}: {}", slot, e),
            }
        }
        self.menu.enter_playing();
        self.play_music(MusicTrack::Game);
        self.reset_stage();
    }

    /// Persist the current stage to a slot. Failures are logged, not raised.
    pub fn save_to_slot(&mut self, slot: usize) -> bool {
        let record = SaveRecord::for_stage(self.game.stage, now_unix_s());
        match self.store.write(slot, &record) {
            Ok(()) => {
                log::info!("Saved to slot {} at stage {}", slot, record.stage);
                true
            }
            Err(e) => {
                log::warn!("Save to slot {} failed: {}", slot, e);
                false
            }
        }
    }

    /// Load a slot and start playing it. Returns false for an empty slot.
    pub fn load_from_slot(&mut self, slot: usize) -> bool {
        let Some(record) = self.store.read(slot) else {
            log::info!("Slot {} is empty", slot);
            return false;
        };
        self.game.stage = record.stage.clamp(1, MAX_STAGES);
        self.reset_stage();
        self.menu.enter_playing();
        self.play_music(MusicTrack::Game);
        log::info!("Loaded slot {} at stage {}", slot, self.game.stage);
        true
    }

    /// Load the most recently saved slot, or start the new-game flow
    pub fn continue_most_recent(&mut self) {
        if let Some(slot) = self.store.most_recent_slot_index() {
            if self.load_from_slot(slot) {
                return;
            }
        }
        let window = self.window();
        let slots = self.store.list_slots();
        self.menu.enter_slot_menu(SlotMenuMode::New, window, &slots);
    }

    fn restart_game(&mut self) {
        self.game.stage = 1;
        self.reset_stage();
        self.menu.enter_playing();
    }

    // --- audio ---

    fn play_sound(&mut self, effect: SoundEffect) {
        self.audio.play(effect, self.assets.sound(effect));
    }

    fn play_music(&mut self, track: MusicTrack) {
        let path = self.settings.music_path(track);
        let volume = self.settings.music_volume(track);
        self.audio.play_music(track, &path, volume);
    }
}
