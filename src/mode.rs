//! Mode state machine
//!
//! Exactly one `Mode` is current. Input is first resolved against the current
//! mode and its buttons into a `Command` (pure, no side effects); the engine
//! then applies the command. Anything that does not resolve is ignored.
//!
//! | From        | Trigger                    | Command              |
//! |-------------|----------------------------|----------------------|
//! | Title       | any key / left click       | `ShowFrontMenu`      |
//! | FrontMenu   | New Game / Enter           | `OpenSlotMenu(New)`  |
//! | FrontMenu   | Continue                   | `ContinueMostRecent` |
//! | FrontMenu   | Load                       | `OpenSlotMenu(Load)` |
//! | FrontMenu   | Back / Esc                 | `BackToTitle`        |
//! | SlotMenu    | Back / Esc                 | `CloseSlotMenu`      |
//! | SlotMenu    | slot i                     | `ChooseSlot(i)`      |
//! | StageSelect | Back / Esc                 | `BackToSlotMenu`     |
//! | StageSelect | unlocked stage tile        | `CommitStage(i)`     |
//! | Playing     | Esc                        | `OpenPauseMenu`      |
//! | Playing     | Space / left click         | fire                 |
//! | InMenu      | pause menu buttons         | see `MenuAction`     |
//! | InOptions   | Back                       | `CloseOptions`       |

use std::collections::BTreeSet;

use crate::consts::MAX_STAGES;
use crate::persistence::SlotInfo;
use crate::platform::{InputEvent, Key, MouseButton};
use crate::ui::{self, Button, MenuAction};

/// Top-level UI/game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Title,
    FrontMenu,
    SlotMenu,
    StageSelect,
    Playing,
    /// Pause menu overlay
    InMenu,
    /// Options overlay (reached from the pause menu)
    InOptions,
}

/// Why the slot menu is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotMenuMode {
    New,
    Load,
    Save,
    #[default]
    None,
}

/// Intent resolved from one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ShowFrontMenu,
    BackToTitle,
    OpenSlotMenu(SlotMenuMode),
    ContinueMostRecent,
    CloseSlotMenu,
    ChooseSlot(usize),
    CommitStage(u32),
    BackToSlotMenu,
    OpenPauseMenu,
    Resume,
    Restart,
    OpenOptions,
    CloseOptions,
    /// Fire toward a screen-space point
    FireAt { x: i32, y: i32 },
    /// Fire toward the current pointer position
    FireAtPointer,
    ReloadAssets,
    Quit,
}

/// A command plus whether it came from a menu button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub command: Command,
    pub select_sound: bool,
}

impl Resolved {
    fn input(command: Command) -> Self {
        Self {
            command,
            select_sound: false,
        }
    }

    fn button(command: Command) -> Self {
        Self {
            command,
            select_sound: true,
        }
    }
}

/// Current mode plus the data the menus are built from
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    mode: Mode,
    slot_mode: SlotMenuMode,
    selected_slot: Option<usize>,
    /// Freezes the simulation; always true in InMenu/InOptions
    paused: bool,
    buttons: Vec<Button>,
    /// Status line for the current menu (e.g. a failed load)
    message: Option<String>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn slot_mode(&self) -> SlotMenuMode {
        self.slot_mode
    }

    pub fn selected_slot(&self) -> Option<usize> {
        self.selected_slot
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// True only while the world should advance
    pub fn simulation_active(&self) -> bool {
        self.mode == Mode::Playing && !self.paused
    }

    fn switch(&mut self, mode: Mode, buttons: Vec<Button>) {
        log::debug!("mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.buttons = buttons;
        self.message = None;
        match mode {
            Mode::InMenu | Mode::InOptions => self.paused = true,
            Mode::Playing => self.paused = false,
            // menus reached from the pause menu keep the world frozen
            _ => {}
        }
    }

    // --- transitions ---

    pub fn enter_title(&mut self) {
        self.slot_mode = SlotMenuMode::None;
        self.switch(Mode::Title, Vec::new());
    }

    pub fn enter_front_menu(&mut self, window: (i32, i32)) {
        self.slot_mode = SlotMenuMode::None;
        self.switch(Mode::FrontMenu, ui::build_front_menu(window));
    }

    pub fn enter_slot_menu(&mut self, mode: SlotMenuMode, window: (i32, i32), slots: &[SlotInfo]) {
        self.slot_mode = mode;
        self.selected_slot = None;
        self.switch(Mode::SlotMenu, ui::build_slot_buttons(window, slots));
    }

    /// Back from stage select: same slot mode, fresh slot list
    pub fn return_to_slot_menu(&mut self, window: (i32, i32), slots: &[SlotInfo]) {
        self.switch(Mode::SlotMenu, ui::build_slot_buttons(window, slots));
    }

    pub fn enter_stage_select(&mut self, slot: usize, window: (i32, i32), unlocked: &BTreeSet<u32>) {
        self.selected_slot = Some(slot);
        self.switch(
            Mode::StageSelect,
            ui::build_stage_buttons(window, MAX_STAGES, unlocked),
        );
    }

    pub fn enter_playing(&mut self) {
        self.slot_mode = SlotMenuMode::None;
        self.switch(Mode::Playing, Vec::new());
    }

    pub fn open_pause_menu(&mut self, window: (i32, i32)) {
        self.switch(Mode::InMenu, ui::build_pause_menu(window));
    }

    pub fn open_options(&mut self, window: (i32, i32)) {
        self.switch(Mode::InOptions, ui::build_options_menu(window));
    }

    // --- input resolution ---

    /// Map an input event to a command for the current mode
    pub fn resolve(&self, event: &InputEvent) -> Option<Resolved> {
        match *event {
            InputEvent::Quit => Some(Resolved::input(Command::Quit)),
            InputEvent::KeyDown(key) => self.resolve_key(key),
            InputEvent::MouseDown {
                button: MouseButton::Left,
                x,
                y,
            } => self.resolve_click(x, y),
            InputEvent::MouseDown { .. } => None,
        }
    }

    fn resolve_key(&self, key: Key) -> Option<Resolved> {
        let command = match (self.mode, key) {
            (Mode::Title, _) => Command::ShowFrontMenu,
            (_, Key::Reload) => Command::ReloadAssets,
            (Mode::FrontMenu, Key::Enter) => Command::OpenSlotMenu(SlotMenuMode::New),
            (Mode::FrontMenu, Key::Escape) => Command::BackToTitle,
            (Mode::SlotMenu, Key::Escape) => Command::CloseSlotMenu,
            (Mode::StageSelect, Key::Escape) => Command::BackToSlotMenu,
            (Mode::Playing, Key::Escape) => Command::OpenPauseMenu,
            (Mode::Playing, Key::Space) => Command::FireAtPointer,
            _ => return None,
        };
        Some(Resolved::input(command))
    }

    fn resolve_click(&self, x: i32, y: i32) -> Option<Resolved> {
        match self.mode {
            Mode::Title => return Some(Resolved::input(Command::ShowFrontMenu)),
            Mode::Playing => return Some(Resolved::input(Command::FireAt { x, y })),
            _ => {}
        }

        let Some(button) = ui::hit_test(&self.buttons, x, y) else {
            log::debug!("click ({}, {}) hit nothing in {:?}", x, y, self.mode);
            return None;
        };

        let command = match (self.mode, button.action) {
            (Mode::FrontMenu, MenuAction::NewGame) => Command::OpenSlotMenu(SlotMenuMode::New),
            (Mode::FrontMenu, MenuAction::Continue) => Command::ContinueMostRecent,
            (Mode::FrontMenu, MenuAction::Load) => Command::OpenSlotMenu(SlotMenuMode::Load),
            (Mode::FrontMenu, MenuAction::Back) => Command::BackToTitle,
            (Mode::FrontMenu | Mode::InMenu, MenuAction::Quit) => Command::Quit,

            (Mode::SlotMenu, MenuAction::Back) => Command::CloseSlotMenu,
            (Mode::SlotMenu, MenuAction::Slot(slot)) if self.slot_mode != SlotMenuMode::None => {
                Command::ChooseSlot(slot)
            }

            (Mode::StageSelect, MenuAction::Back) => Command::BackToSlotMenu,
            (Mode::StageSelect, MenuAction::Stage(stage)) => Command::CommitStage(stage),

            (Mode::InMenu, MenuAction::Resume) => Command::Resume,
            (Mode::InMenu, MenuAction::SaveGame) => Command::OpenSlotMenu(SlotMenuMode::Save),
            (Mode::InMenu, MenuAction::LoadGame) => Command::OpenSlotMenu(SlotMenuMode::Load),
            (Mode::InMenu, MenuAction::Restart) => Command::Restart,
            (Mode::InMenu, MenuAction::Options) => Command::OpenOptions,

            (Mode::InOptions, MenuAction::Back) => Command::CloseOptions,
            _ => return None,
        };
        Some(Resolved::button(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: (i32, i32) = (800, 600);

    fn slots() -> Vec<SlotInfo> {
        (1..=3)
            .map(|index| SlotInfo {
                index,
                exists: false,
                stage: None,
                unlocked: BTreeSet::from([1]),
                timestamp: None,
            })
            .collect()
    }

    fn click_on(menu: &MenuState, action: MenuAction) -> InputEvent {
        let button = menu
            .buttons()
            .iter()
            .find(|b| b.action == action)
            .expect("button present");
        let (x, y) = button.rect.center();
        InputEvent::MouseDown {
            button: MouseButton::Left,
            x,
            y,
        }
    }

    fn key(k: Key) -> InputEvent {
        InputEvent::KeyDown(k)
    }

    fn command(menu: &MenuState, event: &InputEvent) -> Option<Command> {
        menu.resolve(event).map(|r| r.command)
    }

    /// One state per mode, each reached through its transition method
    fn every_mode() -> Vec<MenuState> {
        let mut states = Vec::new();

        let mut m = MenuState::new();
        m.enter_title();
        states.push(m.clone());

        m.enter_front_menu(WINDOW);
        states.push(m.clone());

        for mode in [SlotMenuMode::New, SlotMenuMode::Load, SlotMenuMode::Save, SlotMenuMode::None] {
            m.enter_slot_menu(mode, WINDOW, &slots());
            states.push(m.clone());
        }

        m.enter_stage_select(1, WINDOW, &BTreeSet::from([1]));
        states.push(m.clone());

        m.enter_playing();
        states.push(m.clone());

        m.open_pause_menu(WINDOW);
        states.push(m.clone());

        m.open_options(WINDOW);
        states.push(m);
        states
    }

    #[test]
    fn test_title_dismissed_by_anything() {
        let menu = MenuState::new();
        assert_eq!(menu.mode(), Mode::Title);
        for k in [Key::Space, Key::Escape, Key::Reload, Key::Other] {
            let resolved = menu.resolve(&key(k)).unwrap();
            assert_eq!(resolved.command, Command::ShowFrontMenu);
            assert!(!resolved.select_sound);
        }
        let click = InputEvent::MouseDown {
            button: MouseButton::Left,
            x: 3,
            y: 3,
        };
        assert_eq!(command(&menu, &click), Some(Command::ShowFrontMenu));

        let right = InputEvent::MouseDown {
            button: MouseButton::Right,
            x: 3,
            y: 3,
        };
        assert_eq!(command(&menu, &right), None);
    }

    #[test]
    fn test_front_menu_buttons() {
        let mut menu = MenuState::new();
        menu.enter_front_menu(WINDOW);

        let cases = [
            (MenuAction::NewGame, Command::OpenSlotMenu(SlotMenuMode::New)),
            (MenuAction::Continue, Command::ContinueMostRecent),
            (MenuAction::Load, Command::OpenSlotMenu(SlotMenuMode::Load)),
            (MenuAction::Back, Command::BackToTitle),
            (MenuAction::Quit, Command::Quit),
        ];
        for (action, expected) in cases {
            let resolved = menu.resolve(&click_on(&menu, action)).unwrap();
            assert_eq!(resolved.command, expected);
            assert!(resolved.select_sound);
        }
        assert_eq!(
            command(&menu, &key(Key::Enter)),
            Some(Command::OpenSlotMenu(SlotMenuMode::New))
        );
        assert_eq!(command(&menu, &key(Key::Escape)), Some(Command::BackToTitle));
    }

    #[test]
    fn test_slot_menu_choices() {
        let mut menu = MenuState::new();
        menu.enter_slot_menu(SlotMenuMode::Load, WINDOW, &slots());
        assert_eq!(menu.selected_slot(), None);
        assert_eq!(
            command(&menu, &click_on(&menu, MenuAction::Slot(2))),
            Some(Command::ChooseSlot(2))
        );
        assert_eq!(
            command(&menu, &click_on(&menu, MenuAction::Back)),
            Some(Command::CloseSlotMenu)
        );
        assert_eq!(command(&menu, &key(Key::Escape)), Some(Command::CloseSlotMenu));

        // slot buttons do nothing without a purpose
        menu.enter_slot_menu(SlotMenuMode::None, WINDOW, &slots());
        assert_eq!(command(&menu, &click_on(&menu, MenuAction::Slot(2))), None);
    }

    #[test]
    fn test_stage_select() {
        let mut menu = MenuState::new();
        menu.enter_stage_select(3, WINDOW, &BTreeSet::from([1, 2]));
        assert_eq!(menu.selected_slot(), Some(3));
        assert_eq!(
            command(&menu, &click_on(&menu, MenuAction::Stage(2))),
            Some(Command::CommitStage(2))
        );
        // locked tile
        assert_eq!(command(&menu, &click_on(&menu, MenuAction::Stage(5))), None);
        assert_eq!(command(&menu, &key(Key::Escape)), Some(Command::BackToSlotMenu));
    }

    #[test]
    fn test_pause_invariant() {
        let mut menu = MenuState::new();
        menu.enter_playing();
        assert!(menu.simulation_active());
        assert_eq!(command(&menu, &key(Key::Escape)), Some(Command::OpenPauseMenu));

        menu.open_pause_menu(WINDOW);
        assert!(menu.paused());
        assert!(!menu.simulation_active());

        menu.open_options(WINDOW);
        assert!(menu.paused());

        menu.enter_slot_menu(SlotMenuMode::Save, WINDOW, &slots());
        assert!(menu.paused());
        assert!(!menu.simulation_active());

        menu.enter_playing();
        assert!(!menu.paused());
    }

    #[test]
    fn test_pause_menu_buttons() {
        let mut menu = MenuState::new();
        menu.open_pause_menu(WINDOW);
        let cases = [
            (MenuAction::Resume, Command::Resume),
            (MenuAction::SaveGame, Command::OpenSlotMenu(SlotMenuMode::Save)),
            (MenuAction::LoadGame, Command::OpenSlotMenu(SlotMenuMode::Load)),
            (MenuAction::Restart, Command::Restart),
            (MenuAction::Options, Command::OpenOptions),
            (MenuAction::Quit, Command::Quit),
        ];
        for (action, expected) in cases {
            assert_eq!(command(&menu, &click_on(&menu, action)), Some(expected));
        }
    }

    #[test]
    fn test_escape_ignored_in_overlays() {
        let mut menu = MenuState::new();
        menu.open_pause_menu(WINDOW);
        assert_eq!(command(&menu, &key(Key::Escape)), None);

        menu.open_options(WINDOW);
        assert_eq!(command(&menu, &key(Key::Escape)), None);
        assert_eq!(
            command(&menu, &click_on(&menu, MenuAction::Back)),
            Some(Command::CloseOptions)
        );
    }

    #[test]
    fn test_playing_fires() {
        let mut menu = MenuState::new();
        menu.enter_playing();
        assert_eq!(command(&menu, &key(Key::Space)), Some(Command::FireAtPointer));
        let click = InputEvent::MouseDown {
            button: MouseButton::Left,
            x: 120,
            y: 80,
        };
        assert_eq!(command(&menu, &click), Some(Command::FireAt { x: 120, y: 80 }));
    }

    #[test]
    fn test_unlisted_inputs_are_ignored() {
        let miss = InputEvent::MouseDown {
            button: MouseButton::Left,
            x: 1,
            y: 1,
        };
        for menu in every_mode() {
            let mode = menu.mode();
            if mode != Mode::Title {
                assert_eq!(
                    command(&menu, &key(Key::Reload)),
                    Some(Command::ReloadAssets),
                    "{:?}",
                    mode
                );
            }
            if !matches!(mode, Mode::Title | Mode::Playing) {
                assert_eq!(command(&menu, &miss), None, "{:?}", mode);
                for k in [Key::Space, Key::Up, Key::Down, Key::Left, Key::Right, Key::Other] {
                    assert_eq!(command(&menu, &key(k)), None, "{:?} {:?}", mode, k);
                }
            }
            if !matches!(mode, Mode::Title | Mode::FrontMenu) {
                assert_eq!(command(&menu, &key(Key::Enter)), None, "{:?}", mode);
            }
        }
    }

    #[test]
    fn test_buttons_rebuilt_on_every_switch() {
        let mut menu = MenuState::new();
        menu.enter_front_menu(WINDOW);
        assert_eq!(menu.buttons().len(), 5);
        menu.set_message("hello");
        menu.enter_slot_menu(SlotMenuMode::New, WINDOW, &slots());
        assert_eq!(menu.buttons().len(), 4);
        assert_eq!(menu.message(), None);
        menu.enter_playing();
        assert!(menu.buttons().is_empty());
    }
}
