//! Menu layouts
//!
//! Each builder is a pure function of the window size and whatever data the
//! menu shows. The action a button triggers is attached when it is built, so
//! nothing downstream ever inspects a label.

use std::collections::BTreeSet;

use crate::consts::TITLE_FADE_SECS;
use crate::mode::SlotMenuMode;
use crate::persistence::SlotInfo;
use crate::sim::Rect;

/// What activating a button asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewGame,
    Continue,
    Load,
    Back,
    Quit,
    /// Pause menu: close and return to play
    Resume,
    SaveGame,
    LoadGame,
    Restart,
    Options,
    /// 1-based save slot
    Slot(usize),
    Stage(u32),
}

/// A clickable region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub action: MenuAction,
    /// Disabled buttons are drawn dimmed and ignore clicks
    pub enabled: bool,
}

impl Button {
    fn new(rect: Rect, label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            rect,
            label: label.into(),
            action,
            enabled: true,
        }
    }
}

/// First enabled button under the point
pub fn hit_test(buttons: &[Button], x: i32, y: i32) -> Option<&Button> {
    buttons
        .iter()
        .find(|b| b.enabled && b.rect.contains_point(x, y))
}

/// Vertical column of equal buttons, centered horizontally
fn column(
    window: (i32, i32),
    size: (i32, i32),
    block_h: i32,
    step: i32,
    items: &[(&str, MenuAction)],
) -> Vec<Button> {
    let sx = (window.0 - size.0).div_euclid(2);
    let sy = (window.1 - block_h).div_euclid(2);
    items
        .iter()
        .enumerate()
        .map(|(i, (label, action))| {
            Button::new(
                Rect::new(sx, sy + i as i32 * step, size.0, size.1),
                *label,
                *action,
            )
        })
        .collect()
}

pub fn build_front_menu(window: (i32, i32)) -> Vec<Button> {
    column(
        window,
        (300, 48),
        240,
        64,
        &[
            ("New Game", MenuAction::NewGame),
            ("Continue", MenuAction::Continue),
            ("Load", MenuAction::Load),
            ("Back", MenuAction::Back),
            ("Quit", MenuAction::Quit),
        ],
    )
}

pub fn build_pause_menu(window: (i32, i32)) -> Vec<Button> {
    column(
        window,
        (260, 40),
        260,
        52,
        &[
            ("Continue", MenuAction::Resume),
            ("Save Game", MenuAction::SaveGame),
            ("Load Game", MenuAction::LoadGame),
            ("Restart", MenuAction::Restart),
            ("Options", MenuAction::Options),
            ("Quit", MenuAction::Quit),
        ],
    )
}

pub fn build_options_menu(window: (i32, i32)) -> Vec<Button> {
    column(window, (220, 36), 220, 0, &[("Back", MenuAction::Back)])
}

/// One button per slot, then Back
pub fn build_slot_buttons(window: (i32, i32), slots: &[SlotInfo]) -> Vec<Button> {
    let (w, h) = (360, 56);
    let sx = (window.0 - w).div_euclid(2);
    let sy = (window.1 - 300).div_euclid(2);

    let mut buttons: Vec<Button> = slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let label = match slot.stage {
                Some(stage) if slot.exists => format!("Slot {} - Stage {}", slot.index, stage),
                _ => format!("Slot {}", slot.index),
            };
            Button::new(
                Rect::new(sx, sy + i as i32 * 72, w, h),
                label,
                MenuAction::Slot(slot.index),
            )
        })
        .collect();

    let back = Rect::new(sx, sy + slots.len() as i32 * 72, w, 44);
    buttons.push(Button::new(back, "Back", MenuAction::Back));
    buttons
}

/// Grid of stage tiles; only unlocked stages are selectable. Back comes last.
pub fn build_stage_buttons(
    window: (i32, i32),
    max_stages: u32,
    unlocked: &BTreeSet<u32>,
) -> Vec<Button> {
    const COLS: i32 = 5;
    let (w, h) = (140, 48);
    let (gap_x, gap_y) = (20, 16);
    let total_width = COLS * w + (COLS - 1) * gap_x;
    let sx = (window.0 - total_width).div_euclid(2);
    let sy = (window.1 - 240).div_euclid(2);

    let mut buttons: Vec<Button> = (1..=max_stages)
        .map(|stage| {
            let col = (stage as i32 - 1) % COLS;
            let row = (stage as i32 - 1) / COLS;
            let rect = Rect::new(sx + col * (w + gap_x), sy + row * (h + gap_y), w, h);
            let mut button = Button::new(rect, stage.to_string(), MenuAction::Stage(stage));
            button.enabled = unlocked.contains(&stage);
            button
        })
        .collect();

    let rows = (max_stages as i32 + COLS - 1) / COLS;
    let back = Rect::new(
        (window.0 - 220).div_euclid(2),
        sy + rows * (h + gap_y) + 24,
        220,
        44,
    );
    buttons.push(Button::new(back, "Back", MenuAction::Back));
    buttons
}

/// Heading shown above the slot list
pub fn slot_menu_title(mode: SlotMenuMode) -> &'static str {
    match mode {
        SlotMenuMode::New => "Choose Slot to Start New Game",
        SlotMenuMode::Load => "Choose Slot to Load",
        SlotMenuMode::Save => "Choose Slot to Save Current Progress",
        SlotMenuMode::None => "Choose Slot",
    }
}

/// Title screen fade-in
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TitleCard {
    elapsed: f32,
}

impl TitleCard {
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    fn progress(&self) -> f32 {
        (self.elapsed / TITLE_FADE_SECS).clamp(0.0, 1.0)
    }

    /// Title text opacity, 0-255
    pub fn alpha(&self) -> u8 {
        (255.0 * self.progress()) as u8
    }

    /// "Press any key" shows once the fade completes
    pub fn prompt_visible(&self) -> bool {
        self.progress() >= 1.0
    }
}
