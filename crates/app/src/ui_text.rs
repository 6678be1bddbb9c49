//! Text rendering of a [`Frame`], menus, and status lines for the line host.

use crawl_core::{CharacterSheet, Frame, Menu, Panel, TileShade};

use crate::app_loop::{AppCompletion, AppMode};

pub const HELP_LINES: [&str; 6] = [
    "move: h j k l y u b n   pick up: g   inventory: i   character: c",
    "use item: a <letter>   drop item: d <letter>   descend: >",
    "targeting: t <x> <y> to confirm, x to cancel",
    "level up: the option letter or number",
    "q saves and quits",
    "",
];

/// Map rows with one glyph per cell: sprites over tiles, hidden cells blank.
pub fn map_lines(frame: &Frame) -> Vec<String> {
    let mut cells: Vec<char> = frame
        .tiles
        .iter()
        .map(|shade| match shade {
            TileShade::Unexplored => ' ',
            TileShade::LitWall | TileShade::DarkWall => '#',
            TileShade::LitGround => '.',
            TileShade::DarkGround => ',',
        })
        .collect();
    for sprite in frame.sprites.iter().filter(|sprite| sprite.visible) {
        if sprite.pos.x < 0 || sprite.pos.y < 0 {
            continue;
        }
        let (x, y) = (sprite.pos.x as usize, sprite.pos.y as usize);
        if x < frame.width && y < frame.height {
            cells[y * frame.width + x] = sprite.glyph;
        }
    }
    cells.chunks(frame.width.max(1)).map(|row| row.iter().collect()).collect()
}

pub fn status_line(frame: &Frame) -> String {
    let status = &frame.status;
    let mut line = format!(
        "HP: {}/{}  Dungeon level: {}",
        status.hp, status.max_hp, status.dungeon_level
    );
    if !status.names_under_cursor.is_empty() {
        line.push_str("  Here: ");
        line.push_str(&status.names_under_cursor.join(", "));
    }
    line
}

pub fn message_lines(frame: &Frame, count: usize) -> Vec<String> {
    let messages = &frame.status.messages;
    let skip = messages.len().saturating_sub(count);
    messages.iter().skip(skip).map(|message| message.text.clone()).collect()
}

pub fn menu_lines(menu: &Menu) -> Vec<String> {
    let mut lines = vec![menu.header.clone()];
    for (index, option) in menu.options.iter().enumerate() {
        if let Some(letter) = Menu::letter(index) {
            lines.push(format!("({letter}) {option}"));
        }
    }
    lines
}

pub fn character_sheet_lines(sheet: &CharacterSheet) -> Vec<String> {
    vec![
        "Character Information".to_string(),
        format!("Level: {}", sheet.level),
        format!("Experience: {}", sheet.experience),
        format!("Experience to level up: {}", sheet.experience_to_level),
        format!("Maximum HP: {}", sheet.max_hp),
        format!("Attack: {}", sheet.power),
        format!("Defense: {}", sheet.defense),
        format!("Dodge: {}", sheet.dodge),
        format!("To hit: {}", sheet.to_hit),
        format!("Dungeon level: {}", sheet.dungeon_level),
    ]
}

pub fn status_text(mode: AppMode) -> &'static str {
    match mode {
        AppMode::Playing => "Your move (? for help)",
        AppMode::Targeting => "Choose a target: t <x> <y>, or x to cancel",
        AppMode::LevelUp => "Your battle skills grow stronger! Pick a stat",
        AppMode::Finished(AppCompletion::Died) => "You died. q to quit",
        AppMode::Finished(AppCompletion::Quit) => "Saving and quitting",
    }
}

pub fn panel_title(panel: Panel) -> &'static str {
    match panel {
        Panel::Inventory => "Inventory",
        Panel::CharacterSheet => "Character",
    }
}
