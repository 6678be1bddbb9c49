//! Line-driven host loop: one text command in, one engine intent out.

use crawl_core::{
    Direction, Game, GameStatus, Intent, Menu, PendingPrompt, PlayerAction, Pos, StatChoice,
};
use tracing::{debug, warn};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCompletion {
    Quit,
    Died,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Playing,
    Targeting,
    LevelUp,
    Finished(AppCompletion),
}

impl AppMode {
    pub fn of(game: &Game) -> Self {
        if game.status() == GameStatus::Dead {
            return AppMode::Finished(AppCompletion::Died);
        }
        match game.pending_prompt() {
            Some(PendingPrompt::Target { .. }) => AppMode::Targeting,
            Some(PendingPrompt::LevelUp) => AppMode::LevelUp,
            None => AppMode::Playing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Act(Intent),
    Help,
    Nothing,
}

/// Decode one input line for the given mode.
pub fn parse_command(line: &str, mode: AppMode) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Nothing);
    };
    if head == "q" || head == "quit" {
        return Ok(Command::Act(Intent::Quit));
    }
    if head == "?" || head == "help" {
        return Ok(Command::Help);
    }

    match mode {
        AppMode::Playing => parse_play_command(head, words.next()),
        AppMode::Targeting => match head {
            "x" | "esc" | "cancel" => Ok(Command::Act(Intent::CancelTarget)),
            "t" => {
                let x = parse_coordinate(words.next(), "x")?;
                let y = parse_coordinate(words.next(), "y")?;
                Ok(Command::Act(Intent::ConfirmTarget(Pos { y, x })))
            }
            _ => Err(format!("'{head}' is not a targeting command (t <x> <y>, x to cancel)")),
        },
        AppMode::LevelUp => {
            let index = match head.chars().next() {
                Some(letter @ 'a'..='z') => Menu::index_of(letter),
                Some(digit @ '1'..='9') => digit.to_digit(10).map(|d| d as usize - 1),
                _ => None,
            };
            index
                .and_then(|index| StatChoice::ALL.get(index).copied())
                .map(|choice| Command::Act(Intent::ChooseLevelUp(choice)))
                .ok_or_else(|| format!("'{head}' is not one of the level-up options"))
        }
        AppMode::Finished(_) => Err("the run is over; q to quit".to_string()),
    }
}

fn parse_play_command(head: &str, argument: Option<&str>) -> Result<Command, String> {
    let direction = match head {
        "h" => Some(Direction::West),
        "j" => Some(Direction::South),
        "k" => Some(Direction::North),
        "l" => Some(Direction::East),
        "y" => Some(Direction::NorthWest),
        "u" => Some(Direction::NorthEast),
        "b" => Some(Direction::SouthWest),
        "n" => Some(Direction::SouthEast),
        _ => None,
    };
    if let Some(direction) = direction {
        return Ok(Command::Act(Intent::Move(direction)));
    }

    let intent = match head {
        "g" | "," => Intent::PickUp,
        "i" => Intent::OpenInventory,
        "c" => Intent::ShowCharacterSheet,
        ">" => Intent::DescendStairs,
        "a" => Intent::UseItem(parse_item_letter(argument)?),
        "d" => Intent::DropItem(parse_item_letter(argument)?),
        _ => return Err(format!("unknown command '{head}' (? for help)")),
    };
    Ok(Command::Act(intent))
}

fn parse_item_letter(argument: Option<&str>) -> Result<usize, String> {
    let Some(word) = argument else {
        return Err("which item? give its inventory letter".to_string());
    };
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => {
            Menu::index_of(letter).ok_or_else(|| format!("'{word}' is not an inventory letter"))
        }
        _ => Err(format!("'{word}' is not an inventory letter")),
    }
}

fn parse_coordinate(word: Option<&str>, axis: &str) -> Result<i32, String> {
    let word = word.ok_or_else(|| format!("missing {axis} coordinate"))?;
    word.parse::<i32>().map_err(|_| format!("{axis} coordinate '{word}' must be a number"))
}

#[derive(Debug, Default)]
pub struct AppState {
    pub mode: AppMode,
    pub last_action: Option<PlayerAction>,
    /// One-line feedback for input the engine never saw.
    pub feedback: Option<String>,
    pub show_help: bool,
}

impl AppState {
    pub fn new(game: &Game) -> Self {
        Self { mode: AppMode::of(game), ..Self::default() }
    }

    /// Handle one input line and return the engine's verdict, if it was consulted.
    pub fn tick(&mut self, game: &mut Game, line: &str) -> Option<PlayerAction> {
        self.feedback = None;
        self.show_help = false;
        self.last_action = None;

        match parse_command(line, self.mode) {
            Ok(Command::Act(intent)) => match game.act(intent) {
                Ok(action) => {
                    debug!(?intent, ?action, "intent applied");
                    self.last_action = Some(action);
                }
                Err(err) => {
                    warn!(%err, "engine rejected intent");
                    self.feedback = Some(err.to_string());
                }
            },
            Ok(Command::Help) => self.show_help = true,
            Ok(Command::Nothing) => {}
            Err(message) => self.feedback = Some(message),
        }

        self.mode = if self.last_action == Some(PlayerAction::Exit) {
            AppMode::Finished(AppCompletion::Quit)
        } else {
            AppMode::of(game)
        };
        self.last_action
    }

    pub fn is_finished(&self) -> bool {
        self.mode == AppMode::Finished(AppCompletion::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vi_keys_map_to_moves() {
        assert_eq!(
            parse_command("h", AppMode::Playing),
            Ok(Command::Act(Intent::Move(Direction::West)))
        );
        assert_eq!(
            parse_command("n", AppMode::Playing),
            Ok(Command::Act(Intent::Move(Direction::SouthEast)))
        );
    }

    #[test]
    fn item_commands_take_an_inventory_letter() {
        assert_eq!(parse_command("a c", AppMode::Playing), Ok(Command::Act(Intent::UseItem(2))));
        assert_eq!(parse_command("d a", AppMode::Playing), Ok(Command::Act(Intent::DropItem(0))));
        assert!(parse_command("a", AppMode::Playing).is_err());
        assert!(parse_command("a 7", AppMode::Playing).is_err());
    }

    #[test]
    fn targeting_accepts_coordinates_or_cancel() {
        assert_eq!(
            parse_command("t 12 4", AppMode::Targeting),
            Ok(Command::Act(Intent::ConfirmTarget(Pos { y: 4, x: 12 })))
        );
        assert_eq!(parse_command("x", AppMode::Targeting), Ok(Command::Act(Intent::CancelTarget)));
        assert!(parse_command("h", AppMode::Targeting).is_err());
        assert!(parse_command("t 3", AppMode::Targeting).is_err());
    }

    #[test]
    fn level_up_accepts_letters_and_digits() {
        assert_eq!(
            parse_command("b", AppMode::LevelUp),
            Ok(Command::Act(Intent::ChooseLevelUp(StatChoice::Power)))
        );
        assert_eq!(
            parse_command("4", AppMode::LevelUp),
            Ok(Command::Act(Intent::ChooseLevelUp(StatChoice::Dodge)))
        );
        assert!(parse_command("e", AppMode::LevelUp).is_err());
    }

    #[test]
    fn quit_and_blank_lines_work_in_every_mode() {
        for mode in [AppMode::Playing, AppMode::Targeting, AppMode::LevelUp] {
            assert_eq!(parse_command("q", mode), Ok(Command::Act(Intent::Quit)));
            assert_eq!(parse_command("   ", mode), Ok(Command::Nothing));
        }
    }
}
