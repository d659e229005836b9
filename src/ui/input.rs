use crate::showcase::Page;
use minifb::{Key, KeyRepeat, Window};

/// User intents, decoupled from the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectCategory(usize),
    NextCategory,
    PreviousCategory,
    HoverNext,
    HoverPrevious,
    Click,
    CycleFamily,
    NextPerfume,
    PreviousPerfume,
    RotateLeft,
    RotateRight,
    BeginSearch,
    QueryChar(char),
    QueryBackspace,
    EndSearch,
    SwitchPage,
    Reload,
}

/// Lower-case character typed by `key`, if it is one the search box accepts.
fn typed_char(key: Key) -> Option<char> {
    let c = match key {
        Key::A => 'a',
        Key::B => 'b',
        Key::C => 'c',
        Key::D => 'd',
        Key::E => 'e',
        Key::F => 'f',
        Key::G => 'g',
        Key::H => 'h',
        Key::I => 'i',
        Key::J => 'j',
        Key::K => 'k',
        Key::L => 'l',
        Key::M => 'm',
        Key::N => 'n',
        Key::O => 'o',
        Key::P => 'p',
        Key::Q => 'q',
        Key::R => 'r',
        Key::S => 's',
        Key::T => 't',
        Key::U => 'u',
        Key::V => 'v',
        Key::W => 'w',
        Key::X => 'x',
        Key::Y => 'y',
        Key::Z => 'z',
        Key::Key0 => '0',
        Key::Key1 => '1',
        Key::Key2 => '2',
        Key::Key3 => '3',
        Key::Key4 => '4',
        Key::Key5 => '5',
        Key::Key6 => '6',
        Key::Key7 => '7',
        Key::Key8 => '8',
        Key::Key9 => '9',
        Key::Space => ' ',
        _ => return None,
    };
    Some(c)
}

/// Maps freshly pressed keys to actions. While `searching`, keys type into
/// the perfume query instead.
pub fn actions_for_keys(page: Page, searching: bool, keys: &[Key]) -> Vec<Action> {
    if searching {
        return keys
            .iter()
            .filter_map(|&key| match key {
                Key::Enter => Some(Action::EndSearch),
                Key::Backspace => Some(Action::QueryBackspace),
                _ => typed_char(key).map(Action::QueryChar),
            })
            .collect();
    }

    keys.iter()
        .filter_map(|key| match (page, key) {
            (_, Key::Tab) => Some(Action::SwitchPage),
            (_, Key::R) => Some(Action::Reload),

            (Page::Cabinet, Key::Key1) => Some(Action::SelectCategory(0)),
            (Page::Cabinet, Key::Key2) => Some(Action::SelectCategory(1)),
            (Page::Cabinet, Key::Key3) => Some(Action::SelectCategory(2)),
            (Page::Cabinet, Key::Key4) => Some(Action::SelectCategory(3)),
            (Page::Cabinet, Key::Key5) => Some(Action::SelectCategory(4)),
            (Page::Cabinet, Key::Key6) => Some(Action::SelectCategory(5)),
            (Page::Cabinet, Key::Right) => Some(Action::NextCategory),
            (Page::Cabinet, Key::Left) => Some(Action::PreviousCategory),
            (Page::Cabinet, Key::Down) => Some(Action::HoverNext),
            (Page::Cabinet, Key::Up) => Some(Action::HoverPrevious),
            (Page::Cabinet, Key::Enter) => Some(Action::Click),

            (Page::Perfume, Key::F) => Some(Action::CycleFamily),
            (Page::Perfume, Key::Slash) => Some(Action::BeginSearch),
            (Page::Perfume, Key::Down) => Some(Action::NextPerfume),
            (Page::Perfume, Key::Up) => Some(Action::PreviousPerfume),
            (Page::Perfume, Key::Left) => Some(Action::RotateLeft),
            (Page::Perfume, Key::Right) => Some(Action::RotateRight),
            _ => None,
        })
        .collect()
}

/// Polls the window for keys pressed since the last frame.
pub fn poll_actions(window: &Window, page: Page, searching: bool) -> Vec<Action> {
    actions_for_keys(page, searching, &window.get_keys_pressed(KeyRepeat::No))
}
