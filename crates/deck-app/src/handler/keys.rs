//! Key event handlers

use deck_core::{Direction, NavigationIntent};

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::ViewerState;

/// Map a key to a message. Returns `None` for keys the viewer does not
/// consume, letting the shell keep its default behaviour.
pub fn handle_key(state: &ViewerState, key: InputKey) -> Option<Message> {
    // A notice captures dismissal keys first
    if state.notice.is_some() {
        match key {
            InputKey::Esc | InputKey::Enter | InputKey::Char(' ') => {
                return Some(Message::DismissNotice)
            }
            InputKey::Char('q') | InputKey::CharCtrl('c') => return Some(Message::Quit),
            _ => return None,
        }
    }

    match key {
        InputKey::Right => Some(Message::Navigate(NavigationIntent::next(Direction::Right))),
        InputKey::Down | InputKey::Char(' ') => {
            Some(Message::Navigate(NavigationIntent::next(Direction::Down)))
        }
        InputKey::Left => Some(Message::Navigate(NavigationIntent::prev(Direction::Left))),
        InputKey::Up => Some(Message::Navigate(NavigationIntent::prev(Direction::Up))),

        InputKey::Enter => Some(Message::IndicatorTap),

        InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char('r') if state.load.failure().is_some() => Some(Message::RetryLoad),
        InputKey::Char('d') => Some(Message::DonatePressed),
        InputKey::Char('f') => Some(Message::FormPressed),
        InputKey::Char('o') if state.current_insertion().is_some() => Some(Message::OpenInsertion),

        _ => None,
    }
}
