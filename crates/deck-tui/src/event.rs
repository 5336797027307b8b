//! Terminal event polling

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use deck_app::config::InputSettings;
use deck_app::gesture::{PointerEvent, PointerPhase};
use deck_app::message::Message;
use deck_app::InputKey;
use deck_core::prelude::*;

use crate::layout::{Hit, ScreenAreas};

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        _ => None, // Unsupported keys ignored
    }
}

/// Convert a mouse event to a viewer message.
///
/// Presses on the floating controls are taps. Anywhere else a left press
/// starts a swipe, measured in approximate pixel units so the swipe
/// threshold means the same as on a touch screen.
pub fn mouse_event_to_message(
    mouse: MouseEvent,
    areas: &ScreenAreas,
    input: &InputSettings,
) -> Option<Message> {
    let x = mouse.column as f32 * input.cell_width;
    let y = mouse.row as f32 * input.cell_height;

    match mouse.kind {
        MouseEventKind::ScrollDown => Some(Message::Wheel { delta_y: 1.0 }),
        MouseEventKind::ScrollUp => Some(Message::Wheel { delta_y: -1.0 }),
        MouseEventKind::Down(MouseButton::Left) => match areas.hit(mouse.column, mouse.row) {
            Some(Hit::Indicator) => Some(Message::IndicatorTap),
            Some(Hit::Donate) => Some(Message::DonatePressed),
            Some(Hit::Form) => Some(Message::FormPressed),
            None => Some(Message::Pointer(PointerEvent::new(PointerPhase::Start, x, y))),
        },
        MouseEventKind::Drag(MouseButton::Left) => {
            Some(Message::Pointer(PointerEvent::new(PointerPhase::Move, x, y)))
        }
        MouseEventKind::Up(MouseButton::Left) => {
            Some(Message::Pointer(PointerEvent::new(PointerPhase::End, x, y)))
        }
        _ => None,
    }
}

/// Viewport size for a terminal of `columns` x `rows` cells
pub fn resize_message(columns: u16, rows: u16) -> Message {
    Message::Resize {
        width: columns as f32,
        height: rows as f32,
    }
}

/// Convert any terminal event to a viewer message
pub fn event_to_message(
    event: Event,
    areas: &ScreenAreas,
    input: &InputSettings,
) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == event::KeyEventKind::Press => {
            key_event_to_input(key).map(Message::Key)
        }
        Event::Mouse(mouse) => mouse_event_to_message(mouse, areas, input),
        Event::Resize(columns, rows) => Some(resize_message(columns, rows)),
        _ => None,
    }
}

/// Poll for terminal events with timeout
pub fn poll(areas: &ScreenAreas, input: &InputSettings) -> Result<Option<Message>> {
    // Poll with 50ms timeout (20 FPS)
    if event::poll(Duration::from_millis(50))? {
        let event = event::read()?;
        Ok(event_to_message(event, areas, input))
    } else {
        Ok(None)
    }
}
