//! Window key events to binding names
//!
//! Named keys keep their winit names ("ArrowLeft", "Escape", "Enter",
//! "Space", ...); character keys become lower-case strings so that "B" and
//! "b" trigger the same binding.

use winit::keyboard::{Key, NamedKey};

pub fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => {
            let lower = text.to_lowercase();
            (!lower.trim().is_empty()).then_some(lower)
        }
        Key::Named(named) => named_key(*named).map(str::to_string),
        _ => None,
    }
}

fn named_key(named: NamedKey) -> Option<&'static str> {
    let name = match named {
        NamedKey::ArrowLeft => "ArrowLeft",
        NamedKey::ArrowRight => "ArrowRight",
        NamedKey::ArrowUp => "ArrowUp",
        NamedKey::ArrowDown => "ArrowDown",
        NamedKey::Escape => "Escape",
        NamedKey::Enter => "Enter",
        NamedKey::Space => "Space",
        NamedKey::Backspace => "Backspace",
        NamedKey::Tab => "Tab",
        NamedKey::Shift => "Shift",
        NamedKey::Control => "Control",
        NamedKey::Alt => "Alt",
        NamedKey::Home => "Home",
        NamedKey::End => "End",
        NamedKey::PageUp => "PageUp",
        NamedKey::PageDown => "PageDown",
        NamedKey::Insert => "Insert",
        NamedKey::Delete => "Delete",
        NamedKey::F1 => "F1",
        NamedKey::F2 => "F2",
        NamedKey::F3 => "F3",
        NamedKey::F4 => "F4",
        NamedKey::F5 => "F5",
        NamedKey::F6 => "F6",
        NamedKey::F7 => "F7",
        NamedKey::F8 => "F8",
        NamedKey::F9 => "F9",
        NamedKey::F10 => "F10",
        NamedKey::F11 => "F11",
        NamedKey::F12 => "F12",
        _ => return None,
    };
    Some(name)
}
