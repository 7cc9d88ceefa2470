use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Symbol produced by Shift on a US layout
fn shifted(c: char) -> Option<char> {
    let (base, shift) = ("`1234567890-=[]\\;',./", "~!@#$%^&*()_+{}|:\"<>?");
    base.chars().position(|b| b == c).and_then(|i| shift.chars().nth(i))
}

/// Fold kitty-protocol key reports (`Char('h') + SHIFT`, `Char('/') + SHIFT`)
/// into the form legacy terminals send (`Char('H')`, `Char('?')`), so the
/// handlers only match one spelling.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(s) = shifted(c) {
            key.code = KeyCode::Char(s);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}

#[cfg(test)]
pub(super) mod test_keys {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::tui::app::App;

    pub fn press(app: &mut App, code: KeyCode) {
        super::super::handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
        app.sync();
    }

    pub fn press_mod(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        super::super::handle_key(app, KeyEvent::new(code, modifiers));
        app.sync();
    }

    pub fn ch(app: &mut App, c: char) {
        press(app, KeyCode::Char(c));
    }

    pub fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            ch(app, c);
        }
    }
}
