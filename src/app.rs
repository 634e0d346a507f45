use cereal_storage::Cereal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Get,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Add => "Add",
            Action::Get => "Get",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Browse,
    Amount { action: Action, buffer: String },
}

#[derive(Debug, Default)]
pub struct App {
    pub selected_cereal: usize,
    pub input: InputMode,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Cereal {
        Cereal::ALL[self.selected_cereal.min(Cereal::ALL.len() - 1)]
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = Cereal::ALL.len() as isize;
        self.selected_cereal = (self.selected_cereal as isize + delta).rem_euclid(len) as usize;
    }

    pub fn begin_amount(&mut self, action: Action) {
        self.input = InputMode::Amount {
            action,
            buffer: String::new(),
        };
    }

    pub fn cancel_input(&mut self) {
        self.input = InputMode::Browse;
    }

    /// Accepts digits and a single decimal point.
    pub fn push_char(&mut self, ch: char) {
        if let InputMode::Amount { buffer, .. } = &mut self.input {
            if ch.is_ascii_digit() || (ch == '.' && !buffer.contains('.')) {
                buffer.push(ch);
            }
        }
    }

    pub fn pop_char(&mut self) {
        if let InputMode::Amount { buffer, .. } = &mut self.input {
            buffer.pop();
        }
    }

    /// Leaves amount entry and hands back what was typed, if it parses.
    pub fn take_amount(&mut self) -> Option<(Action, f32)> {
        match std::mem::take(&mut self.input) {
            InputMode::Amount { action, buffer } => {
                buffer.parse().ok().map(|amount| (action, amount))
            }
            InputMode::Browse => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_ways() {
        let mut app = App::new();
        app.move_selection(-1);
        assert_eq!(app.selected(), Cereal::Bulgur);
        app.move_selection(1);
        assert_eq!(app.selected(), Cereal::Buckwheat);
    }

    #[test]
    fn amount_entry_accepts_one_decimal_point() {
        let mut app = App::new();
        app.begin_amount(Action::Get);
        for ch in "2.5.x0".chars() {
            app.push_char(ch);
        }
        assert_eq!(app.take_amount(), Some((Action::Get, 2.50)));
        assert_eq!(app.input, InputMode::Browse);
    }

    #[test]
    fn empty_amount_is_discarded() {
        let mut app = App::new();
        app.begin_amount(Action::Add);
        app.push_char('4');
        app.pop_char();
        assert_eq!(app.take_amount(), None);
    }
}
