use ratatui::widgets::TableState;
use taskpad_core::{FileStore, Filter, Notice, TaskEngine};
use uuid::Uuid;

pub enum InputMode {
    Normal,
    Adding,
}

pub struct App {
    pub engine: TaskEngine<FileStore>,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub notice: Option<String>,
}

impl App {
    pub fn new(engine: TaskEngine<FileStore>) -> App {
        let mut state = TableState::default();
        if !engine.filtered_tasks().is_empty() {
            state.select(Some(0));
        }
        App {
            engine,
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            notice: None,
        }
    }

    fn visible_len(&self) -> usize {
        self.engine.filtered_tasks().len()
    }

    fn selected_id(&self) -> Option<Uuid> {
        let i = self.state.selected()?;
        self.engine.filtered_tasks().get(i).map(|t| t.id)
    }

    pub fn next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            if let Some(notice) = self.engine.toggle_task(id) {
                self.notice = Some(notice_text(notice).to_string());
            }
            // Under the active/completed filters the row may have left the view
            self.clamp_selection();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            if let Some(notice) = self.engine.delete_task(id) {
                self.notice = Some(notice_text(notice).to_string());
            }
            self.clamp_selection();
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.engine.set_filter(filter);
        if self.visible_len() == 0 {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn cycle_filter(&mut self) {
        let next = match self.engine.filter() {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        };
        self.set_filter(next);
    }

    pub fn toggle_theme(&mut self) {
        let on = self.engine.toggle_dark_mode();
        self.notice = Some(if on { "Dark mode on" } else { "Dark mode off" }.to_string());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self
            .input
            .chars()
            .take(self.cursor_position)
            .map(|c| c.len_utf8())
            .sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self
                .input
                .chars()
                .take(self.cursor_position - 1)
                .map(|c| c.len_utf8())
                .sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_input(&mut self) {
        match self.engine.add_task(&self.input) {
            Ok(notice) => {
                self.notice = Some(notice_text(notice).to_string());
                self.state.select(Some(0));
                self.clamp_selection();
            }
            Err(e) => {
                self.notice = Some(e.to_string());
            }
        }
        self.input.clear();
        self.cursor_position = 0;
        self.input_mode = InputMode::Normal;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.state.select(None);
        } else {
            match self.state.selected() {
                Some(i) if i >= len => self.state.select(Some(len - 1)),
                None => self.state.select(Some(0)),
                _ => {}
            }
        }
    }
}

fn notice_text(notice: Notice) -> &'static str {
    match notice {
        Notice::TaskAdded => "Task added",
        Notice::TaskCompleted => "Task completed!",
        Notice::TaskDeleted => "Task deleted",
    }
}
