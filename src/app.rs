use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_textarea::TextArea;

use crate::http::HttpResult;
use crate::models::{HttpMethod, RequestDraft, RequestState};
use crate::utils;

const HEADERS_PLACEHOLDER: &str = "Content-Type: application/json";
const BODY_PLACEHOLDER: &str = "{\"key\": \"value\"}";

/// The currently focused control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    Method,
    #[default]
    Url,
    Headers,
    Body,
    Send,
    Response,
}

impl Field {
    /// Move to the next field (wrapping around)
    pub fn next(self) -> Self {
        match self {
            Field::Method => Field::Url,
            Field::Url => Field::Headers,
            Field::Headers => Field::Body,
            Field::Body => Field::Send,
            Field::Send => Field::Response,
            Field::Response => Field::Method,
        }
    }

    /// Move to the previous field (wrapping around)
    pub fn prev(self) -> Self {
        match self {
            Field::Method => Field::Response,
            Field::Url => Field::Method,
            Field::Headers => Field::Url,
            Field::Body => Field::Headers,
            Field::Send => Field::Body,
            Field::Response => Field::Send,
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, Field::Url | Field::Headers | Field::Body)
    }
}

/// Main application state
pub struct App {
    pub focused: Field,
    /// Keys go to the focused text field instead of navigation
    pub editing: bool,
    pub method: HttpMethod,
    pub url: Input,
    pub headers: TextArea<'static>,
    pub body: TextArea<'static>,
    pub state: RequestState,
    pub response_scroll: usize,
    /// Rows the response takes up on screen after wrapping, as last drawn
    pub response_rows: usize,
    pub should_quit: bool,
    pub show_help: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            focused: Field::default(),
            editing: false,
            method: HttpMethod::default(),
            url: Input::default(),
            headers: utils::text_editor("", HEADERS_PLACEHOLDER),
            body: utils::text_editor("", BODY_PLACEHOLDER),
            state: RequestState::Idle,
            response_scroll: 0,
            response_rows: 0,
            should_quit: false,
            show_help: false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.is_in_flight()
    }

    pub fn set_url(&mut self, url: &str) {
        self.url = Input::new(url.to_string());
    }

    pub fn set_method(&mut self, method: HttpMethod) {
        self.method = method;
    }

    pub fn cycle_method(&mut self) {
        self.set_method(self.method.next());
    }

    pub fn set_headers(&mut self, raw_headers: &str) {
        self.headers = utils::text_editor(raw_headers, HEADERS_PLACEHOLDER);
    }

    pub fn set_body(&mut self, body: &str) {
        self.body = utils::text_editor(body, BODY_PLACEHOLDER);
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing && self.focused.is_text();
        utils::show_cursor(&mut self.headers, self.editing && self.focused == Field::Headers);
        utils::show_cursor(&mut self.body, self.editing && self.focused == Field::Body);
    }

    /// Snapshot of the form as it currently reads
    pub fn draft(&self) -> RequestDraft {
        RequestDraft::new(self.method, self.url.value())
            .with_headers(utils::textarea_text(&self.headers))
            .with_body(utils::textarea_text(&self.body))
    }

    /// Start a send. Returns the draft to dispatch, or `None` when nothing
    /// should go out: a send is already in flight or validation failed.
    pub fn begin_send(&mut self) -> Option<RequestDraft> {
        if self.is_in_flight() {
            return None;
        }

        let draft = self.draft();
        if let Err(err) = draft.validate() {
            tracing::debug!(error = %err, "send rejected");
            self.state = RequestState::Error(err.to_string());
            return None;
        }

        self.state = RequestState::Loading;
        self.response_scroll = 0;
        self.response_rows = 0;
        Some(draft)
    }

    pub fn finish_send(&mut self, result: HttpResult) {
        self.state = match result {
            Ok(response) => RequestState::Success(response),
            Err(err) => RequestState::Error(err.to_string()),
        };
        self.response_scroll = 0;
        self.response_rows = 0;
    }

    /// Record the wrapped height of the response so scrolling can reach its last row
    pub fn set_response_rows(&mut self, rows: usize) {
        self.response_rows = rows;
        self.response_scroll = self.response_scroll.min(rows.saturating_sub(1));
    }

    pub fn scroll_response(&mut self, delta: isize) {
        utils::scroll_by(&mut self.response_scroll, delta, self.response_rows);
    }

    /// Handle one key press. Returns a draft when the key triggered a send.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<RequestDraft> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.quit();
                return None;
            }
            KeyCode::Char('s') if ctrl => return self.begin_send(),
            _ => {}
        }

        if self.editing {
            return self.handle_edit_key(key);
        }

        let in_response = self.focused == Field::Response;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('?') => self.toggle_help(),

            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),

            KeyCode::Char('j') | KeyCode::Down if in_response => self.scroll_response(1),
            KeyCode::Char('k') | KeyCode::Up if in_response => self.scroll_response(-1),
            KeyCode::PageDown if in_response => self.scroll_response(10),
            KeyCode::PageUp if in_response => self.scroll_response(-10),
            KeyCode::Char('j') | KeyCode::Down => self.focus_next(),
            KeyCode::Char('k') | KeyCode::Up => self.focus_prev(),

            KeyCode::Char('m') => self.cycle_method(),
            KeyCode::Enter | KeyCode::Char('i') | KeyCode::Char(' ') => return self.activate(),

            _ => {}
        }

        None
    }

    fn activate(&mut self) -> Option<RequestDraft> {
        match self.focused {
            Field::Method => self.cycle_method(),
            Field::Url | Field::Headers | Field::Body => self.set_editing(true),
            Field::Send => return self.begin_send(),
            Field::Response => {}
        }
        None
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<RequestDraft> {
        match (key.code, self.focused) {
            (KeyCode::Esc, _) => self.set_editing(false),
            // Enter in the URL bar submits, as in a browser
            (KeyCode::Enter, Field::Url) => {
                self.set_editing(false);
                return self.begin_send();
            }
            (_, Field::Url) => {
                self.url.handle_event(&Event::Key(key));
            }
            (_, Field::Headers) => {
                self.headers.input(key);
            }
            (_, Field::Body) => {
                self.body.input(key);
            }
            _ => self.set_editing(false),
        }
        None
    }
}
