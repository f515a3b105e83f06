use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, Field};
use crate::models::{HttpMethod, RequestState, Response, StatusClass};

pub mod theme {
    use ratatui::style::Color;

    pub const BG: Color = Color::Rgb(26, 26, 46);
    pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 40, 60);
    pub const BORDER: Color = Color::Rgb(58, 58, 74);
    pub const BORDER_FOCUSED: Color = Color::Rgb(115, 210, 22);
    pub const BORDER_EDITING: Color = Color::Rgb(252, 186, 3);
    pub const TEXT: Color = Color::Rgb(224, 224, 224);
    pub const TEXT_DIM: Color = Color::Rgb(128, 128, 140);
    pub const ACCENT: Color = Color::Rgb(115, 210, 22);
    pub const ERROR: Color = Color::Rgb(252, 78, 78);
    pub const METHOD_GET: Color = Color::Rgb(115, 210, 22);
    pub const METHOD_POST: Color = Color::Rgb(252, 186, 3);
    pub const STATUS_INFO: Color = Color::Rgb(128, 128, 140);
    pub const STATUS_SUCCESS: Color = Color::Rgb(115, 210, 22);
    pub const STATUS_REDIRECT: Color = Color::Rgb(88, 166, 255);
    pub const STATUS_CLIENT_ERROR: Color = Color::Rgb(252, 186, 3);
    pub const STATUS_SERVER_ERROR: Color = Color::Rgb(252, 78, 78);
}

/// Screen regions: request form, response panel, status bar
struct Areas {
    request: Rect,
    response: Rect,
    status: Rect,
}

fn areas(area: Rect) -> Areas {
    // Vertical layout: main content + status bar
    let outer_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    // Main layout: request form | response
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(outer_layout[0]);

    Areas {
        request: main_layout[0],
        response: main_layout[1],
        status: outer_layout[1],
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let areas = areas(area);

    render_request_editor(frame, app, areas.request);
    render_response(frame, app, areas.response);
    render_status_bar(frame, app, areas.status);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

/// Rows the response occupies once wrapped to the response panel of a screen this size
pub fn response_row_count(app: &App, screen: Rect) -> usize {
    let Some(response) = app.state.response() else {
        return 0;
    };
    let inner = Block::default()
        .borders(Borders::ALL)
        .inner(areas(screen).response);
    response_paragraph(response).line_count(inner.width)
}

fn border_color(app: &App, field: Field) -> Color {
    if app.focused != field {
        theme::BORDER
    } else if app.editing {
        theme::BORDER_EDITING
    } else {
        theme::BORDER_FOCUSED
    }
}

fn panel(title: &str, app: &App, field: Field) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(app, field)))
        .style(Style::default().bg(theme::BG))
}

fn method_color(method: HttpMethod) -> Color {
    match method {
        HttpMethod::Get => theme::METHOD_GET,
        HttpMethod::Post => theme::METHOD_POST,
    }
}

fn status_color(response: &Response) -> Color {
    match response.status_class() {
        StatusClass::Success => theme::STATUS_SUCCESS,
        StatusClass::Redirect => theme::STATUS_REDIRECT,
        StatusClass::ClientError => theme::STATUS_CLIENT_ERROR,
        StatusClass::ServerError => theme::STATUS_SERVER_ERROR,
        StatusClass::Informational | StatusClass::Unknown => theme::STATUS_INFO,
    }
}

/// Render the request form: method + URL, headers, body, send button
fn render_request_editor(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Method + URL
            Constraint::Percentage(40), // Headers
            Constraint::Min(3),         // Body
            Constraint::Length(3),      // Send
        ])
        .split(area);

    let url_bar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(rows[0]);

    render_method(frame, app, url_bar[0]);
    render_url(frame, app, url_bar[1]);

    let body_title = if app.method.allows_body() {
        "Body (JSON)"
    } else {
        "Body (ignored for GET)"
    };
    render_textarea(frame, app, Field::Headers, "Headers", rows[1]);
    render_textarea(frame, app, Field::Body, body_title, rows[2]);
    render_send_button(frame, app, rows[3]);
}

fn render_method(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel("Method", app, Field::Method);
    let method = Paragraph::new(Span::styled(
        app.method.as_str(),
        Style::default()
            .fg(method_color(app.method))
            .add_modifier(Modifier::BOLD),
    ))
    .centered()
    .block(block);

    frame.render_widget(method, area);
}

fn render_url(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel("URL", app, Field::Url);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.max(1) as usize;
    let scroll = app.url.visual_scroll(width);

    let content = if app.url.value().is_empty() && !(app.editing && app.focused == Field::Url) {
        Paragraph::new(Span::styled(
            "https://httpbin.org/get",
            Style::default().fg(theme::TEXT_DIM),
        ))
    } else {
        Paragraph::new(Span::styled(app.url.value(), Style::default().fg(theme::TEXT)))
            .scroll((0, scroll as u16))
    };
    frame.render_widget(content.style(Style::default().bg(theme::BG)), inner);

    if app.editing && app.focused == Field::Url {
        let cursor = app.url.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position((inner.x + cursor, inner.y));
    }
}

fn render_textarea(frame: &mut Frame, app: &App, field: Field, title: &str, area: Rect) {
    let block = panel(title, app, field);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let textarea = match field {
        Field::Headers => &app.headers,
        _ => &app.body,
    };
    frame.render_widget(textarea, inner);
}

fn render_send_button(frame: &mut Frame, app: &App, area: Rect) {
    let (label, style) = if app.is_in_flight() {
        ("Sending...", Style::default().fg(theme::TEXT_DIM))
    } else if app.focused == Field::Send {
        (
            "Send Request",
            Style::default()
                .fg(theme::BG)
                .bg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("Send Request", Style::default().fg(theme::ACCENT))
    };

    let button = Paragraph::new(Span::styled(format!(" {} ", label), style))
        .centered()
        .block(panel("", app, Field::Send));

    frame.render_widget(button, area);
}

/// Render the response panel
fn render_response(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel("Response", app, Field::Response);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = match &app.state {
        RequestState::Idle => placeholder("Not sent", "Press Ctrl+S to send request"),
        RequestState::Loading => placeholder("Sending...", "Waiting for the server"),
        RequestState::Error(message) => Paragraph::new(Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(theme::ERROR).add_modifier(Modifier::BOLD),
            )),
        ]))
        .centered(),
        RequestState::Success(response) => response_paragraph(response)
            .scroll((app.response_scroll.min(u16::MAX as usize) as u16, 0)),
    };

    frame.render_widget(content.style(Style::default().bg(theme::BG)), inner);
}

fn placeholder<'a>(title: &'a str, hint: &'a str) -> Paragraph<'a> {
    Paragraph::new(Text::from(vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(theme::TEXT_DIM))),
    ]))
    .centered()
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn response_paragraph(response: &Response) -> Paragraph<'_> {
    Paragraph::new(Text::from(response_lines(response))).wrap(Wrap { trim: false })
}

/// Status line, headers and body
fn response_lines(response: &Response) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} {} ", response.status, response.status_text),
                Style::default()
                    .fg(theme::BG)
                    .bg(status_color(response))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", response.elapsed_display()),
                Style::default().fg(theme::TEXT),
            ),
            Span::styled(
                format!("  {}", response.size_display()),
                Style::default().fg(theme::TEXT_DIM),
            ),
        ]),
        Line::from(""),
        section("Headers"),
    ];

    lines.extend(response.headers.iter().map(|(name, value)| {
        Line::from(vec![
            Span::styled(format!("{}: ", name), Style::default().fg(theme::TEXT_DIM)),
            Span::styled(value.as_str(), Style::default().fg(theme::TEXT)),
        ])
    }));

    lines.push(Line::from(""));
    lines.push(section("Body"));
    lines.extend(
        response
            .body
            .as_str()
            .lines()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(theme::TEXT)))),
    );

    lines
}

/// Render the status bar with keybinds
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = if app.editing {
        &[("Esc", "Stop editing"), ("Ctrl+S", "Send")]
    } else {
        &[
            ("q", "Quit"),
            ("?", "Help"),
            ("Tab", "Next field"),
            ("Enter", "Edit / Activate"),
            ("Ctrl+S", "Send"),
        ]
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!(" {} ", key), Style::default().fg(theme::BG).bg(theme::TEXT_DIM)),
                Span::styled(format!(" {} ", label), Style::default().fg(theme::TEXT_DIM)),
            ]
        })
        .collect();

    let status_bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG));

    frame.render_widget(status_bar, area);
}

/// Render the help overlay with keybinds
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_width = 50;
    let help_height = 17;
    let help_area = Rect {
        x: area.width.saturating_sub(help_width) / 2,
        y: area.height.saturating_sub(help_height) / 2,
        width: help_width.min(area.width),
        height: help_height.min(area.height),
    };

    frame.render_widget(Clear, help_area);

    let bindings = [
        ("Tab / Shift+Tab  ", "Next / previous field"),
        ("Enter / i        ", "Edit field, toggle method"),
        ("Esc              ", "Stop editing"),
        ("Ctrl+S           ", "Send request"),
        ("m                ", "Toggle GET / POST"),
        ("j / k            ", "Scroll response"),
        ("?                ", "Toggle this help"),
        ("q / Ctrl+C       ", "Quit"),
    ];

    let mut help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    help_text.extend(bindings.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(*key, Style::default().fg(theme::ACCENT)),
            Span::styled(*action, Style::default().fg(theme::TEXT)),
        ])
    }));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme::TEXT_DIM),
    )));

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::BG_HIGHLIGHT)),
        )
        .centered();

    frame.render_widget(help, help_area);
}
