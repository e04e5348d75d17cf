use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use wc_finals::choropleth::MAP_TITLE;
use wc_finals::config::DashboardConfig;
use wc_finals::dashboard::{DASHBOARD_TITLE, Dashboard, RegionUpdate, SelectionEvent};
use wc_finals::finals_fetch::load_finals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Country,
    Year,
}

struct App {
    dashboard: Dashboard,
    countries: Vec<String>,
    years: Vec<String>,
    focus: Focus,
    country_idx: usize,
    year_idx: usize,
    map: Vec<(String, u64)>,
    total_wins: String,
    yearly_result: String,
    status: Option<String>,
    help_overlay: bool,
    should_quit: bool,
}

impl App {
    fn new(dashboard: Dashboard) -> anyhow::Result<Self> {
        let data = dashboard.data();
        let countries: Vec<String> = data.wins().countries().map(str::to_string).collect();
        let years: Vec<String> = data.dataset().years().map(str::to_string).collect();
        let selection = dashboard.selection();
        let country_idx = countries
            .iter()
            .position(|c| *c == selection.country)
            .unwrap_or(0);
        let year_idx = years.iter().position(|y| *y == selection.year).unwrap_or(0);
        let initial = dashboard.initial_render().context("initial render failed")?;

        let mut app = Self {
            dashboard,
            countries,
            years,
            focus: Focus::Country,
            country_idx,
            year_idx,
            map: Vec::new(),
            total_wins: String::new(),
            yearly_result: String::new(),
            status: None,
            help_overlay: false,
            should_quit: false,
        };
        app.apply_updates(initial);
        Ok(app)
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Country => Focus::Year,
                    Focus::Year => Focus::Country,
                };
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('?') => self.help_overlay = !self.help_overlay,
            _ => {}
        }
    }

    fn move_selection(&mut self, step: isize) {
        let (idx, options) = match self.focus {
            Focus::Country => (&mut self.country_idx, &self.countries),
            Focus::Year => (&mut self.year_idx, &self.years),
        };
        let next = idx.saturating_add_signed(step).min(options.len().saturating_sub(1));
        if next == *idx {
            return;
        }
        *idx = next;
        let value = options[next].clone();
        let event = match self.focus {
            Focus::Country => SelectionEvent::Country(value),
            Focus::Year => SelectionEvent::Year(value),
        };
        match self.dashboard.dispatch(event) {
            Ok(updates) => {
                self.status = None;
                self.apply_updates(updates);
            }
            Err(err) => self.status = Some(format!("[ERROR] {err}")),
        }
    }

    fn apply_updates(&mut self, updates: Vec<RegionUpdate>) {
        for update in updates {
            match update {
                RegionUpdate::WorldMap(figure) => {
                    self.map = figure
                        .values()
                        .map(|(country, wins)| (country.to_string(), wins as u64))
                        .collect();
                }
                RegionUpdate::TotalWins(text) => self.total_wins = text,
                RegionUpdate::YearlyResult(text) => self.yearly_result = text,
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env()?;
    let data = load_finals(&config).context("failed to load finals")?;
    let mut app = App::new(Dashboard::new(Arc::new(data)))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    exit_status(res)
}

/// Surfaces a loop failure once the terminal is restored, so the process exits non-zero.
fn exit_status(res: io::Result<()>) -> anyhow::Result<()> {
    res.context("terminal loop failed")
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(DASHBOARD_TITLE)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_wins_chart(frame, body[0], app);
    render_selectors(frame, body[1], app);

    let footer_text = app
        .status
        .clone()
        .unwrap_or_else(|| "Tab Switch selector | j/k/↑/↓ Move | ? Help | q Quit".to_string());
    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn render_wins_chart(frame: &mut Frame, area: Rect, app: &App) {
    let selected = app.dashboard.selection().country.as_str();
    let bars: Vec<Bar> = app
        .map
        .iter()
        .map(|(country, wins)| {
            let style = if country == selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Magenta)
            };
            Bar::default()
                .value(*wins)
                .label(Line::from(country.clone()))
                .text_value(wins.to_string())
                .style(style)
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().title(MAP_TITLE).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0);
    frame.render_widget(chart, area);
}

fn render_selectors(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Length(3),
        ])
        .split(area);

    render_selector(
        frame,
        rows[0],
        "Select a Country",
        &app.countries,
        app.country_idx,
        app.focus == Focus::Country,
    );
    render_result(frame, rows[1], &app.total_wins);
    render_selector(
        frame,
        rows[2],
        "Select a Year",
        &app.years,
        app.year_idx,
        app.focus == Focus::Year,
    );
    render_result(frame, rows[3], &app.yearly_result);
}

fn render_selector(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    options: &[String],
    selected: usize,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (start, end) = visible_range(selected, options.len(), inner.height as usize);
    let lines: Vec<Line> = (start..end)
        .map(|idx| {
            if idx == selected {
                Line::styled(
                    format!("> {}", options[idx]),
                    Style::default().fg(Color::White).bg(Color::DarkGray),
                )
            } else {
                Line::raw(format!("  {}", options[idx]))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_result(frame: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 40, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "World Cup Finals - Help",
        "",
        "  Tab          Switch country/year selector",
        "  j/k or ↑/↓   Move selection",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text).block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
