use card_journal::calendar::{assign_entries, DayCell, MonthCursor};
use card_journal::card::Card;
use card_journal::inspiration;
use card_journal::journal_entry::{EntryId, JournalEntry};
use card_journal::JournalError;
use card_journal::search::{search, Highlighted, SearchState};
use chrono::{Datelike, Duration, Local, NaiveDate};
use color_eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{stdout, Stdout};
use unicode_width::UnicodeWidthChar;

pub enum Action {
    Write,
    Calendar,
    Search,
    Recap,
    Quit,
}

/// Mutations requested from the calendar view, applied by the caller.
pub enum CalendarAction {
    ToggleFavorite(EntryId),
    Delete(EntryId),
}

pub struct UI {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    motivation: &'static str,
    notice: Option<String>,
    month: MonthCursor,
    selected_day: NaiveDate,
    entry_index: usize,
}

impl UI {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let today = Local::now().date_naive();

        Ok(UI {
            terminal,
            motivation: inspiration::random_motivation(),
            notice: None,
            month: MonthCursor::containing(today),
            selected_day: today,
            entry_index: 0,
        })
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn set_motivation(&mut self, motivation: &'static str) {
        self.motivation = motivation;
    }

    pub fn display(&mut self, entries: &[JournalEntry]) -> Result<()> {
        let motivation = self.motivation;
        let notice = self.notice.take();

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Length(1),
                        Constraint::Min(0),
                        Constraint::Length(1),
                        Constraint::Length(3),
                    ]
                    .as_ref(),
                )
                .split(f.area());

            render_title(f, chunks[0], "Card Journal");

            let motivation_line = Paragraph::new(motivation)
                .style(Style::default().fg(Color::Magenta))
                .alignment(Alignment::Center);
            f.render_widget(motivation_line, chunks[1]);

            let width = chunks[2].width.saturating_sub(4) as usize;
            let items: Vec<ListItem> = entries.iter().map(|e| entry_item(e, width)).collect();
            let entries_list =
                List::new(items).block(Block::default().borders(Borders::ALL).title("Entries"));
            f.render_widget(entries_list, chunks[2]);

            render_notice(f, chunks[3], notice.as_deref());

            let controls = if entries.is_empty() {
                key_hints(&[("w", "write"), ("q", "quit")])
            } else {
                key_hints(&[
                    ("w", "write"),
                    ("c", "calendar"),
                    ("s", "search"),
                    ("r", "recap"),
                    ("q", "quit"),
                ])
            };
            let controls_paragraph = Paragraph::new(controls)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            f.render_widget(controls_paragraph, chunks[4]);
        })?;

        Ok(())
    }

    pub fn handle_input(&self, entries: &[JournalEntry]) -> Result<Option<Action>> {
        let Some(key) = read_key()? else {
            return Ok(None);
        };
        match key.code {
            KeyCode::Char('w') => Ok(Some(Action::Write)),
            KeyCode::Char('q') => Ok(Some(Action::Quit)),
            KeyCode::Char('c') if !entries.is_empty() => Ok(Some(Action::Calendar)),
            KeyCode::Char('s') if !entries.is_empty() => Ok(Some(Action::Search)),
            KeyCode::Char('r') if !entries.is_empty() => Ok(Some(Action::Recap)),
            _ => Ok(None),
        }
    }

    /// Runs the writing screen for `card`. Returns `true` when the user asks
    /// to submit, `false` when they leave without submitting.
    pub fn write_card(&mut self, card: &mut Card) -> Result<bool> {
        loop {
            let notice = self.notice.clone();
            self.terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(3),
                            Constraint::Min(10),
                            Constraint::Length(1),
                            Constraint::Length(3),
                        ]
                        .as_ref(),
                    )
                    .split(f.area());

                render_title(f, chunks[0], "Today's Card");
                render_card(f, chunks[1], card);
                render_notice(f, chunks[2], notice.as_deref());

                let hints = if card.is_editing_prompt() {
                    key_hints(&[("Enter", "save prompt"), ("Ctrl+E", "save prompt")])
                } else if card.is_flipped() {
                    key_hints(&[("Ctrl+S", "submit"), ("Esc", "flip back")])
                } else {
                    key_hints(&[
                        ("Enter", "flip"),
                        ("Ctrl+N", "new prompt"),
                        ("Ctrl+E", "edit prompt"),
                        ("Esc", "back"),
                    ])
                };
                let instructions = Paragraph::new(hints)
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center);
                f.render_widget(instructions, chunks[3]);
            })?;

            let Some(key) = read_key()? else {
                continue;
            };
            self.notice = None;
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            if card.is_editing_prompt() {
                match key.code {
                    KeyCode::Enter | KeyCode::Esc => {
                        card.toggle_prompt_edit();
                    }
                    KeyCode::Char('e') if ctrl => {
                        card.toggle_prompt_edit();
                    }
                    KeyCode::Char(c) if !ctrl => card.type_char(c),
                    KeyCode::Backspace => card.backspace(),
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Char('s') if ctrl => return Ok(true),
                KeyCode::Char('n') if ctrl => {
                    card.replace_prompt(inspiration::random_prompt_except(&card.prompt).to_string());
                }
                KeyCode::Char('e') if ctrl => {
                    card.toggle_prompt_edit();
                }
                KeyCode::Esc if card.is_flipped() => card.click_back(false),
                KeyCode::Esc => return Ok(false),
                KeyCode::Enter | KeyCode::Char(' ') if !card.is_flipped() => card.click_front(),
                KeyCode::Enter => card.type_char('\n'),
                KeyCode::Char(c) if !ctrl => card.type_char(c),
                KeyCode::Backspace => card.backspace(),
                _ => {}
            }
        }
    }

    pub fn view_calendar(&mut self, entries: &[JournalEntry]) -> Result<Option<CalendarAction>> {
        loop {
            let mut cells = self.month.grid();
            assign_entries(&mut cells, entries);
            let month = self.month;
            let selected_day = self.selected_day;
            let notice = self.notice.clone();
            let day_entries = entries_on(&cells, selected_day).to_vec();
            let selected = pick_entry(&day_entries, self.entry_index).cloned();

            self.terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(3),
                            Constraint::Length(9),
                            Constraint::Min(4),
                            Constraint::Length(1),
                            Constraint::Length(3),
                        ]
                        .as_ref(),
                    )
                    .split(f.area());

                render_title(f, chunks[0], &month.label());

                let grid = Paragraph::new(calendar_lines(&cells, selected_day))
                    .block(Block::default().borders(Borders::ALL).title("Past Entries"))
                    .alignment(Alignment::Center);
                f.render_widget(grid, chunks[1]);

                let width = chunks[2].width.saturating_sub(2) as usize;
                let details = day_detail_lines(selected_day, &day_entries, selected.as_ref(), width);
                let details = Paragraph::new(details)
                    .block(Block::default().borders(Borders::ALL).title("Selected Day"));
                f.render_widget(details, chunks[2]);

                render_notice(f, chunks[3], notice.as_deref());

                let instructions = Paragraph::new(key_hints(&[
                    ("Arrows", "move"),
                    ("[ ]", "month"),
                    ("t", "today"),
                    ("Enter", "open"),
                    ("Tab", "next entry"),
                    ("f", "favorite"),
                    ("d", "delete"),
                    ("Esc", "back"),
                ]))
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
                f.render_widget(instructions, chunks[4]);
            })?;

            let Some(key) = read_key()? else {
                continue;
            };
            self.notice = None;
            match key.code {
                KeyCode::Left => self.move_selection(-1),
                KeyCode::Right => self.move_selection(1),
                KeyCode::Up => self.move_selection(-7),
                KeyCode::Down => self.move_selection(7),
                KeyCode::Char('[') | KeyCode::PageUp => self.page_month(self.month.prev()),
                KeyCode::Char(']') | KeyCode::PageDown => self.page_month(self.month.next()),
                KeyCode::Char('t') => {
                    let today = Local::now().date_naive();
                    self.month = MonthCursor::containing(today);
                    self.selected_day = today;
                    self.entry_index = 0;
                }
                KeyCode::Tab if day_entries.len() > 1 => {
                    self.entry_index = (self.entry_index + 1) % day_entries.len();
                }
                KeyCode::Enter => match &selected {
                    Some(entry) => self.view_card(Card::from_entry(entry))?,
                    None => self.set_notice(JournalError::NoSelection.notice()),
                },
                KeyCode::Char('f') => match selected {
                    Some(entry) => return Ok(Some(CalendarAction::ToggleFavorite(entry.id))),
                    None => self.set_notice(JournalError::NoSelection.notice()),
                },
                KeyCode::Char('d') => match selected {
                    Some(entry) => {
                        let question = format!(
                            "Delete the entry from {}? (y/n)",
                            entry.local_day().format("%B %-d, %Y")
                        );
                        if self.confirm(&question)? {
                            return Ok(Some(CalendarAction::Delete(entry.id)));
                        }
                    }
                    None => self.set_notice(JournalError::NoSelection.notice()),
                },
                KeyCode::Esc => return Ok(None),
                _ => {}
            }
        }
    }

    fn move_selection(&mut self, days: i64) {
        let next = self.selected_day + Duration::days(days);
        self.selected_day = next;
        self.month = MonthCursor::containing(next);
        self.entry_index = 0;
    }

    /// Switches month, keeping the day of month where the new month allows.
    fn page_month(&mut self, month: MonthCursor) {
        let day = self.selected_day.day().min(month.days());
        self.month = month;
        self.entry_index = 0;
        if let Some(date) = NaiveDate::from_ymd_opt(month.year(), month.month(), day) {
            self.selected_day = date;
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            self.terminal.draw(|f| {
                let area = centered(f.area(), 60, 5);
                let prompt = Paragraph::new(question)
                    .block(Block::default().borders(Borders::ALL).title("Confirm"))
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                f.render_widget(prompt, area);
            })?;

            if let Some(key) = read_key()? {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                    _ => {}
                }
            }
        }
    }

    /// Shows a past entry as a card: prompt on the front, response on the back.
    fn view_card(&mut self, mut card: Card) -> Result<()> {
        loop {
            self.terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(3),
                            Constraint::Min(10),
                            Constraint::Length(3),
                        ]
                        .as_ref(),
                    )
                    .split(f.area());

                let title = match card.date {
                    Some(date) => format!(
                        "Entry from {}",
                        date.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                    ),
                    None => "Entry".to_string(),
                };
                render_title(f, chunks[0], &title);
                render_card(f, chunks[1], &card);

                let instructions = Paragraph::new(key_hints(&[("Enter", "flip"), ("Esc", "back")]))
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center);
                f.render_widget(instructions, chunks[2]);
            })?;

            if let Some(key) = read_key()? {
                match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') if card.is_flipped() => {
                        card.click_back(false)
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => card.click_front(),
                    KeyCode::Esc => break,
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Search as you type. Esc clears the query, or leaves when it is empty.
    pub fn search_entries(&mut self, entries: &[JournalEntry]) -> Result<()> {
        let mut query = String::new();
        let mut selected_index = 0;

        loop {
            let state = search(&query, entries);
            let result_count = state.results().len();
            if selected_index >= result_count {
                selected_index = result_count.saturating_sub(1);
            }

            self.terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(3),
                            Constraint::Length(3),
                            Constraint::Min(6),
                            Constraint::Length(3),
                        ]
                        .as_ref(),
                    )
                    .split(f.area());

                render_title(f, chunks[0], "Search Entries");

                let search_input = Paragraph::new(format!("{query}|"))
                    .block(Block::default().borders(Borders::ALL).title("Search"));
                f.render_widget(search_input, chunks[1]);

                match &state {
                    SearchState::Inactive => {
                        let hint = Paragraph::new("Type to search your prompts and responses")
                            .style(Style::default().fg(Color::DarkGray))
                            .block(Block::default().borders(Borders::ALL).title("Results"))
                            .alignment(Alignment::Center);
                        f.render_widget(hint, chunks[2]);
                    }
                    SearchState::Active { results, .. } if results.is_empty() => {
                        let none = Paragraph::new(vec![
                            Line::from(Span::styled(
                                "No Results Found",
                                Style::default().add_modifier(Modifier::BOLD),
                            )),
                            Line::from(
                                "No entries match your search. Try different keywords or check your spelling.",
                            ),
                        ])
                        .block(Block::default().borders(Borders::ALL).title("Results"))
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true });
                        f.render_widget(none, chunks[2]);
                    }
                    SearchState::Active { results, .. } => {
                        let items: Vec<ListItem> = results
                            .iter()
                            .map(|r| {
                                ListItem::new(vec![
                                    Line::from(Span::styled(
                                        r.entry.local_day().format("%B %-d, %Y").to_string(),
                                        Style::default().fg(Color::Cyan),
                                    )),
                                    highlighted_line("Prompt: ", &r.prompt, "No prompt"),
                                    highlighted_line("Response: ", &r.response, "No response"),
                                ])
                            })
                            .collect();
                        let title = format!(
                            "Search Results ({}) - {}",
                            results.len(),
                            state.summary().unwrap_or_default()
                        );
                        let results_list = List::new(items)
                            .block(Block::default().borders(Borders::ALL).title(title))
                            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
                            .highlight_symbol("> ");
                        f.render_stateful_widget(
                            results_list,
                            chunks[2],
                            &mut ListState::default().with_selected(Some(selected_index)),
                        );
                    }
                }

                let instructions = Paragraph::new(key_hints(&[
                    ("Up/Down", "navigate"),
                    ("Enter", "open"),
                    ("Esc", "clear / back"),
                ]))
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
                f.render_widget(instructions, chunks[3]);
            })?;

            let Some(key) = read_key()? else {
                continue;
            };
            match key.code {
                KeyCode::Esc if query.is_empty() => break,
                KeyCode::Esc => {
                    query.clear();
                    selected_index = 0;
                }
                KeyCode::Up => selected_index = selected_index.saturating_sub(1),
                KeyCode::Down => {
                    if selected_index + 1 < result_count {
                        selected_index += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(result) = state.results().get(selected_index) {
                        self.view_card(Card::from_entry(&result.entry))?;
                    }
                }
                KeyCode::Char(c) => {
                    query.push(c);
                    selected_index = 0;
                }
                KeyCode::Backspace => {
                    query.pop();
                    selected_index = 0;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Revisits a random past entry; space shuffles to another one.
    pub fn recap(&mut self, entries: &[JournalEntry]) -> Result<()> {
        let Some(first) = inspiration::random_entry(entries) else {
            self.set_notice("No entries to recap yet");
            return Ok(());
        };
        let mut card = Card::from_entry(first);

        loop {
            self.terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(3),
                            Constraint::Min(10),
                            Constraint::Length(3),
                        ]
                        .as_ref(),
                    )
                    .split(f.area());

                render_title(f, chunks[0], "Recap");
                render_card(f, chunks[1], &card);

                let instructions = Paragraph::new(key_hints(&[
                    ("Space", "shuffle"),
                    ("Enter", "flip"),
                    ("Esc", "back"),
                ]))
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
                f.render_widget(instructions, chunks[2]);
            })?;

            if let Some(key) = read_key()? {
                match key.code {
                    KeyCode::Char(' ') => {
                        if let Some(entry) = inspiration::random_entry(entries) {
                            card = Card::from_entry(entry);
                        }
                    }
                    KeyCode::Enter if card.is_flipped() => card.click_back(false),
                    KeyCode::Enter => card.click_front(),
                    KeyCode::Esc => break,
                    _ => {}
                }
            }
        }

        Ok(())
    }
}

impl Drop for UI {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Next key press; releases and non-key events yield `None`.
fn read_key() -> Result<Option<KeyEvent>> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}

fn render_title(f: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn render_notice(f: &mut Frame, area: Rect, notice: Option<&str>) {
    if let Some(notice) = notice {
        let notice = Paragraph::new(notice.to_string())
            .style(Style::default().fg(Color::LightRed))
            .alignment(Alignment::Center);
        f.render_widget(notice, area);
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &Card) {
    let mut border = Style::default();
    if card.favorite {
        border = border.fg(Color::Magenta);
    }

    let widget = if card.is_flipped() {
        let mut lines = vec![
            Line::from(Span::styled(
                card.prompt.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
        ];
        let mut response = card.response.clone();
        if card.is_editable() && !card.is_editing_prompt() {
            response.push('|');
        }
        lines.extend(response.split('\n').map(|l| Line::from(l.to_string())));
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("Response"),
        )
    } else {
        let mut prompt = card.prompt.clone();
        if card.is_editing_prompt() {
            prompt.push('|');
        }
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                prompt,
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        if card.favorite {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "♥ favorite",
                Style::default().fg(Color::Magenta),
            )));
        }
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title("Prompt"),
            )
    };
    f.render_widget(widget.wrap(Wrap { trim: false }), area);
}

fn key_hints(keys: &[(&str, &str)]) -> Line<'static> {
    let mut spans = vec![Span::raw("Press ")];
    for (i, (key, what)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(", "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" to {what}")));
    }
    Line::from(spans)
}

fn entry_item(entry: &JournalEntry, width: usize) -> ListItem<'static> {
    let heart = if entry.favorite { " ♥" } else { "" };
    ListItem::new(vec![
        Line::from(Span::raw(truncate_to_width(
            &format!(
                "[{}] {}{heart}",
                entry.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                entry.prompt
            ),
            width,
        ))),
        Line::from(Span::styled(
            truncate_to_width(entry.response.lines().next().unwrap_or(""), width),
            Style::default().fg(Color::Gray),
        )),
    ])
}

/// Labelled search result field; `placeholder` stands in for empty text.
fn highlighted_line(label: &str, text: &Highlighted, placeholder: &str) -> Line<'static> {
    let mut spans = vec![Span::styled(
        label.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if text.fragments().iter().all(|f| f.text.is_empty()) {
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
        return Line::from(spans);
    }
    for fragment in text.fragments() {
        let style = if fragment.matched {
            Style::default().bg(Color::Yellow).fg(Color::Black)
        } else {
            Style::default()
        };
        spans.push(Span::styled(fragment.text.replace('\n', " "), style));
    }
    Line::from(spans)
}

/// Entries of the active cell for `day`, newest first.
fn entries_on(cells: &[DayCell], day: NaiveDate) -> &[JournalEntry] {
    cells
        .iter()
        .find(|c| c.is_active && c.date == day)
        .map(|c| c.entries.as_slice())
        .unwrap_or(&[])
}

/// The entry at `index`, wrapping when the day has fewer entries.
fn pick_entry(entries: &[JournalEntry], index: usize) -> Option<&JournalEntry> {
    if entries.is_empty() {
        return None;
    }
    entries.get(index % entries.len())
}

fn day_detail_lines(
    day: NaiveDate,
    entries: &[JournalEntry],
    selected: Option<&JournalEntry>,
    width: usize,
) -> Vec<Line<'static>> {
    if entries.is_empty() {
        return vec![Line::from(Span::styled(
            "No entry on this day",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut header = day.format("%B %-d, %Y").to_string();
    if entries.len() > 1 {
        header.push_str(&format!("  ({} entries)", entries.len()));
    }
    let mut lines = vec![Line::from(Span::styled(
        header,
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for entry in entries {
        let chosen = selected.is_some_and(|s| s.id == entry.id);
        let heart = if entry.favorite { " ♥" } else { "" };
        let text = format!(
            "{} {}{heart}",
            if chosen { ">" } else { " " },
            entry.prompt
        );
        let style = if chosen {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(truncate_to_width(&text, width), style)));
    }
    lines
}

fn calendar_lines(cells: &[DayCell], selected_day: NaiveDate) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        " Su  Mo  Tu  We  Th  Fr  Sa ",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for week in cells.chunks(7) {
        let spans: Vec<Span> = week
            .iter()
            .map(|cell| {
                let marker = match cell.entries.first() {
                    Some(e) if e.favorite => '♥',
                    Some(_) => '*',
                    None => ' ',
                };
                let mut style = Style::default();
                if !cell.is_active {
                    style = style.fg(Color::DarkGray);
                } else if cell.is_today {
                    style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                }
                if cell.is_active && cell.date == selected_day {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Span::styled(format!("{:>3}{marker}", cell.day), style)
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Cuts `text` to at most `max_width` terminal columns, marking the cut.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
