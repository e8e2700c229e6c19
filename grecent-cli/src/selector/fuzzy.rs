//! # Fuzzy Branch Selection
//!
//! A ratatui list with a query line on top. Every keystroke reparses the
//! query of a [`BranchFilter`]; the event loop polls the filter between key
//! events, so typing continues while a match pass is still running.
//!
//! ## Keys
//!
//! - Type to filter, Backspace to delete, Ctrl+U to clear the query
//! - Up/Down (or Ctrl+P/Ctrl+N, Shift+Tab/Tab) to move through matches
//! - Enter to switch to the highlighted branch
//! - Esc or Ctrl+C to cancel

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use grecent_core::consts::SELECT_PROMPT;
use grecent_core::{BranchFilter, BranchName, page_size};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};
use tracing::trace;

/// How long the event loop waits for a key before polling the matcher again.
const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Query, matches and cursor of the fuzzy selector, independent of the
/// terminal.
#[derive(Debug)]
pub struct FuzzySelectorState {
  filter: BranchFilter,
  query: String,
  selected_index: usize,
  page_size: usize,
}

impl FuzzySelectorState {
  /// Create a state over `branches` with an empty query.
  pub fn new(branches: &[BranchName]) -> Self {
    Self {
      filter: BranchFilter::new(branches),
      query: String::new(),
      selected_index: 0,
      page_size: page_size(branches.len()),
    }
  }

  /// Current query text
  pub fn query(&self) -> &str {
    &self.query
  }

  /// Rows reserved for the list
  pub const fn page_size(&self) -> usize {
    self.page_size
  }

  /// Index of the highlighted match
  pub const fn selected_index(&self) -> usize {
    self.selected_index
  }

  /// Matches for the query as far as the matcher has got
  pub fn matches(&self) -> Vec<BranchName> {
    self.filter.matches()
  }

  /// The highlighted branch, if anything matches
  pub fn selected_branch(&self) -> Option<BranchName> {
    self.filter.get(self.selected_index)
  }

  /// Collect fresh results from the matcher without blocking for long.
  /// Returns `true` while matching is still in progress.
  pub fn tick(&mut self) -> bool {
    let running = self.filter.tick();
    self.clamp_selection();
    running
  }

  /// Wait until the current query is fully matched.
  pub fn settle(&mut self) {
    self.filter.settle();
    self.clamp_selection();
  }

  /// Move to the next match
  pub fn next(&mut self) {
    let count = self.filter.matched_count();
    if count > 0 {
      self.selected_index = (self.selected_index + 1) % count;
    }
  }

  /// Move to the previous match
  pub fn previous(&mut self) {
    let count = self.filter.matched_count();
    if count > 0 {
      self.selected_index = if self.selected_index == 0 {
        count - 1
      } else {
        self.selected_index - 1
      };
    }
  }

  /// Handle key input and return the action to take
  pub fn handle_key(&mut self, key_code: KeyCode, modifiers: KeyModifiers) -> SelectorAction {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    match key_code {
      KeyCode::Char('c') if ctrl => SelectorAction::Cancel,
      KeyCode::Esc => SelectorAction::Cancel,
      KeyCode::Enter => match self.selected_branch() {
        Some(branch) => SelectorAction::Select(branch),
        None => SelectorAction::Continue,
      },
      KeyCode::Down | KeyCode::Tab => {
        self.next();
        SelectorAction::Continue
      }
      KeyCode::Char('n') if ctrl => {
        self.next();
        SelectorAction::Continue
      }
      KeyCode::Up | KeyCode::BackTab => {
        self.previous();
        SelectorAction::Continue
      }
      KeyCode::Char('p') if ctrl => {
        self.previous();
        SelectorAction::Continue
      }
      KeyCode::Char('u') if ctrl => {
        self.query.clear();
        self.apply_query();
        SelectorAction::Continue
      }
      KeyCode::Backspace => {
        if self.query.pop().is_some() {
          self.apply_query();
        }
        SelectorAction::Continue
      }
      KeyCode::Char(c) if !ctrl => {
        self.query.push(c);
        self.apply_query();
        SelectorAction::Continue
      }
      _ => SelectorAction::Continue,
    }
  }

  fn apply_query(&mut self) {
    trace!(query = %self.query, "Query changed");
    self.filter.set_query(&self.query);
    self.selected_index = 0;
  }

  fn clamp_selection(&mut self) {
    let count = self.filter.matched_count();
    if self.selected_index >= count {
      self.selected_index = count.saturating_sub(1);
    }
  }
}

/// Actions that can result from key input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorAction {
  /// Keep reading keys
  Continue,
  /// Leave without choosing
  Cancel,
  /// Switch to the given branch
  Select(BranchName),
}

/// Terminal front end for [`FuzzySelectorState`].
#[derive(Debug)]
pub struct FuzzySelector {
  state: FuzzySelectorState,
  list_state: ListState,
}

impl FuzzySelector {
  /// Create a selector over `branches`
  pub fn new(branches: &[BranchName]) -> Self {
    Self {
      state: FuzzySelectorState::new(branches),
      list_state: ListState::default(),
    }
  }

  /// Run the interactive selector and return the chosen branch
  pub fn run(mut self) -> Result<Option<BranchName>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = self.run_app(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
  }

  fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<Option<BranchName>> {
    loop {
      self.state.tick();
      terminal.draw(|f| self.ui(f))?;

      if !event::poll(POLL_INTERVAL)? {
        continue;
      }

      if let Event::Key(key) = event::read()?
        && key.kind == KeyEventKind::Press
      {
        match self.state.handle_key(key.code, key.modifiers) {
          SelectorAction::Continue => {}
          SelectorAction::Cancel => return Ok(None),
          SelectorAction::Select(branch) => return Ok(Some(branch)),
        }
      }
    }
  }

  fn ui(&mut self, f: &mut Frame) {
    let list_height = u16::try_from(self.state.page_size()).unwrap_or(u16::MAX).saturating_add(2);
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(3), Constraint::Length(list_height), Constraint::Min(0)])
      .split(f.area());

    let query = Paragraph::new(Line::raw(self.state.query())).block(
      Block::default()
        .borders(Borders::ALL)
        .title(SELECT_PROMPT),
    );
    f.render_widget(query, chunks[0]);

    let query_width = u16::try_from(self.state.query().chars().count()).unwrap_or(u16::MAX);
    f.set_cursor_position((
      chunks[0].x.saturating_add(1).saturating_add(query_width),
      chunks[0].y.saturating_add(1),
    ));

    let matches = self.state.matches();
    let title = format!("{} matching (Enter to switch, Esc to cancel)", matches.len());
    let items: Vec<ListItem> = matches
      .iter()
      .map(|branch| ListItem::new(Line::raw(branch.to_string())))
      .collect();

    self
      .list_state
      .select(if matches.is_empty() { None } else { Some(self.state.selected_index()) });

    let list = List::new(items)
      .block(Block::default().borders(Borders::ALL).title(title))
      .highlight_style(
        Style::default()
          .add_modifier(Modifier::BOLD)
          .bg(Color::Blue)
          .fg(Color::White),
      )
      .highlight_symbol("❯ ");

    f.render_stateful_widget(list, chunks[1], &mut self.list_state);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn branches() -> Vec<BranchName> {
    ["feature-x", "bugfix-9", "release/2024.10", "feature/login-form"]
      .into_iter()
      .map(BranchName::from)
      .collect()
  }

  fn type_query(state: &mut FuzzySelectorState, text: &str) {
    for c in text.chars() {
      assert_eq!(state.handle_key(KeyCode::Char(c), KeyModifiers::NONE), SelectorAction::Continue);
    }
    state.settle();
  }

  #[test]
  fn starts_with_every_branch_in_recency_order() {
    let mut state = FuzzySelectorState::new(&branches());
    state.settle();

    assert_eq!(state.matches(), branches());
    assert_eq!(state.selected_branch(), Some(BranchName::from("feature-x")));
    assert_eq!(state.page_size(), 4);
  }

  #[test]
  fn typing_narrows_the_matches() {
    let mut state = FuzzySelectorState::new(&branches());
    state.settle();

    type_query(&mut state, "login");

    assert_eq!(state.query(), "login");
    assert_eq!(state.matches(), vec![BranchName::from("feature/login-form")]);
  }

  #[test]
  fn letters_used_for_navigation_elsewhere_are_typed() {
    let mut state = FuzzySelectorState::new(&branches());
    state.settle();

    type_query(&mut state, "jkq");

    assert_eq!(state.query(), "jkq");
    assert!(state.matches().is_empty());
  }

  #[test]
  fn backspace_widens_the_matches() {
    let mut state = FuzzySelectorState::new(&branches());
    state.settle();
    type_query(&mut state, "bugfix-9x");
    assert!(state.matches().is_empty());

    state.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
    state.settle();

    assert_eq!(state.query(), "bugfix-9");
    assert_eq!(state.selected_branch(), Some(BranchName::from("bugfix-9")));
  }

  #[test]
  fn ctrl_u_clears_the_query() {
    let mut state = FuzzySelectorState::new(&branches());
    state.settle();
    type_query(&mut state, "release");

    state.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL);
    state.settle();

    assert_eq!(state.query(), "");
    assert_eq!(state.matches(), branches());
  }

  #[test]
  fn navigation_wraps_around() {
    let mut state = FuzzySelectorState::new(&branches());
    state.settle();

    state.handle_key(KeyCode::Up, KeyModifiers::NONE);
    assert_eq!(state.selected_index(), 3);

    state.handle_key(KeyCode::Down, KeyModifiers::NONE);
    assert_eq!(state.selected_index(), 0);

    state.handle_key(KeyCode::Char('n'), KeyModifiers::CONTROL);
    assert_eq!(state.selected_index(), 1);

    state.handle_key(KeyCode::Char('p'), KeyModifiers::CONTROL);
    assert_eq!(state.selected_index(), 0);
  }

  #[test]
  fn enter_selects_highlighted_branch() {
    let mut state = FuzzySelectorState::new(&branches());
    state.settle();
    state.handle_key(KeyCode::Down, KeyModifiers::NONE);

    assert_eq!(
      state.handle_key(KeyCode::Enter, KeyModifiers::NONE),
      SelectorAction::Select(BranchName::from("bugfix-9"))
    );
  }

  #[test]
  fn enter_without_matches_keeps_prompting() {
    let mut state = FuzzySelectorState::new(&branches());
    state.settle();
    type_query(&mut state, "zzzz");

    assert_eq!(state.handle_key(KeyCode::Enter, KeyModifiers::NONE), SelectorAction::Continue);
  }

  #[test]
  fn escape_and_ctrl_c_cancel() {
    let mut state = FuzzySelectorState::new(&branches());

    assert_eq!(state.handle_key(KeyCode::Esc, KeyModifiers::NONE), SelectorAction::Cancel);
    assert_eq!(
      state.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
      SelectorAction::Cancel
    );
  }

  #[test]
  fn page_size_is_capped() {
    let many: Vec<BranchName> = (0..25).map(|i| BranchName::from(format!("branch-{i}"))).collect();

    assert_eq!(FuzzySelectorState::new(&many).page_size(), 10);
  }
}
