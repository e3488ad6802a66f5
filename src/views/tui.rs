use std::io;
use ratatui::{
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    layout::{Layout, Constraint, Direction, Rect},
    style::{Style, Color, Modifier},
    Terminal, Frame,
    text::Line,
    prelude::{Span, Text},
};
use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    execute,
    event::{DisableMouseCapture, EnableMouseCapture},
};

use crate::models::{Comment, FeedCache, FeedStatus, Post, ThemeMode};
use crate::views::widgets::StatefulList;

pub type Tui = Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>;

/// Everything the feed screen shows besides the posts themselves.
pub struct FeedView {
    pub theme: ThemeMode,
    pub status: FeedStatus,
    pub has_next_page: bool,
    pub message: Option<String>,
    pub comments: Option<(String, Vec<Comment>)>,
}

impl FeedView {
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            theme,
            status: FeedStatus::Idle,
            has_next_page: false,
            message: None,
            comments: None,
        }
    }

    pub fn sync(&mut self, cache: &FeedCache) {
        self.status = cache.status();
        self.has_next_page = cache.has_next_page();
        if let Some(e) = cache.last_error() {
            self.message = Some(e.to_string());
        }
    }

    pub fn title(&self) -> String {
        match self.status {
            FeedStatus::LoadingFirstPage => String::from("Loading..."),
            FeedStatus::FetchingNext => String::from("Feed (loading more...)"),
            FeedStatus::Idle => String::from("Feed"),
        }
    }

    fn sentinel(&self) -> &'static str {
        match (self.status, self.has_next_page) {
            (FeedStatus::Idle, false) => "End of feed",
            (FeedStatus::Idle, true) => "Scroll for more",
            _ => "Loading more...",
        }
    }
}

struct Palette {
    header: Color,
    text: Color,
    highlight_bg: Color,
    highlight_fg: Color,
    muted: Color,
}

fn palette(theme: ThemeMode) -> Palette {
    match theme {
        ThemeMode::Dark => Palette {
            header: Color::Cyan,
            text: Color::White,
            highlight_bg: Color::Gray,
            highlight_fg: Color::Black,
            muted: Color::DarkGray,
        },
        ThemeMode::Light => Palette {
            header: Color::Blue,
            text: Color::Black,
            highlight_bg: Color::LightBlue,
            highlight_fg: Color::Black,
            muted: Color::Gray,
        },
    }
}

pub fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

pub fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

/// Leave the alternate screen so an external program (the editor) can own the terminal.
pub fn suspend<T>(terminal: &mut Tui, f: impl FnOnce() -> T) -> io::Result<T> {
    restore_terminal(terminal)?;
    let out = f();
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen, EnableMouseCapture)?;
    terminal.clear()?;
    Ok(out)
}

fn post_item<'a>(post: &'a Post, colors: &Palette) -> ListItem<'a> {
    // Create the header line with author and timestamp
    let header = Line::from(vec![
        Span::styled(
            format!("{} (@{}) posted at {}", post.author.full_name(), post.author.username, post.datetime()),
            Style::default().fg(colors.header).add_modifier(Modifier::BOLD)
        )
    ]);

    let content = Text::raw(&post.content);

    let heart = if post.is_liked { "♥" } else { "♡" };
    let mut counters = format!(
        "{} {}   {} comments   {} shares",
        heart, post.likes, post.comments, post.shares
    );
    if !post.images.is_empty() {
        counters.push_str(&format!("   [{} image(s)]", post.images.len()));
    }

    let mut all_lines = vec![
        header,
        Line::from(""),
    ];
    all_lines.extend(content.lines);
    all_lines.push(Line::from(Span::styled(counters, Style::default().fg(colors.muted))));
    all_lines.push(Line::from(""));

    ListItem::new(all_lines)
        .style(Style::default().fg(colors.text))
}

fn comment_lines(comments: &[Comment], depth: usize, lines: &mut Vec<Line<'static>>) {
    for comment in comments {
        lines.push(Line::from(format!(
            "{}{}: {}",
            "  ".repeat(depth),
            comment.author.full_name(),
            comment.content
        )));
        comment_lines(&comment.replies, depth + 1, lines);
    }
}

pub fn render_ui<B: ratatui::backend::Backend>(
    f: &mut Frame<B>,
    stateful_list: &mut StatefulList<Post>,
    view: &FeedView,
) {
    let colors = palette(view.theme);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(f.size());

    let feed_area: Rect = if view.comments.is_some() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
            .split(rows[0]);
        render_comments(f, columns[1], view, &colors);
        columns[0]
    } else {
        rows[0]
    };

    let mut items: Vec<ListItem> = stateful_list.items
        .iter()
        .map(|post| post_item(post, &colors))
        .collect();
    items.push(ListItem::new(Line::from(Span::styled(
        view.sentinel(),
        Style::default().fg(colors.muted).add_modifier(Modifier::ITALIC),
    ))));

    let list = List::new(items)
        .block(Block::default().title(view.title()).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(colors.highlight_bg)
                .fg(colors.highlight_fg)
                .add_modifier(Modifier::BOLD)
        );

    f.render_stateful_widget(list, feed_area, &mut stateful_list.state);

    let help = "j/k move  l like  n post  c comment  enter comments  t theme  r refresh  q quit";
    let status = match &view.message {
        Some(message) => Span::styled(message.clone(), Style::default().fg(Color::Red)),
        None => Span::styled(help, Style::default().fg(colors.muted)),
    };
    f.render_widget(Paragraph::new(Line::from(status)), rows[1]);
}

fn render_comments<B: ratatui::backend::Backend>(
    f: &mut Frame<B>,
    area: Rect,
    view: &FeedView,
    colors: &Palette,
) {
    let mut lines = Vec::new();
    if let Some((_, comments)) = &view.comments {
        if comments.is_empty() {
            lines.push(Line::from("No comments yet"));
        }
        comment_lines(comments, 0, &mut lines);
    }

    let pane = Paragraph::new(lines)
        .style(Style::default().fg(colors.text))
        .block(Block::default().title("Comments").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(pane, area);
}
