use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{info, warn};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::controllers::feed_controller::FeedQuery;
use crate::controllers::post_controller;
use crate::error::FriendifyError;
use crate::models::{Comment, Config, Post, SocialApi};
use crate::views::{tui, FeedView, LoadMoreTrigger, StatefulList};

/// Rows from the end of the list at which the next page is requested.
const SENTINEL_THRESHOLD: usize = 2;

const TICK: Duration = Duration::from_millis(100);

/// Results handed back to the UI loop by background tasks.
enum UiEvent {
    Message(String),
    Comments(String, Vec<Comment>),
}

pub async fn start_app(feed: FeedQuery, config: Config) -> Result<(), FriendifyError> {
    let mut terminal = tui::setup_terminal()?;

    let mut stateful_list = StatefulList::with_items(Vec::new());

    let res = run_app(&mut terminal, &mut stateful_list, feed, config).await;

    tui::restore_terminal(&mut terminal)?;

    if let Err(err) = &res {
        eprintln!("{:?}", err);
    }

    res
}

fn spawn_fetch(feed: &FeedQuery, refresh: bool) {
    let feed = feed.clone();
    tokio::spawn(async move {
        let result = if refresh {
            feed.refresh().await
        } else {
            feed.fetch_next_page().await
        };
        if let Err(e) = result {
            warn!("Feed fetch failed: {}", e);
        }
    });
}

fn spawn_comments(feed: &FeedQuery, post_id: String, tx: &UnboundedSender<UiEvent>) {
    let feed = feed.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let event = match feed.api().comments(&post_id).await {
            Ok(comments) => UiEvent::Comments(post_id, comments),
            Err(e) => UiEvent::Message(format!("Could not load comments: {}", e)),
        };
        let _ = tx.send(event);
    });
}

pub async fn run_app(
    terminal: &mut tui::Tui,
    stateful_list: &mut StatefulList<Post>,
    feed: FeedQuery,
    mut config: Config,
) -> Result<(), FriendifyError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<UiEvent>();
    let mut view = FeedView::new(config.theme);
    let mut load_more = LoadMoreTrigger::new();

    spawn_fetch(&feed, false);

    loop {
        while let Ok(event) = rx.try_recv() {
            match event {
                UiEvent::Message(message) => view.message = Some(message),
                UiEvent::Comments(post_id, comments) => view.comments = Some((post_id, comments)),
            }
        }

        let snapshot = feed.snapshot().await;
        stateful_list.set_items(snapshot.items());
        view.sync(&snapshot);

        terminal.draw(|f| tui::render_ui(f, stateful_list, &view))?;

        if load_more.poll(
            stateful_list.sentinel_visible(SENTINEL_THRESHOLD),
            snapshot.has_next_page(),
            snapshot.is_fetching(),
            snapshot.pages().len(),
        ) {
            spawn_fetch(&feed, false);
        }

        if !event::poll(TICK)? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        view.message = None;
        let selected = stateful_list.selected().map(|p| p.id.clone());

        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Esc => return Ok(()),
            KeyCode::Down | KeyCode::Char('j') => stateful_list.next(),
            KeyCode::Up | KeyCode::Char('k') => stateful_list.previous(),
            KeyCode::Char('g') => stateful_list.first(),
            KeyCode::Char('G') => stateful_list.last(),
            KeyCode::Char('r') => {
                view.comments = None;
                spawn_fetch(&feed, true);
            }
            KeyCode::Char('t') => {
                config.toggle_theme();
                view.theme = config.theme;
                if let Err(e) = config.save() {
                    warn!("Failed to persist theme: {}", e);
                    view.message = Some(e.to_string());
                }
            }
            KeyCode::Char('l') => {
                if let Some(post_id) = selected {
                    if let Err(e) = post_controller::toggle_like(&feed, &post_id).await {
                        view.message = Some(e.to_string());
                    }
                }
            }
            KeyCode::Enter => {
                let open = view.comments.as_ref().map(|(id, _)| id.clone());
                match selected {
                    Some(post_id) if open.as_deref() == Some(post_id.as_str()) => view.comments = None,
                    Some(post_id) => spawn_comments(&feed, post_id, &tx),
                    None => {}
                }
            }
            KeyCode::Char('n') => {
                let content = tui::suspend(terminal, || post_controller::compose_via_editor("post"))??;
                if content.trim().is_empty() {
                    view.message = Some("Empty post discarded".to_string());
                    continue;
                }
                let feed = feed.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let message = match post_controller::publish_post(&feed, content, vec![]).await {
                        Ok(post) => format!("Posted {}", post.id),
                        Err(e) => format!("Could not post: {}", e),
                    };
                    let _ = tx.send(UiEvent::Message(message));
                });
            }
            KeyCode::Char('c') => {
                let Some(post_id) = selected else { continue };
                let content = tui::suspend(terminal, || post_controller::compose_via_editor("comment"))??;
                if content.trim().is_empty() {
                    view.message = Some("Empty comment discarded".to_string());
                    continue;
                }
                let feed = feed.clone();
                let tx = tx.clone();
                let reopen = view.comments.as_ref().map(|(open, _)| *open == post_id).unwrap_or(false);
                tokio::spawn(async move {
                    match post_controller::publish_comment(&feed, &post_id, content).await {
                        Ok(comment) => {
                            info!("Comment {} added", comment.id);
                            if reopen {
                                spawn_comments(&feed, post_id, &tx);
                            }
                        }
                        Err(e) => {
                            let _ = tx.send(UiEvent::Message(format!("Could not comment: {}", e)));
                        }
                    }
                });
            }
            _ => {}
        }
    }
}
