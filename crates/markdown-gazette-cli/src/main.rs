use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use markdown_gazette_config::Config;
use markdown_gazette_engine::{Article, ArticleStore, Block, FsArticleStore, render};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as Panel, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{env, io::stdout, path::PathBuf, process};

struct App {
    site_title: String,
    articles: Vec<Article>,
    article_list_state: ListState,
    current_content: Vec<Line<'static>>,
}

impl App {
    fn new(store: &FsArticleStore, site_title: String) -> Result<Self> {
        let articles = store.published_articles()?;

        let mut app = Self {
            site_title,
            articles,
            article_list_state: ListState::default(),
            current_content: Vec::new(),
        };

        // Select first article if available
        if !app.articles.is_empty() {
            app.article_list_state.select(Some(0));
            app.update_content_for_selection();
        }

        Ok(app)
    }

    fn next_article(&mut self) {
        if self.articles.is_empty() {
            return;
        }
        let i = match self.article_list_state.selected() {
            Some(i) => (i + 1) % self.articles.len(),
            None => 0,
        };
        self.article_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_article(&mut self) {
        if self.articles.is_empty() {
            return;
        }
        let i = match self.article_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.articles.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.article_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        let Some(article) = self
            .article_list_state
            .selected()
            .and_then(|i| self.articles.get(i))
        else {
            self.current_content = Vec::new();
            return;
        };

        self.current_content = article_lines(article);
    }
}

/// Full article page: header (date, title, excerpt) followed by the rendered body.
fn article_lines(article: &Article) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        format!("# {}", article.published_at_display()),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        article.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if let Some(excerpt) = &article.excerpt {
        lines.push(Line::from(Span::styled(
            excerpt.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::default());

    if let Some(content) = &article.content {
        lines.extend(render(content).into_iter().map(block_line));
    }

    lines
}

fn block_line(block: Block) -> Line<'static> {
    match block {
        Block::Heading1 { text } => Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Block::Heading2 { text } => Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Block::LabeledItem { label, detail } => Line::from(vec![
            Span::raw("  • "),
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(": {detail}")),
        ]),
        Block::ListItem { text } => Line::from(format!("  • {text}")),
        Block::Spacer => Line::default(),
        Block::Paragraph { text } => Line::from(text),
    }
}

fn main() -> Result<()> {
    // Determine articles path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let articles_path;
    let site_title;
    let from_config;

    if args.len() == 2 {
        // CLI argument provided - use it
        articles_path = PathBuf::from(&args[1]);
        site_title = None;
        from_config = false;
    } else if args.len() == 1 {
        // No CLI argument - try config file
        match Config::load() {
            Ok(Some(config)) => {
                articles_path = config.articles_path;
                site_title = config.site_title;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No articles path provided and no config file found");
                eprintln!("Usage: {} <articles-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <articles-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [articles-folder-path]", args[0]);
        process::exit(1);
    };

    // Validate articles directory by opening the store
    let store = match FsArticleStore::open(&articles_path) {
        Ok(store) => store,
        Err(e) => {
            let source = if from_config {
                format!(" from config file '{}'", config_path.display())
            } else {
                String::new()
            };
            eprintln!(
                "Error: Articles path '{}'{} is invalid: {e}",
                articles_path.display(),
                source
            );
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let title = site_title.unwrap_or_else(|| "blog".to_string());
    let app = App::new(&store, title);

    let res = match app {
        Ok(mut app) => run_app(&mut terminal, &mut app),
        Err(e) => Err(e),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: std::error::Error + Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_article(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_article(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
        .split(f.area());

    // Article list panel, newest first
    let article_items: Vec<ListItem> = app
        .articles
        .iter()
        .map(|article| {
            let mut lines = vec![Line::from(vec![
                Span::styled("# ", Style::default().fg(Color::DarkGray)),
                Span::raw(article.title.clone()),
                Span::styled(
                    format!("  {}", article.published_at_display()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])];
            if let Some(excerpt) = &article.excerpt {
                lines.push(Line::from(Span::styled(
                    format!("  {excerpt}"),
                    Style::default().fg(Color::Gray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let article_list = List::new(article_items)
        .block(
            Panel::default()
                .borders(Borders::ALL)
                .title(app.site_title.clone()),
        )
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(article_list, chunks[0], &mut app.article_list_state);

    // Content panel
    let content_text = if app.current_content.is_empty() {
        vec![Line::from("No published articles yet...")]
    } else {
        app.current_content.clone()
    };

    let content = Paragraph::new(content_text)
        .block(Panel::default().borders(Borders::ALL).title("Article"))
        .wrap(Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Panel::default());

    // Place help at bottom
    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
