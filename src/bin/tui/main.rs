mod app;

use std::io;
use std::path::Path;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};

use app::{
    comparison_title, format_condition, format_delta, format_price, format_price_per_km, AppState,
    Field, Outcome,
};
use carvalue::config::Config;
use carvalue::dataset::Dataset;
use carvalue::PricePredictor;

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> io::Result<()> {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    // Artifacts are loaded before the terminal is taken over so errors stay readable.
    let predictor = match PricePredictor::load(&cfg) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}. Ensure {} and {} are available.", cfg.model_path, cfg.scaler_path);
            std::process::exit(1);
        }
    };

    let dataset = if Path::new(&cfg.dataset_path).exists() {
        match Dataset::load(&cfg.dataset_path) {
            Ok(d) => Some(d),
            Err(e) => {
                eprintln!("Ignoring dataset {}: {e}", cfg.dataset_path);
                None
            }
        }
    } else {
        None
    };

    let mut app = match AppState::new(predictor, dataset, cfg.comparison_limit) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal regardless of result
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                KeyCode::Right | KeyCode::Char('l') => app.adjust_selected(1),
                KeyCode::Left | KeyCode::Char('h') => app.adjust_selected(-1),
                KeyCode::PageUp => app.adjust_selected(10),
                KeyCode::PageDown => app.adjust_selected(-10),
                KeyCode::Enter | KeyCode::Char('p') => app.submit(),
                KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),
                _ => {}
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(f: &mut Frame, app: &AppState) {
    let area = f.area();

    // Outer vertical split: header | body | footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    render_footer(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let dataset_span = if app.has_dataset() {
        Span::styled("● listings loaded", Style::default().fg(Color::Green))
    } else {
        Span::styled("◌ no listings", Style::default().fg(Color::DarkGray))
    };

    let title_spans = vec![
        Span::styled(
            " CarValue  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Intelligent Car Price Prediction",
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        dataset_span,
    ];

    let paragraph = Paragraph::new(Line::from(title_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(paragraph, area);
}

fn render_body(f: &mut Frame, app: &AppState, area: Rect) {
    // Horizontal split: form (40%) | results (60%)
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_form(f, app, halves[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(halves[1]);

    render_result(f, app, right[0]);
    render_comparison(f, app, right[1]);
}

fn render_form(f: &mut Frame, app: &AppState, area: Rect) {
    let rows: Vec<Row> = Field::ALL
        .iter()
        .map(|&field| {
            Row::new(vec![
                Cell::from(field.label()).style(Style::default().fg(Color::DarkGray)),
                Cell::from(format!("‹ {} ›", app.form.value_text(field)))
                    .style(Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(22), Constraint::Min(10)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " CAR SPECIFICATIONS ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_result(f: &mut Frame, app: &AppState, area: Rect) {
    let lines = match &app.outcome {
        Outcome::Idle => vec![Line::from(Span::styled(
            "Press Enter to estimate the price",
            Style::default().fg(Color::DarkGray),
        ))],
        Outcome::Failed(e) => vec![Line::from(Span::styled(
            format!("✗ {e}"),
            Style::default().fg(Color::Red),
        ))],
        Outcome::Predicted { result, .. } => vec![
            Line::from(vec![
                Span::raw("Estimated Car Price  "),
                Span::styled(
                    format_price(result.price),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Confidence ", Style::default().fg(Color::DarkGray)),
                Span::styled("High", Style::default().fg(Color::Green)),
                Span::raw("  │  "),
                Span::styled("Price/KM ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format_price_per_km(result.price_per_km),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw("  │  "),
                Span::styled("Condition ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format_condition(result.condition_percent),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
        ],
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                " PREDICTION ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(paragraph, area);
}

fn render_comparison(f: &mut Frame, app: &AppState, area: Rect) {
    let (title, rows) = match &app.outcome {
        Outcome::Predicted {
            comparison: Some(c),
            ..
        } => {
            let title = comparison_title(c);
            let rows: Vec<Row> = c
                .listings
                .iter()
                .map(|l| {
                    let delta_color = if l.delta >= 0.0 { Color::Green } else { Color::Red };
                    Row::new(vec![
                        Cell::from(l.year.to_string()).style(Style::default().fg(Color::DarkGray)),
                        Cell::from(format_price(l.selling_price)),
                        Cell::from(l.km_driven.to_string()),
                        Cell::from(l.fuel.clone()),
                        Cell::from(format_delta(l.delta)).style(Style::default().fg(delta_color)),
                    ])
                })
                .collect();
            (title, rows)
        }
        _ => (" MARKET INSIGHTS ".to_string(), Vec::new()),
    };

    let header_cells = ["Year", "Price", "KM", "Fuel", "vs Yours"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1);

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                title,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let latency = match app.latency.summary() {
        Some(s) => format!("predict x{} p50 {}us p99 {}us", s.samples, s.p50_us, s.p99_us),
        None => "predict -".to_string(),
    };
    let line = Line::from(vec![
        Span::styled(" [q] ", Style::default().fg(Color::Yellow)),
        Span::raw("quit  "),
        Span::styled("[↑↓ / j k] ", Style::default().fg(Color::Yellow)),
        Span::raw("field  "),
        Span::styled("[←→ / h l] ", Style::default().fg(Color::Yellow)),
        Span::raw("adjust  "),
        Span::styled("[enter] ", Style::default().fg(Color::Yellow)),
        Span::raw("predict  "),
        Span::styled("[r] ", Style::default().fg(Color::Yellow)),
        Span::raw("reset  "),
        Span::styled(latency, Style::default().fg(Color::DarkGray)),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}
