use crate::app::{App, EmiField, Screen, ToastKind};
use goldloan::{format_amount, FilterOutcome};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    render_tabs(f, app, chunks[0]);
    match app.screen {
        Screen::EmiCalculator => render_emi_screen(f, app, chunks[1]),
        Screen::News => render_news_screen(f, app, chunks[1]),
        Screen::NewsArticle => render_article_screen(f, app, chunks[1]),
        Screen::Careers => render_careers_screen(f, app, chunks[1]),
    }
    render_toast(f, app, chunks[2]);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let selected = match app.screen {
        Screen::EmiCalculator => 0,
        Screen::News | Screen::NewsArticle => 1,
        Screen::Careers => 2,
    };
    let tabs = Tabs::new(vec!["EMI Calculator", "News", "Careers"])
        .select(selected)
        .block(Block::default().borders(Borders::BOTTOM).title("Gold Loan"))
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn render_toast(f: &mut Frame, app: &App, area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };
    let (icon, color) = match toast.kind {
        ToastKind::Success => ("✔", Color::Green),
        ToastKind::Error => ("✘", Color::Red),
        ToastKind::Info => ("ℹ", Color::Blue),
    };
    let line = Paragraph::new(format!("{icon} {}", toast.message))
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    f.render_widget(line, area);
}

fn render_emi_screen(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(area);

    let fields = [
        (EmiField::LoanAmount, "Loan Amount", format!("₹{}", app.emi_inputs.loan_amount)),
        (EmiField::InterestRate, "Interest Rate", format!("{}%", app.emi_inputs.interest_rate)),
        (EmiField::Tenure, "Tenure", format!("{} months", app.emi_inputs.tenure_months)),
    ];
    let lines: Vec<Line> = fields
        .into_iter()
        .map(|(field, label, value)| {
            if field == app.emi_focus {
                Line::from(format!("▶ {label}: {value}"))
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                Line::from(format!("  {label}: {value}"))
                    .style(Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    let inputs = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Calculate your monthly EMI"),
    );
    f.render_widget(inputs, chunks[0]);

    if let Some(result) = &app.emi_result {
        let text = vec![
            Line::from(vec![
                Span::styled("Monthly EMI: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("₹{}", result.installment),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Principal: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("₹{}", format_amount(result.quote.principal()))),
            ]),
            Line::from(vec![
                Span::styled("Total Interest: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("₹{}", format_amount(result.installment.total_interest(&result.quote))),
                    Style::default().fg(Color::Red),
                ),
            ]),
            Line::from(vec![
                Span::styled("Total Payable: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("₹{}", format_amount(result.installment.total_payable(&result.quote))),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
        ];
        let summary = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Result"));
        f.render_widget(summary, chunks[1]);
    }

    let help = Paragraph::new("↑/↓: select field | Enter: calculate | Tab: next page | Esc/q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, chunks[2]);
}

fn render_news_screen(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(area);

    let search = Paragraph::new(app.news_query.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Search news"));
    f.render_widget(search, chunks[0]);

    if app.catalog.news.is_empty() {
        render_empty_catalog(f, "No news articles have been published yet.", chunks[1]);
    } else if app.news.outcome() == Some(FilterOutcome::NoResults) {
        render_no_results(f, "No news articles match your search.", chunks[1]);
    } else {
        let items: Vec<ListItem> = app
            .news
            .visible_indices()
            .iter()
            .filter_map(|&i| app.catalog.news.get(i))
            .map(|article| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        article.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("{} · {}", article.date, article.category),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let title = format!(
            "Showing {} of {}",
            app.news.visible_indices().len(),
            app.news.total()
        );
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, chunks[1], &mut app.news_state);
    }

    let help = if app.news.can_load_more() {
        "type to search | ↑/↓: select | Enter: read | PgDn/Ctrl-L: load more | Tab: next page | Esc: quit"
    } else {
        "type to search | ↑/↓: select | Enter: read | Tab: next page | Esc: quit"
    };
    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, chunks[2]);
}

fn render_article_screen(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(area);

    if let Some(article) = app.selected_article() {
        let text = vec![
            Line::from(Span::styled(
                article.title.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} · {}", article.date, article.category),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(article.summary.clone()),
        ];
        let body = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Article"));
        f.render_widget(body, chunks[0]);
    }

    let help = Paragraph::new("Esc/h/←: back to news | q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, chunks[1]);
}

fn render_careers_screen(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(area);

    let search = Paragraph::new(app.jobs_query.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Search by title or location"));
    f.render_widget(search, chunks[0]);

    if app.catalog.jobs.is_empty() {
        render_empty_catalog(f, "There are no open positions right now.", chunks[1]);
    } else if app.jobs.outcome() == Some(FilterOutcome::NoResults) {
        render_no_results(f, "No openings match your search.", chunks[1]);
    } else {
        let header = Row::new(vec!["Title", "Location", "Department", "Type"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .height(1);

        let rows = app
            .jobs
            .visible_indices()
            .into_iter()
            .filter_map(|i| app.catalog.jobs.get(i))
            .map(|job| {
                Row::new(vec![
                    Cell::from(job.title.clone()),
                    Cell::from(job.location.clone()),
                    Cell::from(job.department.clone()),
                    Cell::from(job.employment_type.clone()),
                ])
                .height(1)
            })
            .collect::<Vec<_>>();

        let widths = [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Open Positions"))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol(">> ");
        f.render_stateful_widget(table, chunks[1], &mut app.jobs_state);
    }

    let help = Paragraph::new("type to search | ↑/↓: navigate | Tab: next page | Esc: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, chunks[2]);
}

fn render_no_results(f: &mut Frame, message: &str, area: Rect) {
    let empty = Paragraph::new(message)
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(empty, area);
}

fn render_empty_catalog(f: &mut Frame, message: &str, area: Rect) {
    let empty = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(empty, area);
}
