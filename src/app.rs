use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use goldloan::{Catalog, EmiError, FilteredListing, Installment, LoanQuote, PagedListing};
use ratatui::widgets::{ListState, TableState};

pub const DEFAULT_PAGE_SIZE: usize = 3;

const INVALID_INPUT_MESSAGE: &str = "Please enter valid positive numbers for all fields.";
const NOT_COMPUTABLE_MESSAGE: &str = "Could not calculate EMI. Please check your inputs.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    EmiCalculator,
    News,
    NewsArticle,
    Careers,
}

impl Screen {
    fn next(self) -> Self {
        match self {
            Screen::EmiCalculator => Screen::News,
            Screen::News | Screen::NewsArticle => Screen::Careers,
            Screen::Careers => Screen::EmiCalculator,
        }
    }

    fn previous(self) -> Self {
        match self {
            Screen::EmiCalculator => Screen::Careers,
            Screen::News | Screen::NewsArticle => Screen::EmiCalculator,
            Screen::Careers => Screen::News,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmiField {
    LoanAmount,
    InterestRate,
    Tenure,
}

impl EmiField {
    fn next(self) -> Self {
        match self {
            EmiField::LoanAmount => EmiField::InterestRate,
            EmiField::InterestRate => EmiField::Tenure,
            EmiField::Tenure => EmiField::LoanAmount,
        }
    }

    fn previous(self) -> Self {
        match self {
            EmiField::LoanAmount => EmiField::Tenure,
            EmiField::InterestRate => EmiField::LoanAmount,
            EmiField::Tenure => EmiField::InterestRate,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmiInputs {
    pub loan_amount: String,
    pub interest_rate: String,
    pub tenure_months: String,
}

impl EmiInputs {
    fn field_mut(&mut self, field: EmiField) -> &mut String {
        match field {
            EmiField::LoanAmount => &mut self.loan_amount,
            EmiField::InterestRate => &mut self.interest_rate,
            EmiField::Tenure => &mut self.tenure_months,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EmiBreakdown {
    pub quote: LoanQuote,
    pub installment: Installment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

pub struct App {
    pub screen: Screen,
    pub catalog: Catalog,
    pub emi_inputs: EmiInputs,
    pub emi_focus: EmiField,
    pub emi_result: Option<EmiBreakdown>,
    pub news_query: String,
    pub news: PagedListing,
    pub news_state: ListState,
    pub jobs_query: String,
    pub jobs: FilteredListing,
    pub jobs_state: TableState,
    pub toast: Option<Toast>,
}

impl App {
    pub fn new(catalog: Catalog, page_size: usize) -> Self {
        let mut news = PagedListing::new(page_size);
        if !catalog.news.is_empty() {
            news.refilter(&catalog.news, "");
        }
        let jobs = FilteredListing::new(catalog.jobs.len());

        let mut app = Self {
            screen: Screen::EmiCalculator,
            catalog,
            emi_inputs: EmiInputs::default(),
            emi_focus: EmiField::LoanAmount,
            emi_result: None,
            news_query: String::new(),
            news,
            news_state: ListState::default(),
            jobs_query: String::new(),
            jobs,
            jobs_state: TableState::default(),
            toast: None,
        };
        app.reset_news_selection();
        app.reset_jobs_selection();
        app
    }

    fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast = Some(Toast {
            kind,
            message: message.into(),
        });
    }

    pub fn calculate_emi(&mut self) {
        let outcome = LoanQuote::parse(
            &self.emi_inputs.loan_amount,
            &self.emi_inputs.interest_rate,
            &self.emi_inputs.tenure_months,
        )
        .and_then(|quote| {
            quote
                .installment()
                .map(|installment| EmiBreakdown { quote, installment })
        });

        match outcome {
            Ok(breakdown) => {
                log::info!(
                    "event=emi_calculate status=ok principal={} rate={} term={} emi={:.2}",
                    breakdown.quote.principal(),
                    breakdown.quote.annual_rate_percent(),
                    breakdown.quote.term_months(),
                    breakdown.installment.amount()
                );
                self.show_toast(
                    ToastKind::Success,
                    format!("Monthly EMI: ₹{}", breakdown.installment),
                );
                self.emi_result = Some(breakdown);
            }
            Err(err) => {
                log::warn!("event=emi_calculate status=error reason={}", err);
                self.emi_result = None;
                let message = match err {
                    EmiError::InvalidInput { .. } => INVALID_INPUT_MESSAGE,
                    EmiError::NotComputable => NOT_COMPUTABLE_MESSAGE,
                };
                self.show_toast(ToastKind::Error, message);
            }
        }
    }

    /// Listings with nothing to search are never filtered, so they never
    /// report `NoResults`.
    pub fn refilter_news(&mut self) {
        if self.catalog.news.is_empty() {
            return;
        }
        self.news.refilter(&self.catalog.news, &self.news_query);
        self.reset_news_selection();
    }

    pub fn load_more_news(&mut self) {
        if self.news.reveal_next_page() == 0 {
            self.show_toast(ToastKind::Info, "No more articles to load.");
        }
    }

    pub fn refilter_jobs(&mut self) {
        if self.catalog.jobs.is_empty() {
            return;
        }
        let outcome = self.jobs.refilter(&self.catalog.jobs, &self.jobs_query);
        log::debug!(
            "event=jobs_refilter query={:?} outcome={:?}",
            self.jobs.query().as_str(),
            outcome
        );
        self.reset_jobs_selection();
    }

    /// The article under the news cursor, if any.
    pub fn selected_article(&self) -> Option<&goldloan::NewsArticle> {
        let position = self.news_state.selected()?;
        let index = *self.news.visible_indices().get(position)?;
        self.catalog.news.get(index)
    }

    fn reset_news_selection(&mut self) {
        let selected = (!self.news.visible_indices().is_empty()).then_some(0);
        self.news_state.select(selected);
    }

    fn reset_jobs_selection(&mut self) {
        let selected = (self.jobs.visible_count() > 0).then_some(0);
        self.jobs_state.select(selected);
    }
}

/// Returns `Ok(true)` when the app should exit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }
    // a toast lasts until the next key press
    app.toast = None;
    match key.code {
        KeyCode::Tab if app.screen != Screen::NewsArticle => {
            app.screen = app.screen.next();
            return Ok(false);
        }
        KeyCode::BackTab if app.screen != Screen::NewsArticle => {
            app.screen = app.screen.previous();
            return Ok(false);
        }
        _ => {}
    }

    match app.screen {
        Screen::EmiCalculator => handle_emi_input(app, key),
        Screen::News => handle_news_input(app, key),
        Screen::NewsArticle => handle_article_input(app, key),
        Screen::Careers => handle_careers_input(app, key),
    }
}

fn is_text_input(key: &KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn handle_emi_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char(c) if is_text_input(&key) && (c.is_ascii_digit() || c == '.') => {
            app.emi_inputs.field_mut(app.emi_focus).push(c);
        }
        KeyCode::Backspace => {
            app.emi_inputs.field_mut(app.emi_focus).pop();
        }
        KeyCode::Down | KeyCode::Char('j') => app.emi_focus = app.emi_focus.next(),
        KeyCode::Up | KeyCode::Char('k') => app.emi_focus = app.emi_focus.previous(),
        KeyCode::Enter => app.calculate_emi(),
        KeyCode::Esc | KeyCode::Char('q') => return Ok(true),
        _ => {}
    }
    Ok(false)
}

fn handle_news_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.load_more_news();
        }
        KeyCode::PageDown => app.load_more_news(),
        KeyCode::Char(c) if is_text_input(&key) => {
            app.news_query.push(c);
            app.refilter_news();
        }
        KeyCode::Backspace => {
            if app.news_query.pop().is_some() {
                app.refilter_news();
            }
        }
        KeyCode::Down => {
            let shown = app.news.visible_indices().len();
            let current = app.news_state.selected().unwrap_or(0);
            if current + 1 < shown {
                app.news_state.select(Some(current + 1));
            }
        }
        KeyCode::Up => {
            let current = app.news_state.selected().unwrap_or(0);
            if current > 0 {
                app.news_state.select(Some(current - 1));
            }
        }
        KeyCode::Enter => {
            if app.selected_article().is_some() {
                app.screen = Screen::NewsArticle;
            }
        }
        KeyCode::Esc => return Ok(true),
        _ => {}
    }
    Ok(false)
}

fn handle_article_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
            app.screen = Screen::News;
        }
        KeyCode::Char('q') => return Ok(true),
        _ => {}
    }
    Ok(false)
}

fn handle_careers_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char(c) if is_text_input(&key) => {
            app.jobs_query.push(c);
            app.refilter_jobs();
        }
        KeyCode::Backspace => {
            if app.jobs_query.pop().is_some() {
                app.refilter_jobs();
            }
        }
        KeyCode::Down => {
            let shown = app.jobs.visible_count();
            let current = app.jobs_state.selected().unwrap_or(0);
            if current + 1 < shown {
                app.jobs_state.select(Some(current + 1));
            }
        }
        KeyCode::Up => {
            let current = app.jobs_state.selected().unwrap_or(0);
            if current > 0 {
                app.jobs_state.select(Some(current - 1));
            }
        }
        KeyCode::Esc => return Ok(true),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldloan::{FilterOutcome, JobOpening, NewsArticle};

    fn article(title: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            date: "2024-01-01".to_string(),
            category: "Announcements".to_string(),
            summary: format!("About {title}"),
        }
    }

    fn job(title: &str, location: &str) -> JobOpening {
        JobOpening {
            title: title.to_string(),
            location: location.to_string(),
            department: "Operations".to_string(),
            employment_type: "Full-time".to_string(),
        }
    }

    fn test_app() -> App {
        let catalog = Catalog {
            news: (1..=10).map(|i| article(&format!("Gold update {i}"))).collect(),
            jobs: vec![
                job("Senior Engineer", "Mumbai"),
                job("Analyst", "Delhi"),
                job("Engineer", "Pune"),
            ],
        };
        App::new(catalog, DEFAULT_PAGE_SIZE)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn emi_is_calculated_from_typed_fields() {
        let mut app = test_app();
        type_text(&mut app, "100000");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "12");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "12");
        press(&mut app, KeyCode::Enter);

        let result = app.emi_result.expect("emi should be computed");
        assert_eq!(result.installment.formatted(), "8,884.88");
        assert_eq!(app.toast.unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn failed_calculation_clears_previous_result() {
        let mut app = test_app();
        app.emi_inputs = EmiInputs {
            loan_amount: "5000".to_string(),
            interest_rate: "10".to_string(),
            tenure_months: "6".to_string(),
        };
        app.calculate_emi();
        assert!(app.emi_result.is_some());

        app.emi_inputs.loan_amount = "0".to_string();
        app.calculate_emi();
        assert!(app.emi_result.is_none());
        assert_eq!(
            app.toast,
            Some(Toast {
                kind: ToastKind::Error,
                message: INVALID_INPUT_MESSAGE.to_string(),
            })
        );
    }

    #[test]
    fn emi_fields_ignore_letters() {
        let mut app = test_app();
        type_text(&mut app, "12a3");
        assert_eq!(app.emi_inputs.loan_amount, "123");
    }

    #[test]
    fn news_starts_with_first_page() {
        let app = test_app();
        assert_eq!(app.news.visible_indices(), &[0, 1, 2]);
        assert_eq!(app.news_state.selected(), Some(0));
    }

    #[test]
    fn news_load_more_and_search() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.screen, Screen::News);

        for _ in 0..4 {
            press(&mut app, KeyCode::PageDown);
        }
        assert_eq!(app.news.visible_indices().len(), 10);
        assert!(!app.news.can_load_more());

        type_text(&mut app, "UPDATE 1");
        // "update 1" and "update 10"
        assert_eq!(app.news.total(), 2);
        assert_eq!(app.news.visible_indices(), &[0, 9]);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.news_query, "UPDATE ");
        assert_eq!(app.news.visible_indices().len(), 3);
    }

    #[test]
    fn news_reports_no_results() {
        let mut app = test_app();
        app.screen = Screen::News;
        type_text(&mut app, "silver");
        assert_eq!(app.news.outcome(), Some(FilterOutcome::NoResults));
        assert_eq!(app.news_state.selected(), None);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::News);
    }

    #[test]
    fn enter_opens_selected_article() {
        let mut app = test_app();
        app.screen = Screen::News;
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::NewsArticle);
        assert_eq!(app.selected_article().unwrap().title, "Gold update 2");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::News);
    }

    #[test]
    fn careers_filter_matches_title_or_location() {
        let mut app = test_app();
        app.screen = Screen::Careers;
        type_text(&mut app, "engineer");
        assert_eq!(app.jobs.visible_indices(), vec![0, 2]);

        for _ in 0.."engineer".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "delhi");
        assert_eq!(app.jobs.visible_indices(), vec![1]);
    }

    #[test]
    fn escape_quits_from_listings() {
        let mut app = test_app();
        app.screen = Screen::Careers;
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn empty_catalog_never_reports_no_results() {
        let mut app = App::new(Catalog::default(), DEFAULT_PAGE_SIZE);
        assert_eq!(app.news.outcome(), None);
        assert_eq!(app.jobs.outcome(), None);

        app.screen = Screen::News;
        type_text(&mut app, "gold");
        assert_eq!(app.news.outcome(), None);
        assert_eq!(app.news_state.selected(), None);

        app.screen = Screen::Careers;
        type_text(&mut app, "pune");
        assert_eq!(app.jobs.outcome(), None);
        assert_eq!(app.jobs_state.selected(), None);
    }

    #[test]
    fn careers_outcome_appears_after_typing() {
        let mut app = test_app();
        assert_eq!(app.jobs.outcome(), None);
        app.screen = Screen::Careers;
        type_text(&mut app, "chennai");
        assert_eq!(app.jobs.outcome(), Some(FilterOutcome::NoResults));
        assert_eq!(app.jobs_state.selected(), None);
    }

    #[test]
    fn toast_clears_on_next_key() {
        let mut app = test_app();
        app.emi_inputs = EmiInputs {
            loan_amount: "100000".to_string(),
            interest_rate: "12".to_string(),
            tenure_months: "12".to_string(),
        };
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.toast.as_ref().map(|t| t.kind), Some(ToastKind::Success));

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.toast, None);
        assert!(app.emi_result.is_some());
    }

    #[test]
    fn modified_chars_are_not_typed_into_search() {
        let mut app = test_app();
        app.screen = Screen::News;
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)).unwrap();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('g'), KeyModifiers::ALT)).unwrap();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(app.news_query, "G");

        app.screen = Screen::Careers;
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('p'), KeyModifiers::ALT)).unwrap();
        assert_eq!(app.jobs_query, "");

        app.screen = Screen::EmiCalculator;
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('5'), KeyModifiers::CONTROL)).unwrap();
        assert_eq!(app.emi_inputs.loan_amount, "");
    }
}
