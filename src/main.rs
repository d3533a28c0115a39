mod app;
mod ui;

use anyhow::{bail, Context, Result};
use app::{handle_key, App, DEFAULT_PAGE_SIZE};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use goldloan::{init_logging, Catalog};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "goldloan", version, about = "Gold loan EMI calculator, news and careers")]
struct Args {
    #[arg(long, help = "JSON catalog of news articles and job openings")]
    catalog: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, help = "News articles revealed per load")]
    page_size: usize,
    #[arg(long, help = "Directory for log files; logging is off when omitted")]
    log_dir: Option<PathBuf>,
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.page_size == 0 {
        bail!("--page-size must be at least 1");
    }

    let _logger = match &args.log_dir {
        Some(dir) => Some(init_logging(&args.log_level, dir)?),
        None => None,
    };

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog from {}", path.display()))?,
        None => Catalog::embedded()?,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(catalog, args.page_size);
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("event=app_exit status=error reason={:#}", err);
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, &mut app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(&mut app, key)? {
                log::info!("event=app_exit status=ok");
                return Ok(());
            }
        }
    }
}
