//! grid-news — terminal entrypoint.
//! Loads the static feed and drives the list/detail views from stdin commands.
//!
//! See `DESIGN.md` for the module map.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use grid_news::config::AppConfig;
use grid_news::loader::{fetcher_for, load_news, ResourceFetcher};
use grid_news::nav::{HistoryNavigator, Navigator, Route};
use grid_news::render::{self, DateFormatter};
use grid_news::scroll::RowViewport;
use grid_news::telemetry::Telemetry;
use grid_news::{Category, DetailView, ListView, SourceFilter};

const HELP: &str = "\
commands:
  tab <all|team|driver|tech|reg|rumor>
  source <all|official|media|reporter|rumor>
  scroll [rows]      move the viewport down (default: one screen)
  open <n>           open card n of the list
  go <path>          navigate to /news or /news/<id>
  back               previous view
  html               toggle HTML output
  stats              print counters
  help | quit";

/// Logs go to stderr so stdout stays clean for rendered pages.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grid_news=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

enum Screen {
    List(ListView<RowViewport>),
    Detail(DetailView),
}

struct App {
    cfg: AppConfig,
    fetcher: Box<dyn ResourceFetcher>,
    dates: DateFormatter,
    nav: HistoryNavigator,
    screen: Screen,
    html: bool,
    telemetry: Telemetry,
}

impl App {
    fn new(cfg: AppConfig, telemetry: Telemetry) -> Result<Self> {
        let fetcher = fetcher_for(&cfg.resource, cfg.request_timeout())?;
        let dates = DateFormatter::from_offset_minutes(cfg.utc_offset_minutes);
        Ok(Self {
            screen: Screen::List(ListView::new(dates)),
            cfg,
            fetcher,
            dates,
            nav: HistoryNavigator::default(),
            html: false,
            telemetry,
        })
    }

    fn print(&self) {
        let out = match (&self.screen, self.html) {
            (Screen::List(v), false) => render::text::list_page(&v.page()),
            (Screen::List(v), true) => render::html::list_page(&v.page()),
            (Screen::Detail(v), false) => render::text::detail_page(&v.page()),
            (Screen::Detail(v), true) => render::html::detail_page(&v.page()),
        };
        println!("{out}");
    }

    /// Tear down the current view and mount the one for the current route.
    async fn enter_current(&mut self) {
        match &mut self.screen {
            Screen::List(v) => v.unmount(),
            Screen::Detail(v) => v.unmount(),
        }
        match self.nav.current().clone() {
            Route::List => {
                let mut view = ListView::new(self.dates);
                let ticket = view.mount(RowViewport::new(self.cfg.viewport_rows));
                let items = load_news(self.fetcher.as_ref()).await;
                view.finish_load(ticket, items);
                self.screen = Screen::List(view);
                self.pump_scroll();
            }
            Route::Detail(id) => {
                let mut view = DetailView::new(id, self.dates);
                let ticket = view.mount();
                self.screen = Screen::Detail(view);
                self.print();
                let items = load_news(self.fetcher.as_ref()).await;
                if let Screen::Detail(v) = &mut self.screen {
                    v.finish_load(ticket, items);
                }
            }
        }
        self.print();
    }

    /// Feed viewport changes to the scroll controller until the sentinel settles.
    fn pump_scroll(&mut self) {
        let Screen::List(view) = &mut self.screen else {
            return;
        };
        loop {
            let rendered = view.visible().len();
            let entries = match view.observer_mut() {
                Some(vp) => vp.entries(rendered),
                None => break,
            };
            if entries.is_empty() || !view.on_intersection(&entries) {
                break;
            }
        }
    }

    async fn navigate(&mut self, route: Route) {
        self.nav.push(route);
        self.enter_current().await;
    }

    /// Returns false when the session should end.
    async fn handle(&mut self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let arg = parts.next();

        match cmd {
            "" => {}
            "quit" | "exit" | "q" => return false,
            "help" => println!("{HELP}"),
            "html" => {
                self.html = !self.html;
                self.print();
            }
            "stats" => print!("{}", self.telemetry.render()),
            "back" => {
                if self.nav.back().is_some() {
                    self.enter_current().await;
                } else {
                    println!("(no previous view)");
                }
            }
            "go" => match arg.and_then(Route::parse) {
                Some(route) => self.navigate(route).await,
                None => println!("unknown path"),
            },
            "tab" | "source" | "scroll" | "open" => self.handle_list(cmd, arg).await,
            other => println!("unknown command `{other}` (try `help`)"),
        }
        true
    }

    async fn handle_list(&mut self, cmd: &str, arg: Option<&str>) {
        let Screen::List(view) = &mut self.screen else {
            println!("not available on the detail view (use `back`)");
            return;
        };
        match cmd {
            "tab" => {
                let Some(c) = arg.and_then(Category::parse) else {
                    println!("unknown category");
                    return;
                };
                view.set_category(c);
                rewind(view);
            }
            "source" => {
                let Some(s) = arg.and_then(SourceFilter::parse) else {
                    println!("unknown source");
                    return;
                };
                view.set_source(s);
                rewind(view);
            }
            "scroll" => {
                let rows = arg
                    .and_then(|a| a.parse::<usize>().ok())
                    .unwrap_or(self.cfg.viewport_rows);
                if let Some(vp) = view.observer_mut() {
                    vp.scroll_by(rows);
                }
            }
            "open" => {
                let route = arg
                    .and_then(|a| a.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| view.open(i));
                match route {
                    Some(r) => self.navigate(r).await,
                    None => println!("no such card"),
                }
                return;
            }
            _ => return,
        }
        self.pump_scroll();
        self.print();
    }
}

/// Filter changed: new first page, viewport back to its top.
fn rewind(view: &mut ListView<RowViewport>) {
    if let Some(vp) = view.observer_mut() {
        vp.reset();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = AppConfig::load_default()?;
    tracing::info!(resource = %cfg.resource, "grid-news starting");

    let start = std::env::args()
        .nth(1)
        .and_then(|p| Route::parse(&p))
        .unwrap_or(Route::List);

    let telemetry = Telemetry::install()?;
    let mut app = App::new(cfg, telemetry)?;
    app.nav = HistoryNavigator::new(start);
    app.enter_current().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !app.handle(line.trim()).await {
            break;
        }
    }
    Ok(())
}
