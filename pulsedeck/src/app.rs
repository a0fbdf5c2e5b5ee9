//! App state and main loop: input handling, feed updates, history, drawing.

use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::{sync::watch, time::sleep};

use crate::config::StreamConfig;
use crate::conn::{ConnectionManager, Feed};
use crate::transport::WsTransport;
use crate::ui::{
    cpu::draw_cpu, deploy::draw_deploy, disk::draw_disk, header::draw_header, mem::draw_mem,
    net::draw_net,
};
use crate::ui::deploy::DeployLog;
use crate::window::RollingWindow;

pub struct App {
    feed: Feed,
    window: RollingWindow,
    deploy: DeployLog,
    seen_seq: u64,
    should_quit: bool,
}

impl App {
    pub fn new(cfg: &StreamConfig) -> Self {
        Self {
            feed: Feed::default(),
            window: RollingWindow::new(cfg.window_capacity, cfg.throttle),
            deploy: DeployLog::new(),
            seen_seq: 0,
            should_quit: false,
        }
    }

    pub async fn run(&mut self, url: &str, cfg: StreamConfig) -> anyhow::Result<()> {
        let mut manager = ConnectionManager::new(Arc::new(WsTransport::new(url)), cfg);
        let mut feed_rx = manager.subscribe();
        manager.start();

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let res = self.event_loop(&mut terminal, &mut feed_rx).await;

        // Teardown: stop cancels any pending reconnect before we leave.
        manager.stop();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        feed_rx: &mut watch::Receiver<Feed>,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    if matches!(
                        k.code,
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                    ) {
                        self.should_quit = true;
                    }
                }
            }
            if self.should_quit {
                break;
            }

            // Pull the latest published feed; only a freshly accepted
            // snapshot (seq bump) feeds the rolling window.
            if feed_rx.has_changed().unwrap_or(false) {
                let feed = feed_rx.borrow_and_update().clone();
                if feed.seq != self.seen_seq {
                    if let Some(snap) = feed.latest.as_ref() {
                        self.window.on_snapshot(snap, Instant::now());
                    }
                    self.seen_seq = feed.seq;
                }
                self.feed = feed;
            }
            self.deploy.tick(Instant::now());

            terminal.draw(|f| self.draw(f))?;

            // Tick rate
            sleep(Duration::from_millis(250)).await;
        }

        Ok(())
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(3), // cpu / mem / disk gauges
                Constraint::Length(6), // network sparkline
                Constraint::Min(8),    // deployment log
            ])
            .split(area);

        draw_header(f, rows[0], &self.feed);

        let gauges = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[1]);

        let m = self.feed.latest.as_ref();
        draw_cpu(f, gauges[0], m);
        draw_mem(f, gauges[1], m);
        draw_disk(f, gauges[2], m);

        draw_net(f, rows[2], m, &self.window.render_view());
        draw_deploy(f, rows[3], &self.deploy);
    }
}
