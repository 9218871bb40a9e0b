//! Tarot Draw entry point
//!
//! The browser build starts from `web::start`; natively this binary runs
//! auto-play sessions headlessly and reports what they paid.
//!
//! Usage: cargo run --release -- --sessions 1000 --seed 7

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use tarot_draw::engine::StopReason;
    use tarot_draw::headless::HeadlessDriver;
    use tarot_draw::persistence::{FileStore, MemoryStore, Store};
    use tarot_draw::stats::SessionStats;
    use tarot_draw::{Engine, EngineConfig, MultiplierTable, format_amount};

    #[derive(Parser, Debug)]
    #[command(name = "tarot-draw")]
    #[command(about = "Run Tarot Draw auto-play sessions without a renderer")]
    struct Args {
        /// Auto-play sessions to run
        #[arg(short = 'n', long, default_value_t = 100)]
        sessions: u32,

        /// RNG seed (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Multiplier table JSON (bundled table when omitted)
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// Engine config JSON (defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Persist bet and balance to this file between runs
        #[arg(long)]
        state: Option<PathBuf>,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let config = match &args.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                EngineConfig::from_json(&json)?
            }
            None => EngineConfig::default(),
        };
        let table = match &args.table {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading table {}", path.display()))?;
                MultiplierTable::from_json(&json)?
            }
            None => MultiplierTable::bundled()?,
        };
        let seed = args.seed.unwrap_or_else(rand::random);

        log::info!(
            "Table: {} entries, mean multiplier {:.4}",
            table.len(),
            table.mean_value()
        );
        for row in table.pay_table() {
            log::debug!("  x{} {:?} {:.2}%", row.value, row.rarity, row.percent);
        }
        log::info!("Seed: {seed}");

        let store: Box<dyn Store> = match &args.state {
            Some(path) => Box::new(FileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        let engine = Engine::seeded(config, table, store, seed)?;
        let start_balance = engine.balance();
        let mut driver = HeadlessDriver::new(engine);

        let mut played = 0;
        for session in 0..args.sessions {
            let reason = match driver.run_auto_play() {
                Some(reason) => reason,
                None => {
                    log::warn!("Session {} could not start: balance too low", session + 1);
                    break;
                }
            };
            played += 1;
            log::debug!(
                "Session {} ended ({reason:?}), balance {}",
                session + 1,
                format_amount(driver.engine().balance())
            );
            if reason == StopReason::Unaffordable {
                break;
            }
            driver.clear_history();
        }

        report(driver.stats(), played, start_balance, driver.engine().balance());
        Ok(())
    }

    fn report(stats: &SessionStats, sessions: u32, start: f64, end: f64) {
        log::info!("Sessions played: {sessions}");
        log::info!(
            "Rounds: {} (wins {}, all dead {})",
            stats.rounds,
            stats.wins,
            stats.all_dead
        );
        log::info!(
            "Staked {} / paid {} / net {}",
            format_amount(stats.total_staked),
            format_amount(stats.total_paid),
            format_amount(stats.net())
        );
        if let Some(rtp) = stats.rtp() {
            log::info!("Observed RTP: {:.2}%", rtp * 100.0);
        }
        if let Some(win) = stats.biggest_win() {
            log::info!(
                "Biggest win: {} (x{} on bet {}, round {})",
                format_amount(win.payout),
                win.product,
                format_amount(win.bet),
                win.round
            );
        }
        log::info!("Balance: {} -> {}", format_amount(start), format_amount(end));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = native::run() {
        log::error!("tarot-draw failed: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
