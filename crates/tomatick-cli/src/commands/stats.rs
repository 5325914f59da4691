use clap::Subcommand;
use tomatick_core::{Store, TimerStats};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Print the statistics record
    Show,
    /// Zero out the statistics record
    Reset,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    match action {
        StatsAction::Show => {
            let mut stats = store.load_stats();
            stats.reconcile_day(chrono::Local::now().date_naive());
            store.save_stats(&stats)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Reset => {
            store.save_stats(&TimerStats::default())?;
            println!("stats reset");
        }
    }
    Ok(())
}
