use battery_cycle_monitor::prelude::*;
use chrono::Local;
use std::env;

fn print_optional<T: std::fmt::Display>(label: &str, value: Option<T>) {
    match value {
        Some(v) => println!("  {:<28} {}", label, v),
        None => println!("  {:<28} N/A", label),
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <charge_log.csv>", args[0]);
        eprintln!();
        eprintln!("Expected columns: date,battery_saver,start_percent,end_percent");
        std::process::exit(1);
    }

    let log = ChargeLog::load(&args[1])?;
    println!("Loaded {} charge events from {}", log.len(), log.path().display());

    for event in log.events() {
        println!(
            "  {}  saver={}  {:>3}% -> {:>3}%  (+{}%, next in {} days)",
            event.date(),
            u8::from(event.battery_saver()),
            event.start_percent(),
            event.end_percent(),
            event.percent_delta(),
            event
                .days_until_next()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "?".to_string()),
        );
    }

    let estimator = CycleEstimator::new(&log);
    let today = Local::now().date_naive();

    println!();
    println!("Statistics:");
    println!("  {:<28} {:.2}", "Total cycles:", estimator.total_cycles());
    println!("  {:<28} {}", "Days recorded:", estimator.days_elapsed()?);

    match estimator.daily_cycle_rate() {
        Ok(rate) => println!("  {:<28} {:.2}", "Cycles per day:", rate),
        Err(CycleError::DivisionByZero(_)) => {
            println!("  Not enough days recorded to compute a daily rate.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    println!();
    println!("Projections ({} cycles):", CYCLE_THRESHOLD);
    println!("  {:<28} {:.2}", "Cycles remaining:", estimator.cycles_remaining());
    print_optional("Days remaining:", estimator.days_remaining().ok());
    print_optional(
        "Projected date:",
        estimator.projected_threshold_date(today).ok(),
    );
    print_optional(
        "Cycles over next year:",
        estimator.projected_cycles_over_horizon(1, today).ok(),
    );

    Ok(())
}
