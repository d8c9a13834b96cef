/// Prints a timestamped progress line to stdout.
/// Pass a starting `DateTime<Local>` as the first argument to also print
/// the seconds elapsed since it.
/// ```ignore
/// info_time!("visiting {url}");
/// let start = Local::now();
/// info_time!(start, "collected {} records", n);
/// ```
#[macro_export]
macro_rules! info_time {
    ($fmt:literal $($arg:tt)*) => {{
        let now = ::chrono::Local::now();
        println!("{} {}", now.format("%H:%M:%S%.3f"), format!($fmt $($arg)*));
    }};
    ($start:expr, $fmt:literal $($arg:tt)*) => {{
        let now = ::chrono::Local::now();
        let elapsed = (now - $start).num_milliseconds() as f64 / 1000.0;
        println!(
            "{} {} [{:.3}s]",
            now.format("%H:%M:%S%.3f"),
            format!($fmt $($arg)*),
            elapsed
        );
    }};
}

/// Prints a timestamped diagnostic to stderr.
#[macro_export]
macro_rules! warn_time {
    ($fmt:literal $($arg:tt)*) => {{
        let now = ::chrono::Local::now();
        eprintln!("{} warning: {}", now.format("%H:%M:%S%.3f"), format!($fmt $($arg)*));
    }};
}
