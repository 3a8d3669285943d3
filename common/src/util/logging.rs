use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{info, LevelFilter};
use std::future::Future;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static MULTI: OnceLock<MultiProgress> = OnceLock::new();

pub fn initialize_logging(log_level: LevelFilter) {
    let logger = env_logger::builder()
        .filter_level(log_level)
        .parse_default_env() // Allow overriding log level through RUST_LOG env var
        .build();

    let multi = MultiProgress::new();

    let wrapper = LogWrapper::new(multi.clone(), logger);
    if wrapper.try_init().is_ok() {
        let _ = MULTI.set(multi);
    }
}

fn spinner(task_desc: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner()
        .with_message(format!("{}...", task_desc))
        .with_style(
            ProgressStyle::with_template("{spinner:.white} [{elapsed:.green}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
        );
    pb.enable_steady_tick(Duration::from_millis(100));

    // Set up connection with log library so that progress bars don't jump around.
    // Without initialized logging (e.g. in tests) the spinner is drawn on its own.
    MULTI.get().map(|multi| multi.add(pb.clone())).unwrap_or(pb)
}

fn finish(target: &str, task_desc: &str, pb: ProgressBar, start_time: Instant) {
    pb.finish_and_clear();
    if let Some(multi) = MULTI.get() {
        multi.remove(&pb);
    }
    let elapsed = indicatif::HumanDuration(start_time.elapsed());
    info!(target: target, "{} finished (took {})", task_desc, elapsed);
}

pub fn run_with_spinner<'a, F, Out>(
    target: &'a str, task_desc: &'a str, function: F,
) -> Out where
    F: FnOnce() -> Out,
{
    let start_time = Instant::now();
    let pb = spinner(task_desc);

    let out = function();

    finish(target, task_desc, pb, start_time);
    out
}

pub async fn run_with_spinner_async<'a, F, Fut, Out>(
    target: &'a str, task_desc: &'a str, function: F,
) -> Out where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Out>,
{
    let start_time = Instant::now();
    let pb = spinner(task_desc);

    let out = function().await;

    finish(target, task_desc, pb, start_time);
    out
}
