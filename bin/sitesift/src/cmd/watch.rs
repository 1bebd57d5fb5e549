//! Watch command - rebuild the index when posts change

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use color_eyre::eyre::{Result, WrapErr};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind};
use sitesift_core::Debouncer;
use sitesift_search::ArticleCollector;
use tokio::{
    sync::mpsc,
    time::{Instant, sleep_until},
};

use super::{
    index::{build, print_stats},
    index_path, load_config,
};

/// Quiet period after the last file event before rebuilding.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Run the watch command.
pub async fn run(config_path: &Path) -> Result<()> {
    tracing::info!(?config_path, "Starting watch mode");

    let config = load_config(config_path)?;
    let posts_dir = PathBuf::from(&config.content.posts_dir);
    let output = index_path(None, &config);
    let collector = ArticleCollector::from_config(&config.content);

    tracing::info!("Running initial build...");
    print_stats(&build(&collector, &output)?);

    let (tx, rx) = mpsc::channel::<()>(16);

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                let changed = matches!(
                    event.kind,
                    EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Name(_))
                        | EventKind::Create(_)
                        | EventKind::Remove(_)
                );
                if changed && event.paths.iter().any(|p| is_post(p)) {
                    let _ = tx.blocking_send(());
                }
            }
        },
        notify::Config::default(),
    )
    .wrap_err("Failed to create file watcher")?;

    watcher
        .watch(&posts_dir, RecursiveMode::Recursive)
        .wrap_err_with(|| format!("Failed to watch {}", posts_dir.display()))?;

    println!();
    println!("  Watching {} for changes", posts_dir.display());
    println!("  Press Ctrl+C to stop");
    println!();

    let rebuild = || {
        println!("  Posts changed, rebuilding index...");
        match build(&collector, &output) {
            Ok(stats) => print_stats(&stats),
            Err(e) => {
                tracing::error!("Rebuild failed: {e}");
                eprintln!("  ✗ Rebuild failed: {e}");
            }
        }
    };

    tokio::select! {
        rebuilds = debounce_events(rx, DEBOUNCE, rebuild) => {
            tracing::debug!(rebuilds, "File watcher stopped");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.wrap_err("Failed to listen for Ctrl+C")?;
        }
    }

    drop(watcher);
    Ok(())
}

fn is_post(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// Call `on_quiet` once per burst of events, after `window` without events.
///
/// Returns the number of calls once the sender side closes. A burst still
/// pending at that point is flushed.
pub async fn debounce_events<F>(
    mut rx: mpsc::Receiver<()>,
    window: Duration,
    mut on_quiet: F,
) -> usize
where
    F: FnMut(),
{
    let mut debouncer: Debouncer<(), Instant> = Debouncer::new(window);
    let mut fired = 0;

    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            event = rx.recv() => match event {
                Some(()) => {
                    debouncer.push((), Instant::now());
                }
                None => break,
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if debouncer.poll(Instant::now()).is_some() {
                    on_quiet();
                    fired += 1;
                }
            }
        }
    }

    if debouncer.flush().is_some() {
        on_quiet();
        fired += 1;
    }

    fired
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[tokio::test(start_paused = true)]
    async fn test_bursts_collapse_into_one_rebuild_each() {
        let (tx, rx) = mpsc::channel(16);
        let mut rebuilds = 0;

        let events = async move {
            for _ in 0..5 {
                tx.send(()).await.expect("send");
                sleep(ms(50)).await;
            }
            sleep(ms(500)).await;
            tx.send(()).await.expect("send");
            sleep(ms(500)).await;
        };

        let (fired, ()) = tokio::join!(debounce_events(rx, ms(200), || rebuilds += 1), events);

        assert_eq!(fired, 2);
        assert_eq!(rebuilds, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_burst_flushed_on_close() {
        let (tx, rx) = mpsc::channel(16);
        tx.send(()).await.expect("send");
        drop(tx);

        assert_eq!(debounce_events(rx, ms(200), || {}).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_events_no_rebuild() {
        let (tx, rx) = mpsc::channel::<()>(16);
        drop(tx);

        assert_eq!(debounce_events(rx, ms(200), || {}).await, 0);
    }

    #[test]
    fn test_only_markdown_triggers() {
        assert!(is_post(Path::new("_posts/2024-01-01-hello.md")));
        assert!(!is_post(Path::new("_posts/.hello.md.swp")));
        assert!(!is_post(Path::new("search.json")));
    }
}
