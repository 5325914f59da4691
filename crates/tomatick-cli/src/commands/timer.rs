use tokio::sync::broadcast::error::RecvError;
use tomatick_core::{Event, Store, TimerService};

/// Drive a live engine in the foreground until `sessions` countdowns
/// complete or Ctrl-C lands. Events stream to stdout as JSON lines.
pub async fn run(sessions: u32) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let service = TimerService::new(store);
    let mut events = service.subscribe();

    service.start().await;

    let mut completed = 0;
    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        println!("{}", serde_json::to_string(&event)?);
                        if matches!(
                            event,
                            Event::FocusCompleted { .. } | Event::BreakCompleted { .. }
                        ) {
                            completed += 1;
                            if completed >= sessions {
                                break;
                            }
                            // The engine sits stopped on the next mode.
                            service.start().await;
                        }
                    }
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    service.shutdown().await;
    let snapshot = service.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Print a fresh engine snapshot as JSON.
pub async fn status() -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let service = TimerService::new(store);
    let snapshot = service.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
