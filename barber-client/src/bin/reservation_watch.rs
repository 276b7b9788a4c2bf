//! reservation-watch - follow a BarberCut account from the terminal
//!
//! Signs in with `BARBERCUT_USERNAME` / `BARBERCUT_PASSWORD` and polls until
//! Ctrl-C: clients see their reservation status changes, barbers their
//! pending request count.
//!
//! `LOG_JSON=1` switches to JSON log lines.

use anyhow::{Context, bail};
use barber_client::{ClientConfig, PendingWatcher, ReservationWatcher, Session, UserRole};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenv::dotenv();

    let json = std::env::var("LOG_JSON").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    barber_client::logger::init_logger("barber_client=info,reservation_watch=info", json)?;

    let config = ClientConfig::from_env();
    let username = std::env::var("BARBERCUT_USERNAME").context("BARBERCUT_USERNAME is not set")?;
    let password = std::env::var("BARBERCUT_PASSWORD").context("BARBERCUT_PASSWORD is not set")?;

    tracing::info!(base_url = %config.base_url, "Starting reservation-watch");
    let mut session = Session::new(config)?;
    let profile = session
        .sign_in(&username, &password, None)
        .await
        .context("sign in failed")?
        .clone();

    let handle = match profile.role {
        UserRole::Client => {
            let watcher = Arc::new(ReservationWatcher::new());
            session.watch_reservations(&watcher)?
        }
        UserRole::Barber => {
            let watcher = Arc::new(PendingWatcher::new());
            session.watch_pending(&watcher)?
        }
        UserRole::Admin => bail!("admin accounts have nothing to watch"),
    };

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    handle.shutdown().await;
    session.sign_out();
    Ok(())
}
