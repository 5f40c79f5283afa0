//! Store maintenance commands.

use tracing::info;

use mediflux_booking::error::Result;
use mediflux_booking::state::BookingContext;

/// Report the seeded store. Seeding itself happens when the store is opened.
pub fn init(ctx: &BookingContext) {
    let data = ctx.data();
    info!(
        "Store ready: {} users, {} doctors, {} appointments",
        data.users().all().len(),
        data.doctors().all().len(),
        data.appointments().all().len(),
    );
    if let Some(path) = &ctx.config().store_path {
        info!("Backed by {}", path.display());
    }
}

/// Drop every collection and seed the fixtures again. The session is kept.
///
/// # Errors
///
/// Returns an error if the fixtures cannot be written.
pub fn reset(ctx: &BookingContext) -> Result<()> {
    ctx.data().reset_data()?;
    info!("Store reset to fixture data.");
    init(ctx);
    Ok(())
}
