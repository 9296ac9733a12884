use common::{RawAddress, RegistrationClient};
use tracing::{info, warn};

use crate::container::{AddressState, SessionScope};

#[derive(Debug, PartialEq, Eq)]
pub enum LocateOutcome {
    Located,
    Blank,
    Failed(String),
}

/// Resolves the typed address through the backend and stores it in the session.
///
/// The stored address is only replaced on success, a failed lookup keeps whatever the
/// session located before.
pub async fn locate(
    client: &dyn RegistrationClient,
    session: &SessionScope,
    raw: RawAddress,
) -> LocateOutcome {
    if raw.is_blank() {
        return LocateOutcome::Blank;
    }

    match client.locate(&raw).await.into_result() {
        Ok(location) => {
            info!(
                "Located address {} in {} county",
                location.id, location.locale.county
            );
            session.address().set(AddressState::located(raw, location));
            LocateOutcome::Located
        }
        Err(error) => {
            warn!("Address lookup failed: {error}");
            LocateOutcome::Failed(error)
        }
    }
}
