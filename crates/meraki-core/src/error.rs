use thiserror::Error;

use crate::chart::ChartError;

/// Errors surfaced by operations that combine a remote fetch with local
/// work (chart rendering). Pure fetch operations return
/// [`meraki_api::Error`] directly.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] meraki_api::Error),

    #[error(transparent)]
    Chart(#[from] ChartError),
}
