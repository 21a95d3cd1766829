//! Positional pairing of titles with schedule boundaries.

use chrono::{DateTime, Utc};
use tracing::debug;
use xmltv::Programme;

/// Pairs titles with consecutive schedule boundaries.
///
/// The i-th title runs from `boundaries[i]` to `boundaries[i + 1]`, so a
/// channel with `N` titles and `M` boundaries yields `min(N, M - 1)`
/// programmes. Whatever is left over on either side is dropped.
pub fn correlate(
    channel_id: &str,
    titles: &[String],
    boundaries: &[DateTime<Utc>],
) -> Vec<Programme> {
    let programmes: Vec<Programme> = titles
        .iter()
        .zip(boundaries.windows(2))
        .map(|(title, interval)| Programme {
            channel: channel_id.to_string(),
            start: interval[0],
            stop: interval[1],
            title: title.clone(),
        })
        .collect();

    let intervals = boundaries.len().saturating_sub(1);
    if titles.len() != intervals {
        debug!(
            channel = channel_id,
            titles = titles.len(),
            boundaries = boundaries.len(),
            programmes = programmes.len(),
            "title and schedule counts differ, extra entries dropped"
        );
    }

    programmes
}
