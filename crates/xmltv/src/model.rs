use chrono::{DateTime, Utc};

/// `strftime` pattern for XMLTV timestamps (`YYYYMMDDhhmmss`, no offset).
pub const XMLTV_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Formats a UTC instant as an XMLTV timestamp.
pub fn format_time(time: &DateTime<Utc>) -> String {
    time.format(XMLTV_TIME_FORMAT).to_string()
}

/// A `<channel>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub display_name: String,
}

impl Channel {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// A `<programme>` element. `channel` refers to a [`Channel::id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Programme {
    pub channel: String,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
    pub title: String,
}

/// The `<tv>` document root.
///
/// Channels are written before programmes, each list in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tv {
    pub channels: Vec<Channel>,
    pub programmes: Vec<Programme>,
}

impl Tv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() && self.programmes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_time() {
        let time = Utc.with_ymd_and_hms(2011, 3, 7, 5, 9, 0).unwrap();
        assert_eq!(format_time(&time), "20110307050900");
    }

    #[test]
    fn test_format_time_pads_early_years() {
        let time = Utc.with_ymd_and_hms(1601, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(format_time(&time), "16010101000001");
    }
}
