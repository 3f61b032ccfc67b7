use std::fmt;

/// Processing mode a detection task is bound to for its entire lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunningMode {
    /// Detection on independent single images. Synchronous, no timestamps.
    #[default]
    Image,
    /// Detection on the decoded frames of a video, in playback order.
    Video,
    /// Detection on a live feed. Submissions return immediately; results
    /// reach the registered callback in submission order.
    LiveStream,
}

impl fmt::Display for RunningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunningMode::Image => "IMAGE",
            RunningMode::Video => "VIDEO",
            RunningMode::LiveStream => "LIVE_STREAM",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_image() {
        assert_eq!(RunningMode::default(), RunningMode::Image);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(RunningMode::Image.to_string(), "IMAGE");
        assert_eq!(RunningMode::Video.to_string(), "VIDEO");
        assert_eq!(RunningMode::LiveStream.to_string(), "LIVE_STREAM");
    }
}
