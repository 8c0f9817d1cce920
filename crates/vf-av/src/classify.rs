//! Stream-type classification.

/// Marker substring of an HLS playlist manifest.
const HLS_MARKER: &str = ".m3u8";

/// Whether `url` points at a segmented (HLS) stream.
///
/// This is a plain substring test for `.m3u8`, not a manifest parse. A
/// progressive URL that happens to carry `.m3u8` in its query string is
/// classified as segmented; the failure path tolerates that.
pub fn is_segmented_stream(url: &str) -> bool {
    url.contains(HLS_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_urls_are_segmented() {
        assert!(is_segmented_stream("https://cdn.example/live/index.m3u8"));
        assert!(is_segmented_stream("https://cdn.example/vod/master.m3u8?token=abc"));
        assert!(is_segmented_stream("http://host/a.m3u8/segment"));
    }

    #[test]
    fn progressive_urls_are_not_segmented() {
        assert!(!is_segmented_stream("https://cdn.example/movie.mp4"));
        assert!(!is_segmented_stream("https://cdn.example/playlist.m3u"));
        assert!(!is_segmented_stream("https://cdn.example/index.M3U8"));
        assert!(!is_segmented_stream(""));
    }

    #[test]
    fn marker_in_query_string_counts() {
        assert!(is_segmented_stream(
            "https://cdn.example/movie.mp4?source=backup.m3u8"
        ));
    }
}
