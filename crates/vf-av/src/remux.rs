//! HLS-to-MP4 remux via ffmpeg.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::command::ToolCommand;
use crate::models::ProcessFailure;
use crate::process::ProcessSpawner;

/// Build the ffmpeg invocation that remuxes `source_url` into `output`.
///
/// Streams are copied, not re-encoded. ADTS-framed AAC from the HLS segments
/// is rewrapped with `aac_adtstoasc` because MP4 rejects ADTS framing, and
/// `+faststart` moves the index to the front for progressive playback.
pub fn hls_remux_command(
    ffmpeg: &Path,
    source_url: &str,
    output: &Path,
    timeout: Duration,
) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
    cmd.timeout(timeout);
    cmd.args(["-nostdin", "-i"]);
    cmd.arg(source_url);
    cmd.args(["-c", "copy"]);
    cmd.args(["-bsf:a", "aac_adtstoasc"]);
    cmd.args(["-movflags", "+faststart"]);
    cmd.arg("-y");
    cmd.arg(output.to_string_lossy().as_ref());
    cmd
}

/// Remux `source_url` into `output`, returning the output path on success.
///
/// The output file may or may not exist after a failure.
pub async fn remux_hls(
    spawner: &dyn ProcessSpawner,
    ffmpeg: &Path,
    source_url: &str,
    output: &Path,
    timeout: Duration,
) -> Result<PathBuf, ProcessFailure> {
    tracing::info!("remux {source_url} -> {:?}", output);

    hls_remux_command(ffmpeg, source_url, output, timeout)
        .execute(spawner)
        .await?;

    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_template() {
        let cmd = hls_remux_command(
            Path::new("/usr/bin/ffmpeg"),
            "https://cdn.example/live/index.m3u8",
            Path::new("/tmp/vidfetch/abc-My Clip.mp4"),
            Duration::from_secs(600),
        );
        assert_eq!(
            cmd.get_args(),
            [
                "-nostdin",
                "-i",
                "https://cdn.example/live/index.m3u8",
                "-c",
                "copy",
                "-bsf:a",
                "aac_adtstoasc",
                "-movflags",
                "+faststart",
                "-y",
                "/tmp/vidfetch/abc-My Clip.mp4",
            ]
        );
    }

    #[test]
    fn url_is_a_single_argument() {
        let url = "https://cdn.example/a b.m3u8?x=\"1\"&y=$(id)";
        let cmd = hls_remux_command(
            Path::new("ffmpeg"),
            url,
            Path::new("/tmp/out.mp4"),
            Duration::from_secs(1),
        );
        let args = cmd.get_args();
        let i = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[i + 1], url);
    }
}
