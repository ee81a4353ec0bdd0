use crate::error::ShellError;

/// Issue a blocking GET and return the response body as text.
///
/// Called only from background tasks, so a slow or unreachable host blocks
/// its own task and nothing else. There is deliberately no timeout or
/// cancellation; see the concurrency contract in [`crate::task`].
pub fn get(url: &str) -> Result<String, ShellError> {
    let body = reqwest::blocking::get(url)?.text()?;
    Ok(body)
}
