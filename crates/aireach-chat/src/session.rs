//! One chat session over any line-oriented reader/writer pair.

use aireach_core::{ChatConfig, ReplyResolver};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const USER_PROMPT: &str = "you> ";
const BOT_PREFIX: &str = "bot> ";

/// Bot line with continuation lines indented under the prefix.
pub fn render_bot(text: &str) -> String {
    let indent = " ".repeat(BOT_PREFIX.len());
    let mut out = String::with_capacity(text.len() + BOT_PREFIX.len() + 1);
    for (i, line) in text.lines().enumerate() {
        out.push_str(if i == 0 { BOT_PREFIX } else { indent.as_str() });
        out.push_str(line);
        out.push('\n');
    }
    if out.is_empty() {
        out.push_str(BOT_PREFIX.trim_end());
        out.push('\n');
    }
    out
}

/// Greet, then answer each non-blank line until EOF or the exit command.
/// Returns the number of replies sent.
pub async fn run<R, W>(config: &ChatConfig, resolver: &ReplyResolver, input: R, mut out: W) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    out.write_all(render_bot(&config.greeting).as_bytes()).await?;
    out.write_all(USER_PROMPT.as_bytes()).await?;
    out.flush().await?;

    let delay = config.thinking_delay();
    let mut lines = input.lines();
    let mut replies = 0;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            out.write_all(USER_PROMPT.as_bytes()).await?;
            out.flush().await?;
            continue;
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let reply = resolver.reply(Some(line.as_str()));
        out.write_all(render_bot(reply).as_bytes()).await?;
        replies += 1;

        if config.is_exit(&line) {
            out.flush().await?;
            tracing::info!(replies, "exit command received; ending chat");
            return Ok(replies);
        }
        out.write_all(USER_PROMPT.as_bytes()).await?;
        out.flush().await?;
    }
    tracing::debug!(replies, "input closed");
    Ok(replies)
}
