//! Interactive chat session over stdin/stdout.
//!
//! Every input line is one inbound message from a fixed owner. Replies are
//! printed followed by the keyboard buttons, if any. Ignored messages print
//! nothing.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::context::AppContext;
use crate::dispatcher::{Dispatcher, InboundMessage};
use crate::models::{OwnerId, Reply};

pub async fn run_stdio_chat(ctx: AppContext, owner_id: OwnerId) -> Result<()> {
    tracing::info!(owner = %owner_id, "Starting chat session via stdio");

    let dispatcher = ctx.dispatcher();
    run_session(
        &dispatcher,
        &owner_id,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    tracing::info!("Chat session ended");
    Ok(())
}

/// Feed lines from `input` to the dispatcher until end of input.
pub async fn run_session<R, W>(
    dispatcher: &Dispatcher,
    owner_id: &OwnerId,
    input: R,
    mut output: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let message = InboundMessage::new(owner_id.clone(), line);
        if let Some(reply) = dispatcher.dispatch(&message).await {
            output.write_all(render(&reply).as_bytes()).await?;
            output.flush().await?;
        }
    }
    Ok(())
}

fn render(reply: &Reply) -> String {
    let mut out = reply.text.trim_end().to_string();
    out.push('\n');
    if reply.has_keyboard() {
        out.push_str(&format!("[{}]\n", reply.keyboard.join("] [")));
    }
    out
}
