use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use tabclust_service::AppContext;

use crate::handlers::handle_line;

/// Serves line-delimited JSON commands on stdin/stdout until stdin closes.
pub async fn run_command_server(ctx: &AppContext) -> std::io::Result<()> {
    tracing::info!("Command server starting on stdio");
    serve(ctx, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// One response line per non-blank request line, in request order.
pub async fn serve<R, W>(ctx: &AppContext, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await? {
        let Some(response) = handle_line(ctx, &line).await else {
            continue;
        };
        let json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Response serialization error: {}", e);
                continue;
            },
        };
        if let Err(e) = writer.write_all(format!("{json}\n").as_bytes()).await {
            tracing::error!("stdout write error: {}", e);
            return Err(e);
        }
        if let Err(e) = writer.flush().await {
            tracing::error!("stdout flush error: {}", e);
            return Err(e);
        }
        handled = handled.saturating_add(1);
    }

    tracing::info!(handled, "Command server input closed");
    Ok(())
}
