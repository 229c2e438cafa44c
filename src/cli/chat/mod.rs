//! Chat command - answer queries read from stdin until `exit`, `quit` or EOF

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::warn;

use crate::domain::QueryAgent;

use super::ask::render;

pub async fn run() -> anyhow::Result<()> {
    let (_, agent) = super::bootstrap().await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    chat_loop(&agent, stdin, stdout).await
}

fn is_exit_command(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "exit" | "quit")
}

/// Failures of a single query are printed and the loop goes on
pub async fn chat_loop<R, W>(agent: &QueryAgent, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        output.write_all(b"\nQuery> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if is_exit_command(query) {
            break;
        }

        let text = match agent.run(query).await {
            Ok(result) => render(&result),
            Err(e) => {
                warn!(error = %e, "Query failed");
                format!("Error: {}", e)
            }
        };

        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }

    output.write_all(b"\nGoodbye!\n").await?;
    output.flush().await?;

    Ok(())
}
