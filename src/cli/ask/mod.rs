//! Ask command - answer one query and exit

use clap::Args;

use crate::domain::AgentResult;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Print the full result as JSON instead of label and answer
    #[arg(long)]
    pub json: bool,
}

impl AskArgs {
    /// Words given on the command line, joined back into one query
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let query = args.query_text();
    if query.trim().is_empty() {
        anyhow::bail!("query must not be empty");
    }

    let (_, agent) = super::bootstrap().await?;
    let result = agent.run(query.trim()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render(&result));
    }

    Ok(())
}

/// Human-readable block: routing label, then the answer
pub fn render(result: &AgentResult) -> String {
    format!(
        "Routing decision: {}\n\n{}",
        result.routing_decision().label(),
        result.final_answer()
    )
}
