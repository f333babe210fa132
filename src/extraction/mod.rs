pub mod command;
pub mod reply;

pub use command::ModelCommand;
pub use reply::{split_reply, ProductMention, ReplyOutcome, NO_PRODUCTS_SENTINEL};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with code {code:?}: {stderr}")]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("i/o error talking to {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub fn build_prompt(template: &str, summary: &str) -> String {
    format!("{}\n\n{}", template.trim_end(), summary)
}
