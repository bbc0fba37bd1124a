use clap::Subcommand;
use model::{
    catalog::source::DatabaseKind,
    core::identifiers::{ExecutionId, JobId, SourceId},
};

#[derive(Subcommand)]
pub enum Commands {
    /// Run every job of a source, one after another
    Run {
        #[arg(long, help = "Source ID whose jobs should run")]
        source: SourceId,

        #[arg(long, help = "Name recorded as the executor of each job")]
        actor: String,

        #[arg(long, help = "Print the batch report as JSON instead of a table")]
        json: bool,

        #[arg(
            long,
            help = "If specified, writes the JSON report to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Show one execution record
    Record {
        #[arg(long, help = "Execution record ID")]
        id: ExecutionId,

        #[arg(long, help = "Print the record as JSON instead of a table")]
        json: bool,
    },
    /// List execution records of a job, newest first
    History {
        #[arg(long, help = "Job ID")]
        job: JobId,
    },
    /// List active sources
    Sources {
        #[arg(long, help = "Only sources of this kind (e.g. sqlserver)")]
        kind: Option<DatabaseKind>,
    },
    /// List the jobs of a source in execution order
    Jobs {
        #[arg(long, help = "Source ID")]
        source: SourceId,
    },
    /// Connect to a source and run a trivial query
    TestConn {
        #[arg(long, help = "Source ID")]
        source: SourceId,
    },
}
