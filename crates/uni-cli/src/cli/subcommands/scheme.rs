use clap::Subcommand;

/// Scheme commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SchemeCommands {
    /// Create a scheme.
    Create {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// `TYPE:holder[:parameter]`, repeatable.
        #[arg(long)]
        rule: Vec<String>,
    },
    /// List schemes of a category.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        filter: Option<String>,
    },
    /// Get a scheme with its rules and projects.
    Get { id: String },
    /// Delete schemes no project uses, e.g. the originals left by a merge.
    Delete {
        #[arg(required_unless_present = "unassociated", conflicts_with = "unassociated")]
        ids: Vec<String>,
        /// Every unassociated scheme of the category.
        #[arg(long)]
        unassociated: bool,
        #[arg(long, requires = "unassociated")]
        category: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
}
