use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        #[arg(long)]
        key: String,
        #[arg(long)]
        name: String,
    },
    /// List projects.
    List,
    /// Associate a project with a scheme, replacing its scheme of that category.
    Assign {
        /// Project key or id.
        project: String,
        /// Scheme id.
        #[arg(long)]
        scheme: String,
    },
}
