use clap::Subcommand;

/// Rule type catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RuleTypeCommands {
    /// List rule types of a category in display order.
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Append a rule type to a category.
    Add {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        id: String,
        #[arg(long)]
        label: String,
    },
}
